//! Event System
//!
//! Physics reports what touched the player as `ContactEvent`s. The scene
//! drains them in the same tick and routes each one to its handler, so the
//! physics step never calls gameplay code directly.

use super::components::Kind;
use super::entity::Entity;

/// A queue for events of a single type.
/// Events are collected during the step and drained by the scene.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events in the order they were sent
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all simulation events.
#[derive(Debug, Default)]
pub struct Events {
    /// Player touched or overlapped another collider
    pub contacts: EventQueue<ContactEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The player's collider touched `other` this step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub player: Entity,
    pub other: Entity,
    /// Copied so handlers can dispatch without a lookup
    pub kind: Kind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);
        assert_eq!(queue.len(), 3);

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_events_container() {
        let mut events = Events::new();
        events.contacts.send(ContactEvent {
            player: Entity::NULL,
            other: Entity::NULL,
            kind: Kind::Coin,
        });
        assert_eq!(events.contacts.len(), 1);

        let drained: Vec<_> = events.contacts.drain().collect();
        assert_eq!(drained[0].kind, Kind::Coin);
        assert!(events.contacts.is_empty());
    }
}
