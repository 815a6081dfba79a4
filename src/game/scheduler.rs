//! Deferred one-shot actions
//!
//! Respawns and pad-cooldown clears are queued against the scene clock and
//! drained at the start of the first tick whose clock has reached their
//! deadline. Actions cannot be cancelled; whoever executes one must check
//! that its target entity is still alive.

use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// Bring a dead player back to its respawn point
    Respawn { player: Entity },
    /// Re-arm a boost pad
    ClearPadCooldown { pad: Entity },
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    fire_at_ms: f64,
    /// Breaks ties so equal deadlines fire in scheduling order
    seq: u64,
    action: ScheduledAction,
}

/// Queue of actions keyed by absolute fire time
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_at_ms: f64, action: ScheduledAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending { fire_at_ms, seq, action });
    }

    /// Remove and return every action with `fire_at_ms <= now_ms`, earliest first
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<ScheduledAction> {
        let (mut due, rest): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.fire_at_ms <= now_ms);
        self.pending = rest;

        due.sort_by(|a, b| {
            a.fire_at_ms
                .total_cmp(&b.fire_at_ms)
                .then(a.seq.cmp(&b.seq))
        });
        due.into_iter().map(|p| p.action).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
