//! Floating score callouts
//!
//! A free-list pool of text slots. Slots are pre-warmed at level start and
//! recycled after their rise-and-fade finishes; if more are needed at once
//! the pool grows instead of failing.

use tracing::debug;

use crate::math::lerp;

/// Handle to a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingTextSlot {
    pub active: bool,
    pub x: f32,
    pub y: f32,
    /// Where the rise started; restored on release
    pub start_y: f32,
    pub text: String,
    pub alpha: f32,
    elapsed_ms: f32,
}

impl FloatingTextSlot {
    fn blank() -> Self {
        Self {
            active: false,
            x: 0.0,
            y: 0.0,
            start_y: 0.0,
            text: String::new(),
            alpha: 1.0,
            elapsed_ms: 0.0,
        }
    }
}

#[derive(Debug)]
pub struct FloatingTextPool {
    slots: Vec<FloatingTextSlot>,
    free: Vec<usize>,
    prewarmed: usize,
    duration_ms: f32,
    rise: f32,
}

impl FloatingTextPool {
    pub fn new(prewarm: usize, duration_ms: f32, rise: f32) -> Self {
        Self {
            slots: (0..prewarm).map(|_| FloatingTextSlot::blank()).collect(),
            free: (0..prewarm).rev().collect(),
            prewarmed: prewarm,
            duration_ms,
            rise,
        }
    }

    /// Take an inactive slot, allocating a new one when none are free.
    pub fn acquire(&mut self) -> SlotId {
        if let Some(idx) = self.free.pop() {
            return SlotId(idx);
        }

        self.slots.push(FloatingTextSlot::blank());
        let idx = self.slots.len() - 1;
        debug!(capacity = self.slots.len(), prewarmed = self.prewarmed, "floating text pool grew");
        SlotId(idx)
    }

    /// Deactivate a slot and hand it back. Releasing a free slot does nothing.
    pub fn release(&mut self, id: SlotId) {
        let Some(slot) = self.slots.get_mut(id.0) else {
            return;
        };
        if self.free.contains(&id.0) {
            return;
        }
        slot.active = false;
        slot.alpha = 1.0;
        slot.y = slot.start_y;
        slot.elapsed_ms = 0.0;
        self.free.push(id.0);
    }

    /// Show `text` at (x, y); it rises and fades, then releases itself.
    pub fn spawn(&mut self, x: f32, y: f32, text: impl Into<String>) -> SlotId {
        let id = self.acquire();
        let slot = &mut self.slots[id.0];
        slot.active = true;
        slot.x = x;
        slot.y = y;
        slot.start_y = y;
        slot.text = text.into();
        slot.alpha = 1.0;
        slot.elapsed_ms = 0.0;
        id
    }

    /// Advance every active animation, releasing finished slots.
    pub fn update(&mut self, delta_ms: f32) {
        let mut finished = Vec::new();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if !slot.active {
                continue;
            }
            slot.elapsed_ms += delta_ms;
            let t = (slot.elapsed_ms / self.duration_ms).min(1.0);
            slot.y = lerp(slot.start_y, slot.start_y - self.rise, t);
            slot.alpha = 1.0 - t;
            if t >= 1.0 {
                finished.push(SlotId(idx));
            }
        }
        for id in finished {
            self.release(id);
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&FloatingTextSlot> {
        self.slots.get(id.0)
    }

    pub fn active(&self) -> impl Iterator<Item = &FloatingTextSlot> {
        self.slots.iter().filter(|s| s.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }
}
