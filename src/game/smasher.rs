//! Smasher hazard timing
//!
//! Each smasher runs a fixed cycle of period `P`:
//!
//! ```text
//! |-- closing (T) --|-- closed (H) --|-- opening (T) --|
//! 0                 T               T+H               P      T = (P - H) / 2
//! ```
//!
//! `is_closed` flips to true the instant closing travel completes and back to
//! false the instant opening travel starts, so the hazard is lethal for
//! exactly `H` out of every `P`. The top piece's position is derived from the
//! phase each tick; it never drives the state.

use crate::math::{ease_sine_in, ease_sine_out};
use super::components::SmasherId;
use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmasherPhase {
    Closing,
    Closed,
    Opening,
}

/// Self-driving three-phase cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmasherTimer {
    period_ms: f64,
    closed_ms: f64,
    /// Position inside the current cycle, always in [0, period)
    cycle_ms: f64,
}

impl SmasherTimer {
    /// `closed_ms` must be shorter than `period_ms` (enforced by config validation).
    pub fn new(period_ms: f64, closed_ms: f64) -> Self {
        Self {
            period_ms,
            closed_ms,
            cycle_ms: 0.0,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Duration of one travel leg
    pub fn travel_ms(&self) -> f64 {
        (self.period_ms - self.closed_ms) / 2.0
    }

    pub fn advance(&mut self, delta_ms: f64) {
        self.cycle_ms = (self.cycle_ms + delta_ms).rem_euclid(self.period_ms);
    }

    /// Phase and progress through it (0..1) at an arbitrary cycle position
    pub fn phase_at(&self, t_ms: f64) -> (SmasherPhase, f64) {
        let t = t_ms.rem_euclid(self.period_ms);
        let travel = self.travel_ms();
        if t < travel {
            (SmasherPhase::Closing, t / travel)
        } else if t < travel + self.closed_ms {
            (SmasherPhase::Closed, (t - travel) / self.closed_ms)
        } else {
            (SmasherPhase::Opening, (t - travel - self.closed_ms) / travel)
        }
    }

    pub fn phase(&self) -> SmasherPhase {
        self.phase_at(self.cycle_ms).0
    }

    pub fn is_closed(&self) -> bool {
        self.phase() == SmasherPhase::Closed
    }

    /// How far the top piece has traveled toward the bottom (0 = open, 1 = shut)
    pub fn closure(&self) -> f32 {
        let (phase, progress) = self.phase_at(self.cycle_ms);
        let progress = progress as f32;
        match phase {
            SmasherPhase::Closing => ease_sine_in(progress),
            SmasherPhase::Closed => 1.0,
            SmasherPhase::Opening => 1.0 - ease_sine_out(progress),
        }
    }
}

/// Side-table entry shared by a smasher's two pieces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmasherState {
    pub id: SmasherId,
    pub top: Entity,
    pub bottom: Entity,
    pub timer: SmasherTimer,
    /// Top piece y when fully open
    pub open_y: f32,
    /// Top piece y when fully shut
    pub closed_y: f32,
}

impl SmasherState {
    pub fn is_closed(&self) -> bool {
        self.timer.is_closed()
    }

    /// Where the top piece sits right now
    pub fn top_y(&self) -> f32 {
        self.open_y + (self.closed_y - self.open_y) * self.timer.closure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_exactly_hold_duration_per_cycle() {
        let mut timer = SmasherTimer::new(2000.0, 900.0);
        let mut closed_ms = 0;
        for _ in 0..2000 {
            if timer.is_closed() {
                closed_ms += 1;
            }
            timer.advance(1.0);
        }
        assert_eq!(closed_ms, 900);
    }

    #[test]
    fn test_cycle_is_exactly_periodic() {
        let timer = SmasherTimer::new(2000.0, 900.0);
        for t in (0..2000).step_by(7) {
            let t = t as f64;
            assert_eq!(timer.phase_at(t).0, timer.phase_at(t + 2000.0).0);
            assert_eq!(timer.phase_at(t).0, timer.phase_at(t + 6000.0).0);
        }
    }

    #[test]
    fn test_phase_boundaries() {
        let timer = SmasherTimer::new(2000.0, 900.0);
        assert_eq!(timer.travel_ms(), 550.0);
        assert_eq!(timer.phase_at(0.0).0, SmasherPhase::Closing);
        assert_eq!(timer.phase_at(549.0).0, SmasherPhase::Closing);
        assert_eq!(timer.phase_at(550.0).0, SmasherPhase::Closed);
        assert_eq!(timer.phase_at(1449.0).0, SmasherPhase::Closed);
        assert_eq!(timer.phase_at(1450.0).0, SmasherPhase::Opening);
        assert_eq!(timer.phase_at(1999.0).0, SmasherPhase::Opening);
    }

    #[test]
    fn test_large_steps_wrap() {
        let mut timer = SmasherTimer::new(2000.0, 900.0);
        timer.advance(2000.0 * 5.0 + 600.0);
        assert!(timer.is_closed());
        timer.advance(900.0);
        assert_eq!(timer.phase(), SmasherPhase::Opening);
    }

    #[test]
    fn test_closure_tracks_phase() {
        let mut timer = SmasherTimer::new(2000.0, 900.0);
        assert_eq!(timer.closure(), 0.0);
        timer.advance(550.0);
        assert_eq!(timer.closure(), 1.0);
        timer.advance(900.0);
        assert!((timer.closure() - 1.0).abs() < 1e-6);
        timer.advance(549.0);
        assert!(timer.closure() < 0.01);
    }

    #[test]
    fn test_top_y_interpolates() {
        let mut state = SmasherState {
            id: SmasherId(0),
            top: Entity::NULL,
            bottom: Entity::NULL,
            timer: SmasherTimer::new(2000.0, 900.0),
            open_y: 100.0,
            closed_y: 216.0,
        };
        assert_eq!(state.top_y(), 100.0);
        state.timer.advance(600.0);
        assert_eq!(state.top_y(), 216.0);
    }
}
