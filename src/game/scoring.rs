//! Coin and ring scoring

/// What a ring pickup did to the multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingOutcome {
    /// Multiplier rose by this much (may be less than the step near the cap)
    Increased(f32),
    /// Already at the cap
    Saturated,
}

impl RingOutcome {
    /// Callout text: "+0.5x" or "MAX"
    pub fn feedback_text(&self) -> String {
        match self {
            RingOutcome::Increased(delta) => format!("+{:.1}x", delta),
            RingOutcome::Saturated => "MAX".to_string(),
        }
    }
}

/// Running coin total and the multiplier applied to new coins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreState {
    coins_collected: u32,
    multiplier: f32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            coins_collected: 0,
            multiplier: 1.0,
        }
    }

    pub fn coins_collected(&self) -> u32 {
        self.coins_collected
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// What a coin is worth right now: `round(base * multiplier)`
    pub fn coin_award(&self, base_value: u32) -> u32 {
        (base_value as f32 * self.multiplier).round() as u32
    }

    /// Bank a coin and return the award
    pub fn collect_coin(&mut self, base_value: u32) -> u32 {
        let awarded = self.coin_award(base_value);
        self.coins_collected += awarded;
        awarded
    }

    /// Raise the multiplier by `step`, clamped to `[1, max]`
    pub fn collect_ring(&mut self, step: f32, max: f32) -> RingOutcome {
        let previous = self.multiplier;
        self.multiplier = (previous + step).clamp(1.0, max);
        let delta = self.multiplier - previous;
        if delta > 0.0 {
            RingOutcome::Increased(delta)
        } else {
            RingOutcome::Saturated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_award_at_base_multiplier() {
        let mut score = ScoreState::new();
        assert_eq!(score.collect_coin(10), 10);
        assert_eq!(score.coins_collected(), 10);
    }

    #[test]
    fn test_coin_award_scaled_and_rounded() {
        let mut score = ScoreState::new();
        score.collect_ring(0.5, 5.0);
        score.collect_ring(0.5, 5.0);
        score.collect_ring(0.5, 5.0);
        assert_eq!(score.multiplier(), 2.5);
        assert_eq!(score.coin_award(10), 25);
        assert_eq!(score.coin_award(3), 8);
    }

    #[test]
    fn test_ring_never_exceeds_cap() {
        let mut score = ScoreState::new();
        for _ in 0..20 {
            score.collect_ring(0.5, 5.0);
            assert!(score.multiplier() <= 5.0);
        }
        assert_eq!(score.collect_ring(0.5, 5.0), RingOutcome::Saturated);
        assert_eq!(score.multiplier(), 5.0);
    }

    #[test]
    fn test_partial_step_near_cap_reports_actual_delta() {
        let mut score = ScoreState::new();
        for _ in 0..7 {
            score.collect_ring(0.5, 4.7);
        }
        // 1.0 + 7 * 0.5 = 4.5, next step only has 0.2 left
        let outcome = score.collect_ring(0.5, 4.7);
        match outcome {
            RingOutcome::Increased(delta) => assert!((delta - 0.2).abs() < 1e-5),
            other => panic!("expected increase, got {:?}", other),
        }
        assert_eq!(outcome.feedback_text(), "+0.2x");
    }

    #[test]
    fn test_feedback_text() {
        assert_eq!(RingOutcome::Increased(0.5).feedback_text(), "+0.5x");
        assert_eq!(RingOutcome::Saturated.feedback_text(), "MAX");
    }
}
