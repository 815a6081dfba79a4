//! HUD text model
//!
//! Receives the scene's HUD calls and keeps display-ready strings. Drawing
//! is the viewer's job.

use super::sinks::HudSink;

/// How long the multiplier label stays enlarged after a change
pub const PULSE_MS: f32 = 120.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub coins_text: String,
    pub multiplier_text: String,
    pub progress_text: String,
    /// Remaining pulse time in ms
    pub pulse_ms: f32,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            coins_text: "0".to_string(),
            multiplier_text: format_multiplier(1.0),
            progress_text: format_progress(0.0),
            pulse_ms: 0.0,
        }
    }
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, delta_ms: f32) {
        self.pulse_ms = (self.pulse_ms - delta_ms).max(0.0);
    }

    /// Scale of the multiplier label, 1.0 when idle
    pub fn pulse_scale(&self) -> f32 {
        1.0 + 0.2 * (self.pulse_ms / PULSE_MS)
    }
}

pub fn format_multiplier(value: f32) -> String {
    format!("x{:.1}", value)
}

pub fn format_progress(fraction: f32) -> String {
    let percent = (fraction * 100.0).round().min(100.0);
    format!("{}%", percent as u32)
}

impl HudSink for Hud {
    fn update_coins(&mut self, total: u32) {
        self.coins_text = total.to_string();
    }

    fn update_multiplier(&mut self, value: f32) {
        self.multiplier_text = format_multiplier(value);
        self.pulse_ms = PULSE_MS;
    }

    fn update_progress(&mut self, fraction: f32) {
        self.progress_text = format_progress(fraction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        assert_eq!(format_multiplier(2.5), "x2.5");
        assert_eq!(format_multiplier(1.0), "x1.0");
        assert_eq!(format_progress(0.0), "0%");
        assert_eq!(format_progress(0.426), "43%");
        assert_eq!(format_progress(1.0), "100%");
    }

    #[test]
    fn test_pulse_decays() {
        let mut hud = Hud::new();
        hud.update_multiplier(1.5);
        assert_eq!(hud.pulse_ms, PULSE_MS);
        assert!(hud.pulse_scale() > 1.0);

        hud.update(100.0);
        hud.update(100.0);
        assert_eq!(hud.pulse_ms, 0.0);
        assert_eq!(hud.pulse_scale(), 1.0);
    }

    #[test]
    fn test_coins_text() {
        let mut hud = Hud::new();
        hud.update_coins(125);
        assert_eq!(hud.coins_text, "125");
    }
}
