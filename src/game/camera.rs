//! Camera follow
//!
//! Exponential smoothing whose per-frame factor is rescaled by the delta
//! factor, so the camera settles in the same wall-clock time at 30 or 144 fps.

use crate::math::{lerp, Vec2};

/// Smallest lerp change worth applying
const LERP_EPSILON: f32 = 0.0001;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraFollow {
    base_lerp: f32,
    current_lerp: f32,
    /// Top-left of the viewport in world space
    pub scroll: Vec2,
    viewport: Vec2,
    bounds: Vec2,
    snapped: bool,
}

impl CameraFollow {
    pub fn new(base_lerp: f32, viewport: Vec2, bounds: Vec2) -> Self {
        Self {
            base_lerp,
            current_lerp: base_lerp,
            scroll: Vec2::ZERO,
            viewport,
            bounds,
            snapped: false,
        }
    }

    pub fn current_lerp(&self) -> f32 {
        self.current_lerp
    }

    /// `1 - (1 - base)^delta_factor`, clamped. Returns true if the stored value changed.
    pub fn update_lerp(&mut self, delta_factor: f32) -> bool {
        let lerp = (1.0 - (1.0 - self.base_lerp).powf(delta_factor)).clamp(0.0, 1.0);
        if (lerp - self.current_lerp).abs() > LERP_EPSILON {
            self.current_lerp = lerp;
            true
        } else {
            false
        }
    }

    /// Ease the scroll toward centering `target`, staying inside the level.
    pub fn follow(&mut self, target: Vec2) {
        let desired = self.clamp_scroll(Vec2::new(
            target.x - self.viewport.x * 0.5,
            target.y - self.viewport.y * 0.5,
        ));

        if !self.snapped {
            self.scroll = desired;
            self.snapped = true;
            return;
        }

        self.scroll = Vec2::new(
            lerp(self.scroll.x, desired.x, self.current_lerp),
            lerp(self.scroll.y, desired.y, self.current_lerp),
        );
    }

    fn clamp_scroll(&self, scroll: Vec2) -> Vec2 {
        let max_x = (self.bounds.x - self.viewport.x).max(0.0);
        let max_y = (self.bounds.y - self.viewport.y).max(0.0);
        Vec2::new(scroll.x.clamp(0.0, max_x), scroll.y.clamp(0.0, max_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> CameraFollow {
        CameraFollow::new(0.08, Vec2::new(960.0, 540.0), Vec2::new(4800.0, 900.0))
    }

    #[test]
    fn test_lerp_at_baseline_equals_base() {
        let mut cam = camera();
        assert!(!cam.update_lerp(1.0));
        assert!((cam.current_lerp() - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_scales_with_delta_factor() {
        let mut cam = camera();
        assert!(cam.update_lerp(2.0));
        let expected = 1.0 - 0.92f32.powf(2.0);
        assert!((cam.current_lerp() - expected).abs() < 1e-6);

        assert!(!cam.update_lerp(2.0));
        assert!(cam.update_lerp(0.25));
        assert!(cam.current_lerp() < 0.08);
    }

    #[test]
    fn test_follow_snaps_then_eases() {
        let mut cam = camera();
        cam.follow(Vec2::new(1000.0, 450.0));
        assert_eq!(cam.scroll, Vec2::new(520.0, 180.0));

        cam.follow(Vec2::new(1100.0, 450.0));
        assert!(cam.scroll.x > 520.0 && cam.scroll.x < 620.0);
    }

    #[test]
    fn test_follow_clamped_to_bounds() {
        let mut cam = camera();
        cam.follow(Vec2::new(10.0, 10.0));
        assert_eq!(cam.scroll, Vec2::ZERO);

        let mut cam = camera();
        cam.follow(Vec2::new(4790.0, 2000.0));
        assert_eq!(cam.scroll, Vec2::new(3840.0, 360.0));
    }
}
