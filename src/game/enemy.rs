//! Enemy motion
//!
//! Crawlers are ordinary gravity bodies whose x velocity is flipped at the
//! patrol bounds. Flyers ignore physics entirely and are placed directly on
//! a sine wave every tick.

use super::components::{Body, FlightPath, Patrol};

/// Point a crawler back into its patrol interval once it reaches or passes a bound.
/// Inside the interval the current velocity is left alone.
pub fn update_patrol(body: &mut Body, patrol: &Patrol) {
    let speed = patrol.speed.abs();
    if body.position.x <= patrol.left {
        body.velocity.x = speed;
    } else if body.position.x >= patrol.right {
        body.velocity.x = -speed;
    }
}

/// Advance a flyer's phase and reposition it.
pub fn update_flight(body: &mut Body, path: &mut FlightPath, delta_secs: f32) {
    path.phase += path.angular_speed * delta_secs;
    body.position.y = path.start_y + path.phase.sin() * path.amplitude;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    fn crawler_at(x: f32, vx: f32) -> Body {
        let mut body = Body::dynamic_rect(Vec2::new(x, 0.0), 32.0, 24.0);
        body.velocity.x = vx;
        body
    }

    #[test]
    fn test_flips_at_right_bound() {
        let patrol = Patrol { left: 0.0, right: 100.0, speed: 80.0 };
        let mut body = crawler_at(100.0, 80.0);
        update_patrol(&mut body, &patrol);
        assert_eq!(body.velocity.x, -80.0);

        let mut past = crawler_at(130.0, 80.0);
        update_patrol(&mut past, &patrol);
        assert_eq!(past.velocity.x, -80.0);
    }

    #[test]
    fn test_flips_at_left_bound_with_negative_speed() {
        let patrol = Patrol { left: 0.0, right: 100.0, speed: -60.0 };
        let mut body = crawler_at(-5.0, -60.0);
        update_patrol(&mut body, &patrol);
        assert_eq!(body.velocity.x, 60.0);
    }

    #[test]
    fn test_inside_interval_keeps_velocity() {
        let patrol = Patrol { left: 0.0, right: 100.0, speed: 80.0 };
        let mut body = crawler_at(50.0, -80.0);
        update_patrol(&mut body, &patrol);
        assert_eq!(body.velocity.x, -80.0);
    }

    #[test]
    fn test_patrol_stays_within_interval() {
        let patrol = Patrol { left: 0.0, right: 100.0, speed: 90.0 };
        let mut body = crawler_at(50.0, 90.0);
        let dt = 1.0 / 60.0;
        for _ in 0..2000 {
            update_patrol(&mut body, &patrol);
            body.position.x += body.velocity.x * dt;
            assert!(body.position.x >= patrol.left - 90.0 * dt - 1e-3);
            assert!(body.position.x <= patrol.right + 90.0 * dt + 1e-3);
        }
    }

    #[test]
    fn test_flight_is_pure_function_of_phase() {
        let mut body = Body::fixed_rect(Vec2::new(0.0, 300.0), 36.0, 24.0);
        let mut path = FlightPath { start_y: 300.0, amplitude: 60.0, angular_speed: 2.0, phase: 0.0 };

        update_flight(&mut body, &mut path, 0.25);
        assert!((path.phase - 0.5).abs() < 1e-6);
        assert!((body.position.y - (300.0 + 0.5f32.sin() * 60.0)).abs() < 1e-4);

        for _ in 0..1000 {
            update_flight(&mut body, &mut path, 0.1);
        }
        assert!(body.position.y >= 240.0 - 1e-3 && body.position.y <= 360.0 + 1e-3);
    }
}
