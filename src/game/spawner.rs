//! Entity Spawner
//!
//! Turns a `LevelDefinition` into live entities with correctly sized
//! colliders. Level data only carries positions; the sizes below are the
//! sprite sizes each kind is drawn at.

use crate::config::GameConfig;
use crate::level::LevelDefinition;
use crate::math::Vec2;
use super::components::{Body, FlightPath, Kind, Patrol, SmasherId};
use super::entity::Entity;
use super::smasher::SmasherTimer;
use super::world::World;

pub const PLATFORM_HEIGHT: f32 = 32.0;
pub const PAD_SIZE: (f32, f32) = (80.0, 18.0);
pub const COIN_DIAMETER: f32 = 20.0;
pub const RING_DIAMETER: f32 = 36.0;
pub const SPIKE_SIZE: f32 = 32.0;
/// Spike hitbox as a fraction of the sprite; bottom-aligned
pub const SPIKE_HITBOX: (f32, f32) = (0.6, 0.85);
pub const SMASHER_SIZE: (f32, f32) = (80.0, 40.0);
/// How far a closed top piece sinks into the bottom one
pub const SMASHER_OVERLAP: f32 = 4.0;
pub const CRAWLER_SIZE: (f32, f32) = (48.0, 32.0);
pub const FLYER_SIZE: (f32, f32) = (32.0, 24.0);

/// Entities created for a level, grouped by kind in level-definition order
#[derive(Debug, Default, Clone)]
pub struct LevelGroups {
    pub platforms: Vec<Entity>,
    pub pads: Vec<Entity>,
    pub coins: Vec<Entity>,
    pub rings: Vec<Entity>,
    pub spikes: Vec<Entity>,
    pub smashers: Vec<SmasherId>,
    pub crawlers: Vec<Entity>,
    pub flyers: Vec<Entity>,
}

/// Spike collider: 60% wide, 85% tall, sitting on the sprite's bottom edge
pub fn spike_body(position: Vec2) -> Body {
    let width = SPIKE_SIZE * SPIKE_HITBOX.0;
    let height = SPIKE_SIZE * SPIKE_HITBOX.1;
    let offset_y = (SPIKE_SIZE - height) * 0.5;
    Body::fixed_rect(position, width, height).with_offset(Vec2::new(0.0, offset_y))
}

/// Spawn everything in `level` except the player.
pub fn spawn_level(world: &mut World, level: &LevelDefinition, config: &GameConfig) -> LevelGroups {
    let mut groups = LevelGroups::default();

    for p in &level.platforms {
        let body = Body::fixed_rect(Vec2::new(p.x, p.y), p.width, PLATFORM_HEIGHT).solid();
        groups.platforms.push(world.spawn_body(body, Kind::Platform));
    }

    for p in &level.pads {
        let body = Body::fixed_rect(Vec2::new(p.x, p.y), PAD_SIZE.0, PAD_SIZE.1);
        groups.pads.push(world.spawn_pad(body));
    }

    for c in &level.coins {
        let body = Body::fixed_circle(Vec2::new(c.x, c.y), COIN_DIAMETER * 0.5);
        groups.coins.push(world.spawn_body(body, Kind::Coin));
    }

    for r in &level.rings {
        let body = Body::fixed_circle(Vec2::new(r.x, r.y), RING_DIAMETER * 0.5);
        groups.rings.push(world.spawn_body(body, Kind::Ring));
    }

    for s in &level.spikes {
        groups.spikes.push(world.spawn_body(spike_body(Vec2::new(s.x, s.y)), Kind::Spike));
    }

    for s in &level.smashers {
        let (w, h) = SMASHER_SIZE;
        let bottom_y = s.top_y + s.gap;
        let top = Body::fixed_rect(Vec2::new(s.x, s.top_y), w, h).solid();
        let bottom = Body::fixed_rect(Vec2::new(s.x, bottom_y), w, h).solid();
        let closed_y = bottom_y - h + SMASHER_OVERLAP;
        let timer = SmasherTimer::new(config.smasher_period_ms, config.smasher_closed_ms);
        groups.smashers.push(world.spawn_smasher(top, bottom, timer, closed_y));
    }

    for c in &level.crawlers {
        let mut body = Body::dynamic_rect(Vec2::new(c.x, c.y), CRAWLER_SIZE.0, CRAWLER_SIZE.1);
        body.velocity.x = c.speed;
        let patrol = Patrol {
            left: c.left,
            right: c.right,
            speed: c.speed,
        };
        groups.crawlers.push(world.spawn_crawler(body, patrol));
    }

    for f in &level.flyers {
        let body = Body::fixed_rect(Vec2::new(f.x, f.y), FLYER_SIZE.0, FLYER_SIZE.1);
        let path = FlightPath {
            start_y: f.y,
            amplitude: f.amplitude,
            // Level files store rad/ms
            angular_speed: f.speed * 1000.0,
            phase: 0.0,
        };
        groups.flyers.push(world.spawn_flyer(body, path));
    }

    groups
}
