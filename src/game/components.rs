//! Gameplay Components
//!
//! Plain data attached to entities. Behavior lives in the systems
//! (`player`, `enemy`, `smasher`, `physics`, `scene`).

use serde::{Serialize, Deserialize};
use crate::math::Vec2;

// =============================================================================
// Physics
// =============================================================================

/// Collision volume, centered on `Body::position + Body::offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect { width: f32, height: f32 },
    Circle { radius: f32 },
}

/// Axis-aligned bounds of a collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.min.x + self.max.x) * 0.5, (self.min.y + self.max.y) * 0.5)
    }
}

/// Physical body of an entity.
///
/// `position` is the sprite center; the collider may be offset from it
/// (spikes use a shrunken, bottom-aligned hitbox).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub shape: Shape,
    /// Collider center relative to `position`
    pub offset: Vec2,
    /// Affected by world gravity
    pub gravity: bool,
    /// Never integrated by physics (platforms, pickups, kinematic pieces)
    pub is_static: bool,
    /// Blocks movers instead of just overlapping them
    pub solid: bool,
    /// Disabled bodies neither move nor produce contacts
    pub enabled: bool,
    /// Per-axis velocity cap
    pub max_velocity: Option<Vec2>,
    /// Resting on a surface after the last physics step
    pub blocked_down: bool,
}

impl Body {
    /// Immovable rectangle (platforms, pads, spikes, smasher pieces)
    pub fn fixed_rect(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            shape: Shape::Rect { width, height },
            offset: Vec2::ZERO,
            gravity: false,
            is_static: true,
            solid: false,
            enabled: true,
            max_velocity: None,
            blocked_down: false,
        }
    }

    /// Immovable circle (coins, rings)
    pub fn fixed_circle(position: Vec2, radius: f32) -> Self {
        Self {
            shape: Shape::Circle { radius },
            ..Self::fixed_rect(position, 0.0, 0.0)
        }
    }

    /// Gravity-affected rectangle integrated by physics (player, crawlers)
    pub fn dynamic_rect(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            gravity: true,
            is_static: false,
            ..Self::fixed_rect(position, width, height)
        }
    }

    pub fn solid(mut self) -> Self {
        self.solid = true;
        self
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_max_velocity(mut self, max: Vec2) -> Self {
        self.max_velocity = Some(max);
        self
    }

    pub fn collider_center(&self) -> Vec2 {
        self.position + self.offset
    }

    pub fn aabb(&self) -> Aabb {
        let c = self.collider_center();
        let (hw, hh) = match self.shape {
            Shape::Rect { width, height } => (width * 0.5, height * 0.5),
            Shape::Circle { radius } => (radius, radius),
        };
        Aabb {
            min: Vec2::new(c.x - hw, c.y - hh),
            max: Vec2::new(c.x + hw, c.y + hh),
        }
    }

    /// Zero velocity (the engine's `body.stop()`)
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }
}

// =============================================================================
// Kind tags
// =============================================================================

/// What an entity is, for contact dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Player,
    Platform,
    Pad,
    Coin,
    Ring,
    Spike,
    SmasherPiece,
    Crawler,
    Flyer,
}

impl Kind {
    pub fn is_enemy(self) -> bool {
        matches!(self, Kind::Crawler | Kind::Flyer)
    }

    pub fn is_pickup(self) -> bool {
        matches!(self, Kind::Coin | Kind::Ring)
    }
}

// =============================================================================
// Per-kind state
// =============================================================================

/// Boost pad
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pad {
    /// While set, boost overlaps are ignored
    pub cooldown: bool,
    /// Visual cooldown cue
    pub tinted: bool,
}

/// Index into the world's smasher side-table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SmasherId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceRole {
    Top,
    Bottom,
}

/// One half of a smasher; hazard state lives in the side-table, not here
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmasherPiece {
    pub smasher: SmasherId,
    pub role: PieceRole,
}

/// Ground patrol between two x bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patrol {
    pub left: f32,
    pub right: f32,
    /// Pixels per second; sign is ignored
    pub speed: f32,
}

/// Sine-wave flight around a fixed height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightPath {
    pub start_y: f32,
    pub amplitude: f32,
    /// Radians per second
    pub angular_speed: f32,
    /// Accumulated, never wrapped
    pub phase: f32,
}
