//! Level definitions
//!
//! A `LevelDefinition` is an immutable template: placements for every entity
//! kind plus world bounds and the goal line. Templates are registered once in
//! a `LevelStore` and every play session gets its own deep copy.

mod io;
mod store;

pub use io::{
    limits, load_level, load_level_from_bytes, load_level_from_str, save_level,
    serialize_level, validate_level, LevelError,
};
pub use store::LevelStore;

use serde::{Serialize, Deserialize};

/// Key of the level embedded in the binary
pub const DEFAULT_LEVEL_KEY: &str = "default";

/// RON source of the embedded default level
pub const DEFAULT_LEVEL_RON: &str = include_str!("../../assets/levels/default.ron");

/// A placement with only a position (pads, coins, rings, spikes, player start)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// World size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// A static platform, centered at (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

/// A crushing hazard: top piece starts at `top_y`, bottom piece rests `gap` below it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Smasher {
    pub x: f32,
    pub top_y: f32,
    pub gap: f32,
}

/// Ground enemy patrolling `[left, right]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crawler {
    pub x: f32,
    pub y: f32,
    pub left: f32,
    pub right: f32,
    /// Pixels per second
    pub speed: f32,
}

/// Airborne enemy bobbing on a sine wave around its start height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flyer {
    pub x: f32,
    pub y: f32,
    pub amplitude: f32,
    /// Radians per millisecond (legacy level unit)
    pub speed: f32,
}

fn default_player_start() -> Point {
    Point::new(120.0, 450.0)
}

/// Complete level template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub key: String,
    pub bounds: Bounds,
    /// Reaching this x completes the level
    pub goal_x: f32,
    #[serde(default = "default_player_start")]
    pub player_start: Point,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub pads: Vec<Point>,
    #[serde(default)]
    pub coins: Vec<Point>,
    #[serde(default)]
    pub rings: Vec<Point>,
    #[serde(default)]
    pub spikes: Vec<Point>,
    #[serde(default)]
    pub smashers: Vec<Smasher>,
    #[serde(default)]
    pub crawlers: Vec<Crawler>,
    #[serde(default)]
    pub flyers: Vec<Flyer>,
}

impl LevelDefinition {
    /// An empty level with the given key and bounds; goal sits at the right edge.
    pub fn empty(key: &str, width: f32, height: f32) -> Self {
        Self {
            key: key.to_string(),
            bounds: Bounds { width, height },
            goal_x: width,
            player_start: default_player_start(),
            platforms: Vec::new(),
            pads: Vec::new(),
            coins: Vec::new(),
            rings: Vec::new(),
            spikes: Vec::new(),
            smashers: Vec::new(),
            crawlers: Vec::new(),
            flyers: Vec::new(),
        }
    }

    /// Total number of placements across every list
    pub fn placement_count(&self) -> usize {
        self.platforms.len()
            + self.pads.len()
            + self.coins.len()
            + self.rings.len()
            + self.spikes.len()
            + self.smashers.len()
            + self.crawlers.len()
            + self.flyers.len()
    }
}
