//! Gameplay Module
//!
//! A lightweight ECS-style simulation of one side-scrolling level.
//!
//! Key concepts:
//! - Entity: Generational index for safe entity references
//! - Component: Plain data structs attached to entities
//! - World: Container for all entities, their components and side tables
//! - Event: Physics contacts handed to the scene for dispatch
//! - Scene: The per-frame orchestrator that owns a World
//!
//! Everything runs on one thread, one `Scene::tick` per frame. Audio, HUD
//! and scene switching go out through the `sinks` traits.

pub mod entity;
pub mod component;
pub mod components;
pub mod world;
pub mod event;
pub mod scheduler;
pub mod physics;
pub mod spawner;
pub mod player;
pub mod smasher;
pub mod enemy;
pub mod scoring;
pub mod floating_text;
pub mod camera;
pub mod sinks;
pub mod audio;
pub mod hud;
pub mod input;
pub mod scene;

// Re-export main types
pub use entity::Entity;
pub use world::World;
pub use event::Events;
pub use input::TickInput;
pub use scene::Scene;
pub use sinks::{AudioSink, HudSink, Host, NullHost, PlayOverrides, SceneSink};
pub use audio::SoundEffect;
pub use hud::Hud;
pub use physics::{ArcadePhysics, PhysicsEngine};
