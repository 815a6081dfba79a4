//! JUMPMAN: a one-button side-scrolling platformer
//!
//! The runner moves forward on its own; the player only decides when to
//! jump. This crate holds the whole simulation so it can be driven by the
//! macroquad viewer, the level tooling in `xtask`, or tests:
//! - `level`: level templates, RON/brotli files, the template store
//! - `config`: tuning constants
//! - `game`: the per-frame simulation

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod math;
pub mod config;
pub mod level;
pub mod game;
