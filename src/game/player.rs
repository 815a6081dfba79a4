//! Player Controller
//!
//! Owns everything about the runner that is not raw physics: the jump budget
//! and its edge-detect latch, the forward acceleration blend, the cosmetic
//! boost-hair timer, pose selection and the death/respawn flags.
//!
//! The controller never touches the world directly. Every method takes the
//! player's `Body` explicitly so the scene decides when physics state changes.

use crate::config::GameConfig;
use crate::math::{lerp, Vec2};
use super::audio::SoundEffect;
use super::components::Body;
use super::sinks::AudioSink;

/// Player collider size
pub const PLAYER_WIDTH: f32 = 64.0;
pub const PLAYER_HEIGHT: f32 = 80.0;

/// Coarse movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPhase {
    Grounded,
    Airborne,
    Dying,
}

/// Which sprite the viewer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerPose {
    #[default]
    Running,
    Air,
    /// Airborne shortly after a pad boost
    AirBoost,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerController {
    remaining_jumps: u32,
    max_jumps: u32,
    /// Set once the jump input has been let go; a new jump needs it set
    jump_released: bool,
    /// Cosmetic countdown in ms, never negative
    boost_hair_ms: f32,
    respawn_point: Vec2,
    pub is_dying: bool,
    /// Death tint
    pub tinted: bool,
    pose: PlayerPose,
}

impl PlayerController {
    pub fn new(respawn_point: Vec2, max_jumps: u32) -> Self {
        Self {
            remaining_jumps: max_jumps,
            max_jumps,
            jump_released: true,
            boost_hair_ms: 0.0,
            respawn_point,
            is_dying: false,
            tinted: false,
            pose: PlayerPose::Running,
        }
    }

    /// Player body for a spawn point, capped the way the runner expects
    pub fn spawn_body(position: Vec2, config: &GameConfig) -> Body {
        Body::dynamic_rect(position, PLAYER_WIDTH, PLAYER_HEIGHT)
            .with_max_velocity(Vec2::new(config.run_speed * 1.2, config.max_fall_speed))
    }

    pub fn remaining_jumps(&self) -> u32 {
        self.remaining_jumps
    }

    pub fn max_jumps(&self) -> u32 {
        self.max_jumps
    }

    pub fn boost_hair_ms(&self) -> f32 {
        self.boost_hair_ms
    }

    pub fn respawn_point(&self) -> Vec2 {
        self.respawn_point
    }

    pub fn pose(&self) -> PlayerPose {
        self.pose
    }

    pub fn phase(&self, body: &Body) -> PlayerPhase {
        if self.is_dying {
            PlayerPhase::Dying
        } else if body.blocked_down {
            PlayerPhase::Grounded
        } else {
            PlayerPhase::Airborne
        }
    }

    pub fn reset_jumps(&mut self) {
        self.remaining_jumps = self.max_jumps;
    }

    /// Checkpoints move this; death returns here.
    pub fn set_respawn_point(&mut self, x: f32, y: f32) {
        self.respawn_point = Vec2::new(x, y);
    }

    pub fn trigger_boost_hair(&mut self, duration_ms: f32) {
        self.boost_hair_ms = duration_ms.max(0.0);
    }

    pub fn tick_boost_hair(&mut self, delta_ms: f32) {
        if self.boost_hair_ms > 0.0 {
            self.boost_hair_ms = (self.boost_hair_ms - delta_ms).max(0.0);
        }
    }

    /// Spend a jump if one is left. Returns false (and changes nothing) otherwise.
    pub fn try_jump<A: AudioSink + ?Sized>(
        &mut self,
        body: &mut Body,
        jump_velocity: f32,
        audio: &mut A,
    ) -> bool {
        if self.remaining_jumps == 0 {
            return false;
        }

        body.velocity.y = jump_velocity;
        self.remaining_jumps -= 1;
        SoundEffect::PlayerJump.play_on(audio);
        true
    }

    /// Per-tick forward blend and edge-detected jump.
    pub fn update_movement<A: AudioSink + ?Sized>(
        &mut self,
        body: &mut Body,
        jump_held: bool,
        delta_factor: f32,
        config: &GameConfig,
        audio: &mut A,
    ) {
        let strength = (delta_factor * config.run_acceleration).clamp(0.0, 1.0);
        body.velocity.x = lerp(body.velocity.x, config.run_speed, strength);

        if !jump_held {
            self.jump_released = true;
            return;
        }

        if self.jump_released {
            self.try_jump(body, config.jump_velocity, audio);
            self.jump_released = false;
        }
    }

    /// Release edge from the input source
    pub fn handle_jump_release(&mut self) {
        self.jump_released = true;
    }

    pub fn update_pose(&mut self, body: &Body) {
        self.pose = match self.phase(body) {
            PlayerPhase::Grounded => PlayerPose::Running,
            PlayerPhase::Airborne if self.boost_hair_ms > 0.0 => PlayerPose::AirBoost,
            PlayerPhase::Airborne => PlayerPose::Air,
            // Frozen on the death frame
            PlayerPhase::Dying => self.pose,
        };
    }

    /// Keep vertical speed inside `[-max_fall, max_fall]`
    pub fn clamp_fall_speed(body: &mut Body, max_fall: f32) {
        body.velocity.y = body.velocity.y.clamp(-max_fall, max_fall);
    }

    /// Freeze in place for the death window
    pub fn begin_death(&mut self, body: &mut Body) {
        self.is_dying = true;
        self.tinted = true;
        body.stop();
        body.enabled = false;
    }

    /// Back to the respawn point with a full jump budget
    pub fn respawn(&mut self, body: &mut Body) {
        body.stop();
        body.position = self.respawn_point;
        body.enabled = true;
        body.blocked_down = false;
        self.reset_jumps();
        self.tinted = false;
        self.boost_hair_ms = 0.0;
        self.pose = PlayerPose::Running;
        self.is_dying = false;
    }
}
