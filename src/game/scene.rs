//! Gameplay Scene
//!
//! Owns one running level and drives it one frame at a time. Each `tick`:
//!
//! 0. Advance the scene clock, fire due scheduled actions, advance the
//!    self-driving timers (smashers, floating text, boost hair).
//! 0b. Step physics and route every contact to its handler.
//! 1. Stop here if the player is gone or dying.
//! 2. Compute the delta factor.
//! 3. Player movement and jump.
//! 4. Crawler patrols.
//! 5. Flyer paths.
//! 6. Camera smoothing.
//! 7. Grounded jump reset and fall clamp.
//! 8. Progress report.
//! 9. Completion, exactly once. After that `tick` does nothing.

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::level::{LevelDefinition, LevelError, LevelStore};
use crate::math::Vec2;
use super::audio::SoundEffect;
use super::camera::CameraFollow;
use super::components::{Body, Kind, Patrol};
use super::entity::Entity;
use super::enemy::{update_flight, update_patrol};
use super::event::{ContactEvent, Events};
use super::floating_text::FloatingTextPool;
use super::input::TickInput;
use super::physics::{ArcadePhysics, PhysicsEngine};
use super::player::PlayerController;
use super::scheduler::{ScheduledAction, Scheduler};
use super::scoring::ScoreState;
use super::sinks::Host;
use super::spawner::{spawn_level, LevelGroups};
use super::world::World;

/// Falling this far below the level's bottom edge kills the player
pub const KILL_PLANE_MARGIN: f32 = 200.0;

/// Floating text offsets above the player
const COIN_TEXT_OFFSET: f32 = 30.0;
const RING_TEXT_OFFSET: f32 = 40.0;

pub struct Scene<P: PhysicsEngine = ArcadePhysics> {
    config: GameConfig,
    level: LevelDefinition,
    world: World,
    events: Events,
    physics: P,
    scheduler: Scheduler,
    groups: LevelGroups,
    player: Entity,
    score: ScoreState,
    floating_texts: FloatingTextPool,
    camera: CameraFollow,
    /// Milliseconds since the level started
    clock_ms: f64,
    completed: bool,
}

impl Scene<ArcadePhysics> {
    /// Instantiate `key` from the store and build a fresh scene for it.
    pub fn start(store: &LevelStore, key: &str, config: GameConfig) -> Result<Self, LevelError> {
        let level = store.instantiate(key)?;
        let physics =
            ArcadePhysics::new(config.gravity).with_max_step(config.baseline_frame_ms / 1000.0);
        Ok(Self::with_physics(level, config, physics))
    }
}

impl<P: PhysicsEngine> Scene<P> {
    /// Build a scene around an already-instantiated level.
    pub fn with_physics(level: LevelDefinition, config: GameConfig, physics: P) -> Self {
        let mut world = World::new();
        let groups = spawn_level(&mut world, &level, &config);

        let start = Vec2::new(level.player_start.x, level.player_start.y);
        let player = world.spawn_player(
            PlayerController::spawn_body(start, &config),
            PlayerController::new(start, config.max_jumps),
        );

        let floating_texts = FloatingTextPool::new(
            config.floating_text_pool_size,
            config.floating_text_duration_ms,
            config.floating_text_rise,
        );
        let mut camera = CameraFollow::new(
            config.camera_lerp,
            Vec2::new(config.viewport_width, config.viewport_height),
            Vec2::new(level.bounds.width, level.bounds.height),
        );
        camera.follow(start);

        info!(
            key = %level.key,
            entities = world.entity_count(),
            goal_x = level.goal_x,
            "level started"
        );

        Self {
            config,
            level,
            world,
            events: Events::new(),
            physics,
            scheduler: Scheduler::new(),
            groups,
            player,
            score: ScoreState::new(),
            floating_texts,
            camera,
            clock_ms: 0.0,
            completed: false,
        }
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advance the level by one frame of `delta_ms` milliseconds.
    pub fn tick<H: Host>(&mut self, delta_ms: f32, input: TickInput, host: &mut H) {
        if self.completed {
            return;
        }
        let delta_ms = delta_ms.max(0.0);

        // 0. Clock, deferred actions, self-driving timers
        self.clock_ms += delta_ms as f64;
        self.run_due_actions();
        self.advance_timers(delta_ms);

        // 0b. Physics and collision handlers
        self.physics.step(&mut self.world, delta_ms / 1000.0, &mut self.events);
        self.dispatch_contacts(host);
        self.world.flush_despawns();
        self.check_kill_plane(host);

        // 1.
        let player = self.player;
        match self.world.players.get(player) {
            Some(controller) if self.world.is_alive(player) && !controller.is_dying => {}
            _ => return,
        }

        // 2.
        let delta_factor = self.config.delta_factor(delta_ms);

        // 3.
        if let Some((body, controller)) = self.world.player_parts_mut(player) {
            if input.jump_released {
                controller.handle_jump_release();
            }
            controller.update_movement(body, input.jump_held, delta_factor, &self.config, host);
        }

        // 4.
        self.update_crawlers();

        // 5.
        self.update_flyers(delta_ms / 1000.0);

        // 6.
        self.camera.update_lerp(delta_factor);
        if let Some(body) = self.world.body(player) {
            self.camera.follow(body.position);
        }

        // 7.
        let max_fall = self.config.max_fall_speed;
        let Some((body, controller)) = self.world.player_parts_mut(player) else {
            return;
        };
        if body.blocked_down {
            controller.reset_jumps();
        }
        PlayerController::clamp_fall_speed(body, max_fall);
        controller.update_pose(body);
        let player_x = body.position.x;

        // 8.
        let goal_x = self.level.goal_x;
        let progress = (player_x / goal_x).clamp(0.0, 1.0);
        host.update_progress(progress);

        // 9.
        if player_x >= goal_x {
            self.completed = true;
            info!(key = %self.level.key, clock_ms = self.clock_ms, "level complete");
            host.start_scene(&self.config.completion_scene);
        }
    }

    fn run_due_actions(&mut self) {
        if self.scheduler.is_empty() {
            return;
        }
        for action in self.scheduler.drain_due(self.clock_ms) {
            match action {
                ScheduledAction::Respawn { player } => {
                    if let Some((body, controller)) = self.world.player_parts_mut(player) {
                        controller.respawn(body);
                        debug!(x = body.position.x, y = body.position.y, "player respawned");
                    }
                }
                ScheduledAction::ClearPadCooldown { pad } => {
                    if !self.world.is_alive(pad) {
                        continue;
                    }
                    if let Some(state) = self.world.pads.get_mut(pad) {
                        state.cooldown = false;
                        state.tinted = false;
                    }
                }
            }
        }
    }

    fn advance_timers(&mut self, delta_ms: f32) {
        let mut moves = Vec::with_capacity(self.world.smashers.len());
        for smasher in &mut self.world.smashers {
            smasher.timer.advance(delta_ms as f64);
            moves.push((smasher.top, smasher.top_y()));
        }
        for (top, y) in moves {
            if let Some(body) = self.world.body_mut(top) {
                body.position.y = y;
            }
        }

        self.floating_texts.update(delta_ms);

        if let Some(controller) = self.world.players.get_mut(self.player) {
            controller.tick_boost_hair(delta_ms);
        }
    }

    fn dispatch_contacts<H: Host>(&mut self, host: &mut H) {
        if self.events.contacts.is_empty() {
            return;
        }
        let contacts: Vec<ContactEvent> = self.events.contacts.drain().collect();
        for contact in contacts {
            if self.is_player_dying() {
                break;
            }
            if !self.world.is_alive(contact.other) {
                continue;
            }
            match contact.kind {
                Kind::Platform => {
                    if let Some(controller) = self.world.players.get_mut(contact.player) {
                        controller.reset_jumps();
                    }
                }
                Kind::Pad => self.handle_pad_boost(contact.other, host),
                Kind::Coin => self.collect_coin(contact.other, host),
                Kind::Ring => self.collect_ring(contact.other, host),
                Kind::Spike => self.handle_player_death(host),
                Kind::SmasherPiece => self.handle_smasher_collision(contact.other, host),
                Kind::Crawler | Kind::Flyer => self.handle_enemy_hit(host),
                Kind::Player => {}
            }
        }
    }

    fn check_kill_plane<H: Host>(&mut self, host: &mut H) {
        let limit = self.level.bounds.height + KILL_PLANE_MARGIN;
        let fell = self
            .world
            .body(self.player)
            .map(|b| b.enabled && b.position.y > limit)
            .unwrap_or(false);
        if fell {
            self.handle_player_death(host);
        }
    }

    fn update_crawlers(&mut self) {
        let patrols: Vec<(Entity, Patrol)> = self
            .world
            .patrols
            .iter()
            .filter_map(|(idx, patrol)| self.world.entity_at(idx).map(|e| (e, *patrol)))
            .collect();
        for (crawler, patrol) in patrols {
            if let Some(body) = self.world.body_mut(crawler) {
                update_patrol(body, &patrol);
            }
        }
    }

    fn update_flyers(&mut self, delta_secs: f32) {
        let flyers: Vec<Entity> = self
            .world
            .flights
            .iter()
            .filter_map(|(idx, _)| self.world.entity_at(idx))
            .collect();
        for flyer in flyers {
            if let (Some(body), Some(path)) =
                (self.world.bodies.get_mut(flyer), self.world.flights.get_mut(flyer))
            {
                update_flight(body, path, delta_secs);
            }
        }
    }

    // =========================================================================
    // Collision handlers
    // =========================================================================

    /// Kill the player and schedule the respawn. Does nothing while already dying.
    pub fn handle_player_death<H: Host>(&mut self, host: &mut H) {
        let player = self.player;
        let Some((body, controller)) = self.world.player_parts_mut(player) else {
            return;
        };
        if controller.is_dying {
            return;
        }

        controller.begin_death(body);
        info!(x = body.position.x, y = body.position.y, "player died");
        SoundEffect::PlayerDeath.play_on(host);
        self.scheduler.schedule(
            self.clock_ms + self.config.respawn_delay_ms,
            ScheduledAction::Respawn { player },
        );
    }

    /// Launch the player off a pad unless it is cooling down.
    pub fn handle_pad_boost<H: Host>(&mut self, pad: Entity, host: &mut H) {
        if !self.world.is_alive(pad) {
            return;
        }
        match self.world.pads.get(pad) {
            Some(state) if !state.cooldown => {}
            _ => return,
        }
        let Some((body, controller)) = self.world.player_parts_mut(self.player) else {
            return;
        };

        body.velocity.y = self.config.pad_boost_velocity;
        controller.reset_jumps();
        controller.trigger_boost_hair(self.config.boost_hair_ms);
        SoundEffect::PadBoost.play_on(host);

        if let Some(state) = self.world.pads.get_mut(pad) {
            state.cooldown = true;
            state.tinted = true;
        }
        self.scheduler.schedule(
            self.clock_ms + self.config.pad_reset_delay_ms,
            ScheduledAction::ClearPadCooldown { pad },
        );
    }

    /// Take a pickup out of play. Returns false if it was already taken.
    fn take_pickup(&mut self, pickup: Entity) -> bool {
        let Some(body) = self.world.body_mut(pickup) else {
            return false;
        };
        if !body.enabled {
            return false;
        }
        body.enabled = false;
        self.world.despawn(pickup);
        true
    }

    pub fn collect_coin<H: Host>(&mut self, coin: Entity, host: &mut H) {
        if !self.take_pickup(coin) {
            return;
        }

        let awarded = self.score.collect_coin(self.config.coin_value);
        host.update_coins(self.score.coins_collected());

        let at = self.player_position();
        self.floating_texts
            .spawn(at.x, at.y - COIN_TEXT_OFFSET, format!("+{}", awarded));
        SoundEffect::Coin.play_on(host);
    }

    pub fn collect_ring<H: Host>(&mut self, ring: Entity, host: &mut H) {
        if !self.take_pickup(ring) {
            return;
        }

        let outcome = self
            .score
            .collect_ring(self.config.multiplier_step, self.config.max_multiplier);
        host.update_multiplier(self.score.multiplier());

        let at = self.player_position();
        self.floating_texts
            .spawn(at.x, at.y - RING_TEXT_OFFSET, outcome.feedback_text());
        SoundEffect::Ring.play_on(host);
    }

    /// Smashers only kill while shut
    pub fn handle_smasher_collision<H: Host>(&mut self, piece: Entity, host: &mut H) {
        let closed = self
            .world
            .smasher_for(piece)
            .map(|s| s.is_closed())
            .unwrap_or(false);
        if closed {
            self.handle_player_death(host);
        }
    }

    pub fn handle_enemy_hit<H: Host>(&mut self, host: &mut H) {
        SoundEffect::EnemyHit.play_on(host);
        self.handle_player_death(host);
    }

    /// Move where the player comes back after dying
    pub fn set_respawn_point(&mut self, x: f32, y: f32) {
        if let Some(controller) = self.world.players.get_mut(self.player) {
            controller.set_respawn_point(x, y);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn groups(&self) -> &LevelGroups {
        &self.groups
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn player_body(&self) -> Option<&Body> {
        self.world.body(self.player)
    }

    pub fn controller(&self) -> Option<&PlayerController> {
        self.world.players.get(self.player)
    }

    fn player_position(&self) -> Vec2 {
        self.player_body().map(|b| b.position).unwrap_or(Vec2::ZERO)
    }

    pub fn is_player_dying(&self) -> bool {
        self.controller().map(|c| c.is_dying).unwrap_or(false)
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn floating_texts(&self) -> &FloatingTextPool {
        &self.floating_texts
    }

    pub fn camera(&self) -> &CameraFollow {
        &self.camera
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn pending_actions(&self) -> usize {
        self.scheduler.len()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::sinks::recording::{HostCall, RecordingHost};
    use crate::level::{Crawler, Flyer, Platform, Point, Smasher};

    const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Ground across the whole 4800 px world, goal at 4700
    fn flat_level() -> LevelDefinition {
        let mut level = LevelDefinition::empty("flat", 4800.0, 900.0);
        level.goal_x = 4700.0;
        level.platforms.push(Platform { x: 2400.0, y: 500.0, width: 4800.0 });
        level
    }

    fn scene_for(level: LevelDefinition) -> Scene {
        let mut store = LevelStore::new();
        let key = level.key.clone();
        store.register(&key, level);
        Scene::start(&store, &key, GameConfig::default()).unwrap()
    }

    fn run(scene: &mut Scene, host: &mut RecordingHost, frames: usize, input: TickInput) {
        for _ in 0..frames {
            scene.tick(FRAME_MS, input, host);
        }
    }

    #[test]
    fn test_unknown_level_fails_without_scene() {
        let store = LevelStore::new();
        match Scene::start(&store, "nope", GameConfig::default()) {
            Err(LevelError::NotFound { key }) => assert_eq!(key, "nope"),
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("scene built for unknown level"),
        }
    }

    #[test]
    fn test_builtin_level_starts() {
        let store = LevelStore::with_builtin().unwrap();
        let scene = Scene::start(&store, crate::level::DEFAULT_LEVEL_KEY, GameConfig::default()).unwrap();
        assert_eq!(scene.player_body().unwrap().position, Vec2::new(120.0, 450.0));
        assert_eq!(scene.floating_texts().capacity(), 12);
        assert_eq!(scene.groups().smashers.len(), 2);
    }

    #[test]
    fn test_run_to_goal_completes_once() {
        let mut scene = scene_for(flat_level());
        let mut host = RecordingHost::new();

        let mut frames = 0;
        while !scene.is_complete() && frames < 3000 {
            scene.tick(FRAME_MS, TickInput::default(), &mut host);
            frames += 1;
        }
        assert!(scene.is_complete());
        assert!(scene.player_body().unwrap().position.x >= 4700.0);

        let scene_idx = host
            .calls
            .iter()
            .position(|c| matches!(c, HostCall::StartScene(_)))
            .unwrap();
        assert_eq!(host.calls[scene_idx - 1], HostCall::Progress(1.0));
        assert_eq!(host.scenes(), vec!["menu"]);

        let progress = host.progress_updates();
        assert!(progress.windows(2).all(|w| w[0] <= w[1]));
        assert!(progress.iter().all(|p| (0.0..=1.0).contains(p)));

        let calls_before = host.calls.len();
        run(&mut scene, &mut host, 30, TickInput::default());
        assert_eq!(host.calls.len(), calls_before);
    }

    #[test]
    fn test_player_lands_and_runs() {
        let mut scene = scene_for(flat_level());
        let mut host = RecordingHost::new();
        run(&mut scene, &mut host, 60, TickInput::default());

        let body = scene.player_body().unwrap();
        assert!(body.blocked_down);
        assert!((body.velocity.x - 280.0).abs() < 1.0);
        assert!(body.position.x > 300.0);
    }

    #[test]
    fn test_jump_budget_resets_only_on_ground_contact() {
        let mut scene = scene_for(flat_level());
        let mut host = RecordingHost::new();
        run(&mut scene, &mut host, 30, TickInput::default());
        let max = scene.controller().unwrap().max_jumps();
        assert_eq!(scene.controller().unwrap().remaining_jumps(), max);

        // Jump off the ground, then two air jumps
        scene.tick(FRAME_MS, TickInput::held(), &mut host);
        scene.tick(FRAME_MS, TickInput::released(), &mut host);
        scene.tick(FRAME_MS, TickInput::held(), &mut host);
        scene.tick(FRAME_MS, TickInput::released(), &mut host);
        scene.tick(FRAME_MS, TickInput::held(), &mut host);
        let spent = scene.controller().unwrap().remaining_jumps();
        assert!(spent < max);
        assert!(!scene.player_body().unwrap().blocked_down);

        // Airborne ticks without contact leave the budget alone
        run(&mut scene, &mut host, 3, TickInput::released());
        assert_eq!(scene.controller().unwrap().remaining_jumps(), spent);

        // Landing restores it
        run(&mut scene, &mut host, 180, TickInput::default());
        assert!(scene.player_body().unwrap().blocked_down);
        assert_eq!(scene.controller().unwrap().remaining_jumps(), max);
        assert!(host.count_sound("player-jump") >= 3);
    }

    #[test]
    fn test_double_death_schedules_one_respawn() {
        let mut scene = scene_for(flat_level());
        let mut host = RecordingHost::new();
        run(&mut scene, &mut host, 30, TickInput::default());
        scene.set_respawn_point(200.0, 400.0);

        scene.handle_player_death(&mut host);
        scene.handle_player_death(&mut host);
        assert_eq!(host.count_sound("player-death"), 1);
        assert_eq!(scene.pending_actions(), 1);
        assert!(scene.is_player_dying());
        assert_eq!(scene.player_body().unwrap().velocity, Vec2::ZERO);

        // Frozen for the death window
        let frozen_at = scene.player_body().unwrap().position;
        run(&mut scene, &mut host, 20, TickInput::held());
        assert_eq!(scene.player_body().unwrap().position, frozen_at);
        assert!(scene.is_player_dying());

        run(&mut scene, &mut host, 5, TickInput::default());
        assert!(!scene.is_player_dying());
        assert_eq!(scene.pending_actions(), 0);
        let controller = scene.controller().unwrap();
        assert_eq!(controller.remaining_jumps(), controller.max_jumps());
        assert_eq!(controller.boost_hair_ms(), 0.0);
        assert!(!controller.tinted);
        assert_eq!(host.count_sound("player-death"), 1);
    }

    #[test]
    fn test_pad_cooldown_window() {
        let mut level = flat_level();
        level.pads.push(Point::new(3000.0, 475.0));
        let mut scene = scene_for(level);
        let mut host = RecordingHost::new();
        let pad = scene.groups().pads[0];

        scene.handle_pad_boost(pad, &mut host);
        assert_eq!(host.count_sound("pad-boost"), 1);
        assert_eq!(scene.player_body().unwrap().velocity.y, -750.0);
        assert!(scene.world().pads.get(pad).unwrap().tinted);
        assert!(scene.controller().unwrap().boost_hair_ms() > 0.0);

        // 100 ms later: still cooling down
        scene.tick(100.0, TickInput::default(), &mut host);
        scene.handle_pad_boost(pad, &mut host);
        assert_eq!(host.count_sound("pad-boost"), 1);

        // 160 ms after the boost: re-armed at the start of the tick
        scene.tick(60.0, TickInput::default(), &mut host);
        assert!(!scene.world().pads.get(pad).unwrap().cooldown);
        scene.handle_pad_boost(pad, &mut host);
        assert_eq!(host.count_sound("pad-boost"), 2);
    }

    #[test]
    fn test_pad_boost_restores_full_jump_count() {
        let mut level = flat_level();
        level.pads.push(Point::new(3000.0, 475.0));
        let mut scene = scene_for(level);
        let mut host = RecordingHost::new();
        let pad = scene.groups().pads[0];
        run(&mut scene, &mut host, 30, TickInput::default());

        // Leave the ground, then spend air jumps
        scene.tick(FRAME_MS, TickInput::held(), &mut host);
        scene.tick(FRAME_MS, TickInput::released(), &mut host);
        scene.tick(FRAME_MS, TickInput::held(), &mut host);
        scene.tick(FRAME_MS, TickInput::released(), &mut host);
        scene.tick(FRAME_MS, TickInput::held(), &mut host);
        let controller = scene.controller().unwrap();
        assert!(controller.remaining_jumps() < controller.max_jumps());
        assert!(!scene.player_body().unwrap().blocked_down);

        scene.handle_pad_boost(pad, &mut host);
        let controller = scene.controller().unwrap();
        assert_eq!(controller.remaining_jumps(), controller.max_jumps());
    }

    #[test]
    fn test_long_frame_keeps_player_on_ground() {
        let mut scene = scene_for(flat_level());
        let mut host = RecordingHost::new();
        run(&mut scene, &mut host, 30, TickInput::default());
        let rested_y = scene.player_body().unwrap().position.y;

        scene.tick(300.0, TickInput::default(), &mut host);
        scene.tick(2000.0, TickInput::default(), &mut host);

        let body = scene.player_body().unwrap();
        assert!(body.blocked_down);
        assert!((body.position.y - rested_y).abs() < 0.05);
        assert!(!scene.is_player_dying());
        assert_eq!(host.count_sound("player-death"), 0);
    }

    #[test]
    fn test_running_through_coin_collects_it() {
        let mut level = flat_level();
        level.coins.push(Point::new(220.0, 444.0));
        let mut scene = scene_for(level);
        let mut host = RecordingHost::new();
        let coin = scene.groups().coins[0];

        run(&mut scene, &mut host, 40, TickInput::default());

        assert!(!scene.world().is_alive(coin));
        assert_eq!(scene.score().coins_collected(), 10);
        assert_eq!(host.last_coins(), Some(10));
        assert_eq!(host.count_sound("coin"), 1);
    }

    #[test]
    fn test_ring_then_coin_uses_multiplier() {
        let mut level = flat_level();
        level.coins.push(Point::new(3000.0, 200.0));
        level.rings.push(Point::new(3100.0, 200.0));
        level.rings.push(Point::new(3200.0, 200.0));
        let mut scene = scene_for(level);
        let mut host = RecordingHost::new();
        let groups = scene.groups().clone();

        scene.collect_ring(groups.rings[0], &mut host);
        assert_eq!(host.last_multiplier(), Some(1.5));
        scene.collect_coin(groups.coins[0], &mut host);
        assert_eq!(scene.score().coins_collected(), 15);

        // Same pickup twice counts once
        scene.collect_ring(groups.rings[0], &mut host);
        assert_eq!(scene.score().multiplier(), 1.5);
        assert_eq!(host.count_sound("ring"), 1);

        let texts: Vec<&str> = scene.floating_texts().active().map(|t| t.text.as_str()).collect();
        assert!(texts.contains(&"+0.5x"));
        assert!(texts.contains(&"+15"));
    }

    #[test]
    fn test_ring_at_cap_shows_max() {
        let mut level = flat_level();
        for i in 0..10 {
            level.rings.push(Point::new(3000.0 + i as f32 * 50.0, 200.0));
        }
        let mut scene = scene_for(level);
        let mut host = RecordingHost::new();
        let rings = scene.groups().rings.clone();

        for ring in rings {
            scene.collect_ring(ring, &mut host);
            assert!(scene.score().multiplier() <= 5.0);
        }
        assert_eq!(scene.score().multiplier(), 5.0);
        assert!(scene.floating_texts().active().any(|t| t.text == "MAX"));
        // Ten simultaneous callouts fit without error
        assert_eq!(scene.floating_texts().active_count(), 10);
    }

    #[test]
    fn test_smasher_only_kills_when_closed() {
        let mut level = flat_level();
        level.smashers.push(Smasher { x: 4000.0, top_y: 240.0, gap: 160.0 });
        let mut scene = scene_for(level);
        let mut host = RecordingHost::new();
        let state = scene.world().smashers[0];

        scene.handle_smasher_collision(state.top, &mut host);
        assert!(!scene.is_player_dying());

        // 600 ms in: past the 550 ms closing travel
        run(&mut scene, &mut host, 36, TickInput::default());
        let state = scene.world().smashers[0];
        assert!(state.is_closed());
        assert_eq!(scene.world().body(state.top).unwrap().position.y, state.closed_y);

        scene.handle_smasher_collision(state.bottom, &mut host);
        assert!(scene.is_player_dying());
    }

    #[test]
    fn test_spike_contact_kills() {
        let mut level = flat_level();
        level.spikes.push(Point::new(260.0, 468.0));
        let mut scene = scene_for(level);
        let mut host = RecordingHost::new();

        run(&mut scene, &mut host, 40, TickInput::default());
        assert_eq!(host.count_sound("player-death"), 1);
    }

    #[test]
    fn test_enemy_contact_plays_hit_and_kills() {
        let mut level = flat_level();
        level.flyers.push(Flyer { x: 260.0, y: 444.0, amplitude: 0.0, speed: 0.002 });
        let mut scene = scene_for(level);
        let mut host = RecordingHost::new();

        run(&mut scene, &mut host, 40, TickInput::default());
        assert_eq!(host.count_sound("enemy-hit"), 1);
        assert_eq!(host.count_sound("player-death"), 1);
        assert!(scene.is_player_dying());
    }

    #[test]
    fn test_crawler_stays_on_patrol() {
        let mut level = flat_level();
        // Out of the player's reach for the whole run
        level.crawlers.push(Crawler { x: 4300.0, y: 468.0, left: 4200.0, right: 4400.0, speed: 100.0 });
        let mut scene = scene_for(level);
        let mut host = RecordingHost::new();
        let crawler = scene.groups().crawlers[0];

        let slack = 100.0 * FRAME_MS / 1000.0 + 0.01;
        let mut flipped = false;
        for _ in 0..600 {
            scene.tick(FRAME_MS, TickInput::default(), &mut host);
            let body = scene.world().body(crawler).unwrap();
            assert!(body.position.x >= 4200.0 - slack && body.position.x <= 4400.0 + slack);
            flipped |= body.velocity.x < 0.0;
        }
        assert!(flipped);
    }

    #[test]
    fn test_flyer_bobs_around_start() {
        let mut level = flat_level();
        level.flyers.push(Flyer { x: 4000.0, y: 250.0, amplitude: 50.0, speed: 0.003 });
        let mut scene = scene_for(level);
        let mut host = RecordingHost::new();
        let flyer = scene.groups().flyers[0];

        scene.tick(100.0, TickInput::default(), &mut host);
        let y = scene.world().body(flyer).unwrap().position.y;
        assert!((y - (250.0 + 0.3f32.sin() * 50.0)).abs() < 1e-3);
    }

    #[test]
    fn test_falling_out_of_world_kills() {
        let mut level = LevelDefinition::empty("void", 2000.0, 600.0);
        level.goal_x = 1900.0;
        let mut scene = scene_for(level);
        let mut host = RecordingHost::new();

        run(&mut scene, &mut host, 60, TickInput::default());
        assert_eq!(host.count_sound("player-death"), 1);
        assert!(scene.is_player_dying());
    }

    #[test]
    fn test_camera_follows_player() {
        let mut scene = scene_for(flat_level());
        let mut host = RecordingHost::new();
        let start = scene.camera().scroll;
        run(&mut scene, &mut host, 120, TickInput::default());
        assert!(scene.camera().scroll.x > start.x);
    }
}
