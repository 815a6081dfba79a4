//! Arcade Physics
//!
//! A small axis-separated physics step that stands in for an arcade engine:
//! gravity integration, velocity caps, pushing movers out of solid
//! rectangles, and overlap reporting for everything the player touches.
//!
//! The step knows nothing about gameplay. It only emits `ContactEvent`s;
//! the scene decides what a contact means.
//!
//! Movers are resolved one axis at a time (x then y). The x pass only
//! handles overlaps that are shallower horizontally than vertically, so a
//! body running across two adjacent platforms never catches on the seam and
//! a body spawned slightly inside the ground is lifted out, not shoved sideways.
//!
//! A frame is integrated in slices no longer than one baseline frame, so a
//! long frame cannot carry a body through a 32 px platform.

use super::components::{Aabb, Body, Kind, Shape};
use super::entity::Entity;
use super::event::{ContactEvent, Events};
use super::world::World;
use crate::math::Vec2;

/// Overlap below this depth counts as touching, not penetrating
const CONTACT_SLOP: f32 = 0.01;

/// Slice length used when none is configured (one 60 Hz frame)
pub const DEFAULT_MAX_STEP_SECS: f32 = 1.0 / 60.0;

/// A long frame is integrated as at most this many slices; the rest is dropped
pub const MAX_SUBSTEPS: u32 = 4;

/// A physics backend the scene can step.
pub trait PhysicsEngine {
    /// Advance every enabled body by `dt_secs` and report player contacts.
    fn step(&mut self, world: &mut World, dt_secs: f32, events: &mut Events);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcadePhysics {
    /// Downward acceleration in px/s²
    pub gravity: f32,
    /// Longest slice integrated in one pass
    pub max_step_secs: f32,
}

impl ArcadePhysics {
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            max_step_secs: DEFAULT_MAX_STEP_SECS,
        }
    }

    pub fn with_max_step(mut self, secs: f32) -> Self {
        if secs > 0.0 {
            self.max_step_secs = secs;
        }
        self
    }

    /// Slice count and length for a frame of `dt_secs`.
    ///
    /// Frames longer than `MAX_SUBSTEPS` slices (tab suspension, a debugger
    /// pause) are cut short so nothing moves far enough to skip a collider.
    pub fn substeps(&self, dt_secs: f32) -> (u32, f32) {
        // Tolerance keeps an exact baseline frame at one slice
        let wanted = (dt_secs / self.max_step_secs - 1e-4).ceil();
        let steps = (wanted.max(1.0) as u32).min(MAX_SUBSTEPS);
        let slice = (dt_secs / steps as f32).min(self.max_step_secs);
        (steps, slice)
    }

    fn substep(&self, world: &mut World, dt: f32, events: &mut Events, reported: &mut Vec<(Entity, Entity)>) {
        let mut solids = Vec::new();
        let mut movers = Vec::new();
        for (idx, body) in world.bodies.iter() {
            let Some(entity) = world.entity_at(idx) else { continue };
            let Some(kind) = world.kind(entity) else { continue };
            if !body.enabled {
                continue;
            }
            if body.solid {
                solids.push(Solid { entity, kind, aabb: body.aabb() });
            }
            if !body.is_static {
                movers.push((entity, kind));
            }
        }

        for (entity, kind) in movers {
            let Some(body) = world.body_mut(entity) else { continue };
            integrate(body, self.gravity, dt);
            let hits = move_and_collide(body, kind, &solids, dt);

            if kind == Kind::Player {
                for (other, other_kind) in hits {
                    report_once(events, reported, entity, other, other_kind);
                }
            }
        }

        report_overlaps(world, events, reported);
    }
}

/// Send a contact unless this pair was already reported this frame
fn report_once(
    events: &mut Events,
    reported: &mut Vec<(Entity, Entity)>,
    player: Entity,
    other: Entity,
    kind: Kind,
) {
    if reported.contains(&(player, other)) {
        return;
    }
    reported.push((player, other));
    events.contacts.send(ContactEvent { player, other, kind });
}

/// Snapshot of a collider that movers are pushed out of
#[derive(Debug, Clone, Copy)]
struct Solid {
    entity: Entity,
    kind: Kind,
    aabb: Aabb,
}

/// Which solids stop which movers
fn blocks(mover: Kind, solid: Kind) -> bool {
    match mover {
        Kind::Player => matches!(solid, Kind::Platform | Kind::SmasherPiece),
        Kind::Crawler => solid == Kind::Platform,
        _ => false,
    }
}

/// Kinds the player is told about on plain overlap
fn reports_overlap(kind: Kind) -> bool {
    matches!(
        kind,
        Kind::Pad | Kind::Coin | Kind::Ring | Kind::Spike | Kind::Crawler | Kind::Flyer
    )
}

/// Penetration depth on each axis, if both exceed the slop
fn penetration(a: &Aabb, b: &Aabb) -> Option<Vec2> {
    let x = a.max.x.min(b.max.x) - a.min.x.max(b.min.x);
    let y = a.max.y.min(b.max.y) - a.min.y.max(b.min.y);
    if x > CONTACT_SLOP && y > CONTACT_SLOP {
        Some(Vec2::new(x, y))
    } else {
        None
    }
}

/// Shape-accurate overlap test between two bodies
pub fn bodies_overlap(a: &Body, b: &Body) -> bool {
    let (ca, cb) = (a.collider_center(), b.collider_center());
    match (a.shape, b.shape) {
        (Shape::Rect { .. }, Shape::Rect { .. }) => a.aabb().overlaps(&b.aabb()),
        (Shape::Circle { radius }, Shape::Rect { .. }) => circle_rect(ca, radius, &b.aabb()),
        (Shape::Rect { .. }, Shape::Circle { radius }) => circle_rect(cb, radius, &a.aabb()),
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            let d = ca - cb;
            d.dot(d) < (ra + rb) * (ra + rb)
        }
    }
}

fn circle_rect(center: Vec2, radius: f32, rect: &Aabb) -> bool {
    let closest = Vec2::new(
        center.x.clamp(rect.min.x, rect.max.x),
        center.y.clamp(rect.min.y, rect.max.y),
    );
    let d = center - closest;
    d.dot(d) < radius * radius
}

/// Apply gravity and the velocity cap.
fn integrate(body: &mut Body, gravity: f32, dt: f32) {
    if body.gravity {
        body.velocity.y += gravity * dt;
    }
    if let Some(max) = body.max_velocity {
        body.velocity.x = body.velocity.x.clamp(-max.x, max.x);
        body.velocity.y = body.velocity.y.clamp(-max.y, max.y);
    }
}

/// Move one axis at a time, pushing out of every blocking solid.
/// Returns the solids that were hit.
fn move_and_collide(body: &mut Body, kind: Kind, solids: &[Solid], dt: f32) -> Vec<(Entity, Kind)> {
    let mut hits = Vec::new();
    body.blocked_down = false;

    body.position.x += body.velocity.x * dt;
    for solid in solids.iter().filter(|s| blocks(kind, s.kind)) {
        let aabb = body.aabb();
        // Deeper horizontally than vertically: leave it to the y pass
        match penetration(&aabb, &solid.aabb) {
            Some(depth) if depth.x < depth.y => {}
            _ => continue,
        }
        if aabb.center().x < solid.aabb.center().x {
            body.position.x -= aabb.max.x - solid.aabb.min.x;
        } else {
            body.position.x += solid.aabb.max.x - aabb.min.x;
        }
        // Crawlers bounce off walls, the player just stops
        body.velocity.x = if kind == Kind::Crawler { -body.velocity.x } else { 0.0 };
        hits.push((solid.entity, solid.kind));
    }

    body.position.y += body.velocity.y * dt;
    for solid in solids.iter().filter(|s| blocks(kind, s.kind)) {
        let aabb = body.aabb();
        if penetration(&aabb, &solid.aabb).is_none() {
            continue;
        }
        if aabb.center().y < solid.aabb.center().y {
            body.position.y -= aabb.max.y - solid.aabb.min.y;
            body.velocity.y = body.velocity.y.min(0.0);
            body.blocked_down = true;
        } else {
            body.position.y += solid.aabb.max.y - aabb.min.y;
            body.velocity.y = body.velocity.y.max(0.0);
        }
        hits.push((solid.entity, solid.kind));
    }

    hits
}

impl PhysicsEngine for ArcadePhysics {
    fn step(&mut self, world: &mut World, dt_secs: f32, events: &mut Events) {
        if dt_secs <= 0.0 {
            return;
        }

        let (steps, slice) = self.substeps(dt_secs);
        let mut reported = Vec::new();
        for _ in 0..steps {
            self.substep(world, slice, events, &mut reported);
        }
    }
}

/// Tell every enabled player about the non-solid colliders it overlaps.
fn report_overlaps(world: &World, events: &mut Events, reported: &mut Vec<(Entity, Entity)>) {
    let mut players = Vec::new();
    let mut others = Vec::new();
    for (idx, body) in world.bodies.iter() {
        if !body.enabled {
            continue;
        }
        let Some(entity) = world.entity_at(idx) else { continue };
        match world.kind(entity) {
            Some(Kind::Player) => players.push((entity, *body)),
            Some(kind) if reports_overlap(kind) => others.push((entity, kind, *body)),
            _ => {}
        }
    }

    for (player, player_body) in &players {
        for (other, kind, body) in &others {
            if bodies_overlap(player_body, body) {
                report_once(events, reported, *player, *other, *kind);
            }
        }
    }
}
