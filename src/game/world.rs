//! Game World
//!
//! The World owns everything that exists while a level is being played:
//! - Entity allocation and lifetime tracking
//! - Component storage for every component type
//! - The smasher side-table (hazard state shared by two colliders)
//! - Deferred despawn, so collected pickups can be removed mid-dispatch
//!
//! It is created when a level starts and dropped when the level ends.

use super::component::ComponentStorage;
use super::components::*;
use super::entity::{Entity, EntityAllocator};
use super::player::PlayerController;
use super::smasher::{SmasherState, SmasherTimer};

/// All live level state.
///
/// Components are stored in typed fields; the set of component types is
/// fixed and small.
#[derive(Debug, Default)]
pub struct World {
    entities: EntityAllocator,

    /// Entities queued for despawn at the end of the tick
    despawn_queue: Vec<Entity>,

    // =========================================================================
    // Components
    // =========================================================================

    /// Physical body (every entity has one)
    pub bodies: ComponentStorage<Body>,

    /// What each entity is
    pub kinds: ComponentStorage<Kind>,

    /// Player movement/jump/death state
    pub players: ComponentStorage<PlayerController>,

    /// Boost pad cooldown
    pub pads: ComponentStorage<Pad>,

    /// Link from a smasher collider to its side-table entry
    pub smasher_pieces: ComponentStorage<SmasherPiece>,

    /// Crawler patrol bounds
    pub patrols: ComponentStorage<Patrol>,

    /// Flyer sine path
    pub flights: ComponentStorage<FlightPath>,

    // =========================================================================
    // Side tables
    // =========================================================================

    /// Indexed by `SmasherId`
    pub smashers: Vec<SmasherState>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Entity Management
    // =========================================================================

    /// Spawn an entity with a body and kind tag.
    pub fn spawn_body(&mut self, body: Body, kind: Kind) -> Entity {
        let entity = self.entities.allocate();
        self.bodies.insert(entity, body);
        self.kinds.insert(entity, kind);
        entity
    }

    /// Queue an entity for despawn at the end of the tick.
    pub fn despawn(&mut self, entity: Entity) {
        if self.is_alive(entity) && !self.despawn_queue.contains(&entity) {
            self.despawn_queue.push(entity);
        }
    }

    /// Immediately free an entity and drop all its components.
    pub fn despawn_immediate(&mut self, entity: Entity) {
        if !self.entities.free(entity) {
            return;
        }

        let idx = entity.index();
        self.bodies.clear_slot(idx);
        self.kinds.clear_slot(idx);
        self.players.clear_slot(idx);
        self.pads.clear_slot(idx);
        self.smasher_pieces.clear_slot(idx);
        self.patrols.clear_slot(idx);
        self.flights.clear_slot(idx);
    }

    /// Process all queued despawns.
    pub fn flush_despawns(&mut self) {
        let queue = std::mem::take(&mut self.despawn_queue);
        for entity in queue {
            self.despawn_immediate(entity);
        }
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> u32 {
        self.entities.alive_count()
    }

    /// Live entity in a component slot, for turning storage iteration back into ids
    pub fn entity_at(&self, index: u32) -> Option<Entity> {
        self.entities.current(index)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Body of a live entity
    pub fn body(&self, entity: Entity) -> Option<&Body> {
        if !self.is_alive(entity) {
            return None;
        }
        self.bodies.get(entity)
    }

    pub fn body_mut(&mut self, entity: Entity) -> Option<&mut Body> {
        if !self.is_alive(entity) {
            return None;
        }
        self.bodies.get_mut(entity)
    }

    pub fn kind(&self, entity: Entity) -> Option<Kind> {
        if !self.is_alive(entity) {
            return None;
        }
        self.kinds.get(entity).copied()
    }

    /// Body and controller of a live player, borrowed together
    pub fn player_parts_mut(&mut self, player: Entity) -> Option<(&mut Body, &mut PlayerController)> {
        if !self.is_alive(player) {
            return None;
        }
        let body = self.bodies.get_mut(player)?;
        let controller = self.players.get_mut(player)?;
        Some((body, controller))
    }

    /// Hazard state behind a smasher collider
    pub fn smasher_for(&self, piece: Entity) -> Option<&SmasherState> {
        let link = self.smasher_pieces.get(piece)?;
        self.smashers.get(link.smasher.0)
    }

    // =========================================================================
    // Convenience Spawners
    // =========================================================================

    pub fn spawn_player(&mut self, body: Body, controller: PlayerController) -> Entity {
        let entity = self.spawn_body(body, Kind::Player);
        self.players.insert(entity, controller);
        entity
    }

    pub fn spawn_pad(&mut self, body: Body) -> Entity {
        let entity = self.spawn_body(body, Kind::Pad);
        self.pads.insert(entity, Pad::default());
        entity
    }

    pub fn spawn_crawler(&mut self, body: Body, patrol: Patrol) -> Entity {
        let entity = self.spawn_body(body, Kind::Crawler);
        self.patrols.insert(entity, patrol);
        entity
    }

    pub fn spawn_flyer(&mut self, body: Body, path: FlightPath) -> Entity {
        let entity = self.spawn_body(body, Kind::Flyer);
        self.flights.insert(entity, path);
        entity
    }

    /// Spawn both colliders of a smasher and their shared side-table entry.
    pub fn spawn_smasher(
        &mut self,
        top: Body,
        bottom: Body,
        timer: SmasherTimer,
        closed_y: f32,
    ) -> SmasherId {
        let id = SmasherId(self.smashers.len());
        let open_y = top.position.y;

        let top_entity = self.spawn_body(top, Kind::SmasherPiece);
        self.smasher_pieces.insert(top_entity, SmasherPiece { smasher: id, role: PieceRole::Top });
        let bottom_entity = self.spawn_body(bottom, Kind::SmasherPiece);
        self.smasher_pieces.insert(bottom_entity, SmasherPiece { smasher: id, role: PieceRole::Bottom });

        self.smashers.push(SmasherState {
            id,
            top: top_entity,
            bottom: bottom_entity,
            timer,
            open_y,
            closed_y,
        });
        id
    }
}
