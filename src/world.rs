//! World registry: the explicit context object every system receives.
//!
//! Wraps the hecs entity store with two *ordered* registries. `active`
//! entities are ticked by the resolver and AI; `inert` props never act but
//! still participate in spatial queries (floors, walls, corpses). Order
//! matters: spatial queries scan in registry order, and the depth sort
//! reorders `active` to define render order.

use hecs::Entity;

use crate::components::{BlocksPath, Health, Persona, Position};

/// Result of a cell scan.
#[derive(Debug, Clone, Default)]
pub struct CellQuery {
    /// True if any entity at the cell carries [`BlocksPath`].
    pub blocked: bool,
    /// Every entity found at the cell, in scan order (active first, then
    /// inert, each in registry order).
    pub found: Vec<Entity>,
}

pub struct GameWorld {
    pub ecs: hecs::World,
    /// Ticked entities, in registry order. Reordered by the depth sort.
    pub active: Vec<Entity>,
    /// Non-ticking props. Appended to on death; never reordered.
    pub inert: Vec<Entity>,
    /// The player-controlled entity. Unset only before map generation.
    pub selected: Option<Entity>,
    /// Map bounds, used to size AI obstruction grids.
    pub width: i32,
    pub height: i32,
}

impl GameWorld {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            ecs: hecs::World::new(),
            active: Vec::new(),
            inert: Vec::new(),
            selected: None,
            width,
            height,
        }
    }

    /// Spawn an entity into the active registry.
    pub fn spawn_active(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        let entity = self.ecs.spawn(components);
        self.active.push(entity);
        entity
    }

    /// Spawn an entity into the inert (prop) registry.
    pub fn spawn_prop(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        let entity = self.ecs.spawn(components);
        self.inert.push(entity);
        entity
    }

    /// Scan for entities occupying (x, y).
    ///
    /// Scans `active` first and then `inert`, each in registry order,
    /// accumulating every match into `found`. `break_on_block` stops the
    /// scan of the *current* registry once a blocking match is found -
    /// callers that need the full match set for combat must leave it off.
    ///
    /// Pure read of world state, O(N) over both registries. Out-of-bounds
    /// coordinates are not an error; they simply match nothing.
    pub fn query_at(
        &self,
        x: i32,
        y: i32,
        include_active: bool,
        include_props: bool,
        break_on_block: bool,
    ) -> CellQuery {
        let mut result = CellQuery::default();

        let registries = [
            (include_active, &self.active),
            (include_props, &self.inert),
        ];
        for (include, registry) in registries {
            if !include {
                continue;
            }
            for &entity in registry {
                let Ok(pos) = self.ecs.get::<&Position>(entity) else {
                    continue;
                };
                if pos.x != x || pos.y != y {
                    continue;
                }
                drop(pos);
                result.found.push(entity);
                if self.ecs.get::<&BlocksPath>(entity).is_ok() {
                    result.blocked = true;
                    if break_on_block {
                        break;
                    }
                }
            }
        }

        result
    }

    /// Relocate an entity from the active registry to the inert one.
    /// Used by the death transition; the entity is never despawned.
    pub fn demote(&mut self, entity: Entity) {
        if let Some(index) = self.active.iter().position(|&e| e == entity) {
            self.active.remove(index);
            self.inert.push(entity);
        }
    }

    pub fn position_of(&self, entity: Entity) -> Option<(i32, i32)> {
        self.ecs.get::<&Position>(entity).ok().map(|p| (p.x, p.y))
    }

    /// Check if an entity has died. Entities without Health never die.
    pub fn is_dead(&self, entity: Entity) -> bool {
        self.ecs
            .get::<&Health>(entity)
            .map(|h| h.dead)
            .unwrap_or(false)
    }

    /// Registry invariant check used by tests and debug assertions: dead
    /// entities are inert and persona-free.
    pub fn dead_entities_are_inert(&self) -> bool {
        self.active.iter().all(|&e| !self.is_dead(e))
            && self
                .inert
                .iter()
                .filter(|&&e| self.is_dead(e))
                .all(|&e| self.ecs.get::<&Persona>(e).is_err())
    }
}
