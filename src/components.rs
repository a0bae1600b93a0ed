//! Component data attached to entities.
//!
//! Everything here is plain data. Behavior lives in the systems; the only
//! logic components carry are small constructors and state helpers.

use glam::Vec2;
use serde_json::Value;

/// Position component - world coordinates (grid-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pending displacement for the next resolution cycle.
///
/// Each axis is -1, 0, or 1. The resolver clears this to (0, 0) every cycle
/// whether the move succeeded, converted to an attack, or was blocked.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingMove {
    pub dx: i32,
    pub dy: i32,
}

impl PendingMove {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    pub fn clear(&mut self) {
        self.dx = 0;
        self.dy = 0;
    }
}

/// Display/debug label. Never used for dispatch.
#[derive(Debug, Clone)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Marker component - entity obstructs movement and is a valid melee target
/// cell occupant.
#[derive(Debug, Clone, Copy)]
pub struct BlocksPath;

/// AI persona driving an entity's autonomous displacement choice.
/// Absence of this component is the "no AI" case; it is removed on death.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    /// Wander one cell along a random axis.
    Random,
    /// Pathfind straight at the selected entity and step along the path.
    DumbAttack,
}

/// Health component
#[derive(Debug, Clone, Copy)]
pub struct Health {
    /// May go negative transiently before the death check runs.
    pub hp: i32,
    pub maxhp: i32,
    /// Monotonic: flips false -> true exactly once, never back.
    pub dead: bool,
}

impl Health {
    pub fn new(hp: i32) -> Self {
        Self {
            hp,
            maxhp: hp,
            dead: false,
        }
    }

    pub fn with_max(hp: i32, maxhp: i32) -> Self {
        Self {
            hp,
            maxhp,
            dead: false,
        }
    }
}

/// Attack component - present only on entities that deal damage on collision.
#[derive(Debug, Clone, Copy)]
pub struct Attack {
    /// Non-negative damage dealt per hit.
    pub damage: i32,
}

impl Attack {
    pub fn new(damage: i32) -> Self {
        debug_assert!(damage >= 0, "attack damage must be non-negative");
        Self { damage }
    }
}

/// Sprite component - visual handle plus draw placement.
///
/// `layering` is consumed by the depth sort: higher values render further
/// back (lower on screen), letting flattened corpses draw beneath the living.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub tile_id: u32,
    /// Draw offset in cell units, applied by the render collaborator.
    pub offset: Vec2,
    pub layering: i32,
}

impl Sprite {
    pub fn new(tile_id: u32) -> Self {
        Self {
            tile_id,
            offset: Vec2::ZERO,
            layering: 0,
        }
    }

    pub fn with_layering(tile_id: u32, layering: i32) -> Self {
        Self {
            tile_id,
            offset: Vec2::ZERO,
            layering,
        }
    }
}

/// Death-transition descriptor.
///
/// Applied once when the owner's hp drops to zero or below: the sprite swaps
/// to this visual, blocking is reassigned, and the entity becomes inert.
#[derive(Debug, Clone, Copy)]
pub struct OnDeath {
    /// Replacement visual (corpse tile).
    pub tile_id: u32,
    pub offset: Vec2,
    pub layering: i32,
    /// Whether the corpse still obstructs movement.
    pub block_after_death: bool,
}

impl OnDeath {
    pub fn corpse(tile_id: u32, layering: i32) -> Self {
        Self {
            tile_id,
            offset: Vec2::ZERO,
            layering,
            block_after_death: false,
        }
    }
}

/// Inventory stub. Carried by actors but unused - item mechanics are out of
/// scope for the core.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub items: Vec<u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Opaque per-entity payload stub for scenario-specific data.
#[derive(Debug, Clone)]
pub struct Special(pub Value);
