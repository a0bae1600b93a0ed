//! Game event queue for decoupled communication between systems.
//!
//! The resolver emits events; the particle system and logging consume them
//! at the end of the frame. This keeps combat resolution free of any
//! knowledge of visual feedback.

use hecs::Entity;

/// Events emitted during a resolution cycle.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A blocked move converted into a melee hit.
    AttackHit {
        attacker: Entity,
        target: Entity,
        /// Grid cell of the target, where hit sparks spawn.
        target_pos: (i32, i32),
        damage: i32,
    },
    /// An entity's death transition ran; it is now inert scenery.
    EntityDied { entity: Entity, position: (i32, i32) },
    /// An entity moved to a new cell.
    EntityMoved {
        entity: Entity,
        from: (i32, i32),
        to: (i32, i32),
    },
}

/// Simple event queue - events are pushed during resolution, drained at end
/// of frame.
#[derive(Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
