//! Map generation collaborator: walled rooms and data-driven actor spawning.
//!
//! Defining actors as data makes adding new enemy types a matter of writing
//! a new `ActorDef`, not new spawning code.

use hecs::Entity;
use log::info;
use rand::Rng;

use crate::components::{
    Attack, BlocksPath, Health, Inventory, Name, OnDeath, PendingMove, Persona, Position, Sprite,
};
use crate::constants::*;
use crate::world::GameWorld;

/// Definition of an actor type - all the data needed to spawn one.
#[derive(Clone, Copy)]
pub struct ActorDef {
    pub name: &'static str,
    pub tile_id: u32,
    pub hp: i32,
    pub damage: i32,
    pub persona: Option<Persona>,
    /// Corpse visual applied by the death transition.
    pub corpse_tile: u32,
}

impl ActorDef {
    /// Spawn this actor into the active registry at the given cell.
    pub fn spawn(&self, world: &mut GameWorld, x: i32, y: i32) -> Entity {
        let entity = world.spawn_active((
            Position::new(x, y),
            PendingMove::default(),
            Name::new(self.name),
            Sprite::new(self.tile_id),
            Health::new(self.hp),
            Attack::new(self.damage),
            OnDeath::corpse(self.corpse_tile, CORPSE_LAYERING),
            Inventory::new(),
            BlocksPath,
        ));
        if let Some(persona) = self.persona {
            let _ = world.ecs.insert_one(entity, persona);
        }
        entity
    }
}

/// Predefined actor types.
pub mod actors {
    use super::*;

    pub const PLAYER: ActorDef = ActorDef {
        name: "player",
        tile_id: tile_ids::PLAYER,
        hp: PLAYER_HP,
        damage: PLAYER_DAMAGE,
        persona: None,
        corpse_tile: tile_ids::BONES,
    };

    pub const RAT: ActorDef = ActorDef {
        name: "rat",
        tile_id: tile_ids::RAT,
        hp: RAT_HP,
        damage: RAT_DAMAGE,
        persona: Some(Persona::Random),
        corpse_tile: tile_ids::BONES,
    };

    pub const SLIME: ActorDef = ActorDef {
        name: "slime",
        tile_id: tile_ids::SLIME,
        hp: SLIME_HP,
        damage: SLIME_DAMAGE,
        persona: Some(Persona::DumbAttack),
        corpse_tile: tile_ids::BONES,
    };
}

/// Generate an empty walled room: one border of blocking wall props around
/// (width-2) x (height-2) open floor, with the player at (1, 1) as the
/// selected entity.
pub fn generate_empty_room(width: i32, height: i32) -> GameWorld {
    debug_assert!(width >= 3 && height >= 3, "room too small for a border");

    let mut world = GameWorld::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            if border {
                world.spawn_prop((
                    Position::new(x, y),
                    Name::new("wall"),
                    Sprite::new(tile_ids::WALL),
                    BlocksPath,
                ));
            } else {
                world.spawn_prop((
                    Position::new(x, y),
                    Name::new("floor"),
                    Sprite::new(tile_ids::FLOOR),
                ));
            }
        }
    }

    let player = actors::PLAYER.spawn(&mut world, 1, 1);
    world.selected = Some(player);

    info!("generated {width}x{height} room, player at (1, 1)");
    world
}

/// Place `count` copies of an actor def on unoccupied floor cells.
pub fn spawn_enemies(
    world: &mut GameWorld,
    def: &ActorDef,
    count: usize,
    rng: &mut impl Rng,
) -> usize {
    let mut spawned = 0;
    for _ in 0..count {
        let open: Vec<(i32, i32)> = open_cells(world);
        if open.is_empty() {
            break;
        }
        let (x, y) = open[rng.gen_range(0..open.len())];
        def.spawn(world, x, y);
        spawned += 1;
    }
    info!("spawned {spawned} {}(s)", def.name);
    spawned
}

/// Interior cells with no blocking occupant.
fn open_cells(world: &GameWorld) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    for y in 1..world.height - 1 {
        for x in 1..world.width - 1 {
            // Early break is fine here: one blocker disqualifies the cell.
            if !world.query_at(x, y, true, true, true).blocked {
                cells.push((x, y));
            }
        }
    }
    cells
}
