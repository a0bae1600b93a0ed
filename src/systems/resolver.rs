//! Movement/combat resolution.
//!
//! Consumes every pending displacement in registry order. An unblocked
//! target cell is a move; a blocked one converts the move into a melee hit
//! against every health-carrying occupant. This is where the magic happens -
//! resolution checks the CURRENT world state, not a snapshot, so a target
//! killed earlier in the same cycle is skipped by its `dead` flag.

use hecs::Entity;
use log::debug;

use crate::components::{Attack, BlocksPath, Health, OnDeath, PendingMove, Persona, Position, Sprite};
use crate::events::{EventQueue, GameEvent};
use crate::world::GameWorld;

/// What a resolution cycle did, for the turn machine and depth sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolution {
    /// Any entity changed position; the caller should re-sort `active`.
    pub any_moved: bool,
    /// The selected entity's displacement was consumed by a move or an
    /// attack. A bump into a blocked cell with nothing to hit does not
    /// count as acting.
    pub player_acted: bool,
}

/// Resolve all pending displacements, in active-registry order.
///
/// Every entity's pending displacement is cleared to (0, 0) by the end of
/// the cycle, whatever the outcome.
pub fn resolve_moves(world: &mut GameWorld, events: &mut EventQueue) -> Resolution {
    puffin::profile_function!();

    let mut result = Resolution::default();

    // Deaths relocate entities mid-cycle, so iterate a snapshot of the
    // registry order as it stood when the cycle began.
    let snapshot: Vec<Entity> = world.active.clone();
    for entity in snapshot {
        let Some(pending) = world.ecs.get::<&PendingMove>(entity).ok().map(|p| *p) else {
            continue;
        };
        if pending.is_zero() {
            continue;
        }
        // An entity killed earlier this cycle forfeits its move but still
        // has its displacement cleared.
        if world.is_dead(entity) {
            clear_pending(world, entity);
            continue;
        }
        let Some((x, y)) = world.position_of(entity) else {
            clear_pending(world, entity);
            continue;
        };

        let target_x = x + pending.dx;
        let target_y = y + pending.dy;
        // Full match set, both registries: combat needs every co-located
        // occupant, so no early break.
        let cell = world.query_at(target_x, target_y, true, true, false);

        if !cell.blocked {
            if let Ok(mut pos) = world.ecs.get::<&mut Position>(entity) {
                pos.x = target_x;
                pos.y = target_y;
            }
            events.push(GameEvent::EntityMoved {
                entity,
                from: (x, y),
                to: (target_x, target_y),
            });
            result.any_moved = true;
            if world.selected == Some(entity) {
                result.player_acted = true;
            }
        } else if let Some(damage) = world.ecs.get::<&Attack>(entity).ok().map(|a| a.damage) {
            let mut attacked = false;
            for target in cell.found {
                let Some(hp_after) = apply_damage(world, target, damage) else {
                    continue;
                };
                attacked = true;
                debug!(
                    "attack: {:?} hits {:?} at ({target_x}, {target_y}) for {damage} (hp now {hp_after})",
                    entity, target
                );
                events.push(GameEvent::AttackHit {
                    attacker: entity,
                    target,
                    target_pos: (target_x, target_y),
                    damage,
                });
                if hp_after <= 0 {
                    apply_death(world, target, events);
                }
            }
            if attacked && world.selected == Some(entity) {
                result.player_acted = true;
            }
        }

        clear_pending(world, entity);
    }

    debug_assert!(world.dead_entities_are_inert());
    result
}

fn clear_pending(world: &mut GameWorld, entity: Entity) {
    if let Ok(mut pending) = world.ecs.get::<&mut PendingMove>(entity) {
        pending.clear();
    }
}

/// Subtract damage from a living health carrier. Returns the remaining hp,
/// or None if the target has no Health or is already dead.
fn apply_damage(world: &mut GameWorld, target: Entity, damage: i32) -> Option<i32> {
    let mut health = world.ecs.get::<&mut Health>(target).ok()?;
    if health.dead {
        return None;
    }
    health.hp -= damage;
    Some(health.hp)
}

/// Run the death transition, if the target carries one.
///
/// Swaps the sprite to the corpse visual, reassigns blocking, flips the
/// monotonic `dead` flag, strips the AI persona, and relocates the entity
/// from `active` to `inert`. Without an OnDeath component the target stays
/// active at negative hp.
fn apply_death(world: &mut GameWorld, target: Entity, events: &mut EventQueue) {
    let Some(transition) = world.ecs.get::<&OnDeath>(target).ok().map(|d| *d) else {
        return;
    };

    if let Ok(mut sprite) = world.ecs.get::<&mut Sprite>(target) {
        sprite.tile_id = transition.tile_id;
        sprite.offset = transition.offset;
        sprite.layering = transition.layering;
    }
    if transition.block_after_death {
        let _ = world.ecs.insert_one(target, BlocksPath);
    } else {
        let _ = world.ecs.remove_one::<BlocksPath>(target);
    }
    if let Ok(mut health) = world.ecs.get::<&mut Health>(target) {
        health.dead = true;
    }
    let _ = world.ecs.remove_one::<Persona>(target);

    let position = world.position_of(target).unwrap_or((0, 0));
    world.demote(target);
    debug!("death: {:?} at {:?} is now inert", target, position);
    events.push(GameEvent::EntityDied {
        entity: target,
        position,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Name;
    use crate::constants::tile_ids;

    fn empty_world() -> GameWorld {
        GameWorld::new(16, 16)
    }

    fn spawn_actor(world: &mut GameWorld, x: i32, y: i32, hp: i32, damage: i32) -> Entity {
        world.spawn_active((
            Position::new(x, y),
            PendingMove::default(),
            Sprite::new(tile_ids::RAT),
            Health::new(hp),
            Attack::new(damage),
            OnDeath::corpse(tile_ids::BONES, 2),
            BlocksPath,
            Persona::Random,
        ))
    }

    fn set_move(world: &mut GameWorld, entity: Entity, dx: i32, dy: i32) {
        let mut pending = world.ecs.get::<&mut PendingMove>(entity).unwrap();
        pending.dx = dx;
        pending.dy = dy;
    }

    fn pending_of(world: &GameWorld, entity: Entity) -> (i32, i32) {
        let p = world.ecs.get::<&PendingMove>(entity).unwrap();
        (p.dx, p.dy)
    }

    #[test]
    fn zero_displacement_is_a_no_op() {
        let mut world = empty_world();
        let actor = spawn_actor(&mut world, 4, 4, 10, 1);
        let mut events = EventQueue::new();

        let result = resolve_moves(&mut world, &mut events);

        assert!(!result.any_moved);
        assert_eq!(world.position_of(actor), Some((4, 4)));
        assert!(events.is_empty());
    }

    #[test]
    fn unblocked_move_updates_position_and_clears_pending() {
        let mut world = empty_world();
        let actor = spawn_actor(&mut world, 4, 4, 10, 1);
        set_move(&mut world, actor, 1, -1);
        let mut events = EventQueue::new();

        let result = resolve_moves(&mut world, &mut events);

        assert!(result.any_moved);
        assert_eq!(world.position_of(actor), Some((5, 3)));
        assert_eq!(pending_of(&world, actor), (0, 0));
    }

    #[test]
    fn nonblocking_healthless_occupants_do_not_stop_a_move() {
        let mut world = empty_world();
        world.spawn_prop((Position::new(5, 4), Name::new("floor"), Sprite::new(tile_ids::FLOOR)));
        let actor = spawn_actor(&mut world, 4, 4, 10, 1);
        set_move(&mut world, actor, 1, 0);
        let mut events = EventQueue::new();

        resolve_moves(&mut world, &mut events);

        assert_eq!(world.position_of(actor), Some((5, 4)));
        let hits = events
            .drain()
            .filter(|e| matches!(e, GameEvent::AttackHit { .. }))
            .count();
        assert_eq!(hits, 0);
    }

    #[test]
    fn blocked_move_without_attack_component_just_bumps() {
        let mut world = empty_world();
        let wall = world.spawn_prop((Position::new(5, 4), Name::new("wall"), BlocksPath));
        let actor = world.spawn_active((
            Position::new(4, 4),
            PendingMove::new(1, 0),
            Health::new(10),
            BlocksPath,
        ));
        let mut events = EventQueue::new();

        let result = resolve_moves(&mut world, &mut events);

        assert!(!result.any_moved);
        assert_eq!(world.position_of(actor), Some((4, 4)));
        assert_eq!(pending_of(&world, actor), (0, 0));
        assert!(world.ecs.get::<&BlocksPath>(wall).is_ok());
    }

    #[test]
    fn attack_reduces_hp_by_exact_damage() {
        let mut world = empty_world();
        let attacker = spawn_actor(&mut world, 4, 4, 10, 3);
        let target = spawn_actor(&mut world, 5, 4, 9, 1);
        set_move(&mut world, attacker, 1, 0);
        let mut events = EventQueue::new();

        resolve_moves(&mut world, &mut events);

        let health = world.ecs.get::<&Health>(target).unwrap();
        assert_eq!(health.hp, 6);
        assert!(!health.dead);
        drop(health);
        // Attacker stayed put.
        assert_eq!(world.position_of(attacker), Some((4, 4)));
    }

    #[test]
    fn two_hit_kill_scenario() {
        // Attack 3 vs hp 5: first hit leaves 2 hp and the target active,
        // second hit drives it to -1 and through the death transition.
        let mut world = empty_world();
        let attacker = spawn_actor(&mut world, 4, 4, 10, 3);
        let target = spawn_actor(&mut world, 5, 4, 5, 1);
        let mut events = EventQueue::new();

        set_move(&mut world, attacker, 1, 0);
        resolve_moves(&mut world, &mut events);
        {
            let health = world.ecs.get::<&Health>(target).unwrap();
            assert_eq!(health.hp, 2);
            assert!(!health.dead);
        }
        assert!(world.active.contains(&target));

        set_move(&mut world, attacker, 1, 0);
        resolve_moves(&mut world, &mut events);
        {
            let health = world.ecs.get::<&Health>(target).unwrap();
            assert_eq!(health.hp, -1);
            assert!(health.dead);
        }
        assert!(!world.active.contains(&target));
        assert!(world.inert.contains(&target));
    }

    #[test]
    fn death_transition_rewrites_sprite_blocking_and_persona() {
        let mut world = empty_world();
        let attacker = spawn_actor(&mut world, 4, 4, 10, 99);
        let target = spawn_actor(&mut world, 5, 4, 5, 1);
        set_move(&mut world, attacker, 1, 0);
        let mut events = EventQueue::new();

        resolve_moves(&mut world, &mut events);

        let sprite = world.ecs.get::<&Sprite>(target).unwrap();
        assert_eq!(sprite.tile_id, tile_ids::BONES);
        assert_eq!(sprite.layering, 2);
        drop(sprite);
        // corpse() spawns walkable corpses
        assert!(world.ecs.get::<&BlocksPath>(target).is_err());
        assert!(world.ecs.get::<&Persona>(target).is_err());

        let died = events
            .drain()
            .filter(|e| matches!(e, GameEvent::EntityDied { .. }))
            .count();
        assert_eq!(died, 1);
    }

    #[test]
    fn death_is_idempotent_within_a_cycle() {
        // Two attackers converge on the same victim in one cycle. The
        // second attack finds the victim dead and skips it.
        let mut world = empty_world();
        let first = spawn_actor(&mut world, 4, 4, 10, 99);
        let second = spawn_actor(&mut world, 6, 4, 10, 99);
        let target = spawn_actor(&mut world, 5, 4, 5, 1);
        set_move(&mut world, first, 1, 0);
        set_move(&mut world, second, -1, 0);
        let mut events = EventQueue::new();

        resolve_moves(&mut world, &mut events);

        let hits = events
            .drain()
            .filter(|e| matches!(e, GameEvent::AttackHit { .. }))
            .count();
        assert_eq!(hits, 1);
        let health = world.ecs.get::<&Health>(target).unwrap();
        assert_eq!(health.hp, -94);
        assert!(health.dead);
    }

    #[test]
    fn all_colocated_targets_are_hit() {
        // The victim cell holds a blocker and two separate health carriers;
        // one swing damages both.
        let mut world = empty_world();
        let attacker = spawn_actor(&mut world, 4, 4, 10, 2);
        let rat = world.spawn_active((
            Position::new(5, 4),
            PendingMove::default(),
            Health::new(8),
            BlocksPath,
        ));
        let slime = world.spawn_active((
            Position::new(5, 4),
            PendingMove::default(),
            Health::new(6),
        ));
        set_move(&mut world, attacker, 1, 0);
        let mut events = EventQueue::new();

        resolve_moves(&mut world, &mut events);

        assert_eq!(world.ecs.get::<&Health>(rat).unwrap().hp, 6);
        assert_eq!(world.ecs.get::<&Health>(slime).unwrap().hp, 4);
    }

    #[test]
    fn dead_mover_forfeits_its_displacement() {
        // The victim queued a move before being killed earlier in the same
        // cycle; its displacement is cleared, not executed.
        let mut world = empty_world();
        let attacker = spawn_actor(&mut world, 4, 4, 10, 99);
        let target = spawn_actor(&mut world, 5, 4, 5, 1);
        set_move(&mut world, attacker, 1, 0);
        set_move(&mut world, target, 0, 1);
        let mut events = EventQueue::new();

        resolve_moves(&mut world, &mut events);

        assert_eq!(world.position_of(target), Some((5, 4)));
        assert_eq!(pending_of(&world, target), (0, 0));
    }

    #[test]
    fn player_acted_set_on_move_and_attack_but_not_bump() {
        let mut world = empty_world();
        let player = spawn_actor(&mut world, 4, 4, 10, 3);
        world.selected = Some(player);
        let mut events = EventQueue::new();

        set_move(&mut world, player, 0, 1);
        assert!(resolve_moves(&mut world, &mut events).player_acted);

        // Bare wall: blocked, nothing to hit.
        world.spawn_prop((Position::new(3, 5), Name::new("wall"), BlocksPath));
        set_move(&mut world, player, -1, 0);
        assert!(!resolve_moves(&mut world, &mut events).player_acted);

        // A health carrier behind the block makes it an attack.
        spawn_actor(&mut world, 5, 5, 5, 1);
        set_move(&mut world, player, 1, 0);
        assert!(resolve_moves(&mut world, &mut events).player_acted);
    }
}
