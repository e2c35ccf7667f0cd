//! Snapshot system: queries the world and the character and builds a
//! complete GameStateSnapshot.
//!
//! This system is read-only.

use hecs::World;

use shooter_core::components::{Enemy, Glow, Item};
use shooter_core::events::GameEvent;
use shooter_core::state::*;
use shooter_core::types::{SimTime, Transform};

use crate::character::Character;
use crate::context::entity_id;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    ch: &Character,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        character: build_character(world, ch),
        inventory: build_inventory(world, ch),
        items: build_items(world),
        interp_slots: ch.interp_locations.iter().map(|l| l.item_count).collect(),
        enemies: build_enemies(world),
        events,
    }
}

fn build_character(world: &World, ch: &Character) -> CharacterView {
    let equipped_slot = ch
        .equipped_weapon
        .and_then(|w| world.get::<&Item>(w).ok().map(|it| it.slot_index));
    CharacterView {
        location: ch.location(world),
        control_rotation: ch.control_rotation,
        health: ch.health.current,
        max_health: ch.health.max,
        combat_state: ch.combat_state,
        aiming: ch.aiming,
        crouching: ch.crouching,
        in_air: ch.movement.falling,
        equipped_weapon: ch.equipped_weapon.map(entity_id),
        equipped_slot,
        ammo: ch.ammo.clone(),
        crosshair_spread: ch.crosshair.multiplier,
        camera_fov: ch.camera_current_fov,
        base_turn_rate: ch.base_turn_rate,
        base_look_up_rate: ch.base_look_up_rate,
        capsule_half_height: ch.capsule_half_height,
        overlapped_item_count: ch.overlapped_item_count,
        trace_hit_item: ch.trace_hit_item.map(entity_id),
        highlighted_slot: ch.highlighted_slot,
        anim: ch.anim.view(),
    }
}

fn build_inventory(world: &World, ch: &Character) -> Vec<InventorySlotView> {
    ch.inventory
        .iter()
        .enumerate()
        .filter_map(|(slot, &entity)| {
            let item = world.get::<&Item>(entity).ok()?;
            let weapon = item.weapon()?;
            Some(InventorySlotView {
                slot,
                item: entity_id(entity),
                name: item.name.clone(),
                weapon_type: weapon.weapon_type,
                ammo: weapon.ammo(),
                magazine_capacity: weapon.magazine_capacity(),
                state: item.state(),
            })
        })
        .collect()
}

fn build_items(world: &World) -> Vec<ItemView> {
    let mut items: Vec<ItemView> = world
        .query::<(&Item, &Transform, Option<&Glow>)>()
        .iter()
        .map(|(entity, (item, transform, glow))| ItemView {
            id: entity_id(entity),
            name: item.name.clone(),
            is_weapon: item.is_weapon(),
            count: item.count,
            rarity: item.rarity,
            state: item.state(),
            location: transform.location,
            scale: transform.scale,
            interping: item.interp.interping,
            widget_visible: item.widget_visible,
            custom_depth: item.custom_depth,
            glow: glow.cloned(),
        })
        .collect();
    items.sort_by_key(|i| i.id);
    items
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Transform)>()
        .iter()
        .map(|(entity, (enemy, transform))| EnemyView {
            id: entity_id(entity),
            archetype: enemy.archetype,
            location: transform.location,
            health: enemy.health.current,
            max_health: enemy.health.max,
            dying: enemy.dying,
            stunned: enemy.stunned,
            health_bar_visible: enemy.health_bar_visible,
            hit_numbers: enemy.hit_numbers.len(),
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}
