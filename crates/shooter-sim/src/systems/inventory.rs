//! Inventory, interpolation slots and weapon equip/swap.

use hecs::{Entity, World};
use log::{debug, info};

use shooter_core::components::Item;
use shooter_core::constants::{EQUIP_SECTION, INVENTORY_CAPACITY, RIGHT_HAND_SOCKET};
use shooter_core::enums::{CombatState, ItemState, Montage};
use shooter_core::events::GameEvent;
use shooter_core::types::Transform;

use crate::character::Character;
use crate::context::{entity_id, SimContext};
use crate::systems::{combat, item, weapon_motion};

/// Interpolation slot for a newly collected item. Weapons always fly to
/// slot 0; everything else takes the least occupied of slots 1..N, lowest
/// index on ties.
pub fn assign_slot(ch: &Character, is_weapon: bool) -> usize {
    if is_weapon {
        return 0;
    }
    let mut lowest_index = 1;
    let mut lowest_count = u32::MAX;
    for (i, location) in ch.interp_locations.iter().enumerate().skip(1) {
        if location.item_count < lowest_count {
            lowest_index = i;
            lowest_count = location.item_count;
        }
    }
    lowest_index
}

/// Adjust a slot's occupancy by +1 or -1. Anything else is ignored.
pub fn increment_slot_count(ch: &mut Character, index: usize, amount: i32) {
    if amount != 1 && amount != -1 {
        return;
    }
    let Some(location) = ch.interp_locations.get_mut(index) else {
        return;
    };
    if amount == 1 {
        location.item_count += 1;
    } else {
        location.item_count = location.item_count.saturating_sub(1);
    }
}

/// First inventory index without a live weapon, or None when full.
pub fn empty_slot(ch: &Character, world: &World) -> Option<usize> {
    if let Some(hole) = ch.inventory.iter().position(|e| !world.contains(*e)) {
        return Some(hole);
    }
    if ch.inventory.len() < INVENTORY_CAPACITY {
        return Some(ch.inventory.len());
    }
    None
}

pub fn slot_index(world: &World, weapon: Entity) -> Option<usize> {
    world.get::<&Item>(weapon).ok().map(|it| it.slot_index)
}

fn set_slot_index(world: &mut World, weapon: Entity, slot: usize) {
    if let Ok(mut it) = world.get::<&mut Item>(weapon) {
        it.slot_index = slot;
    }
}

pub fn highlight_inventory_slot(ch: &mut Character, cx: &mut SimContext) {
    let slot = empty_slot(ch, cx.world);
    cx.emit(GameEvent::HighlightSlot {
        slot,
        highlighted: true,
    });
    ch.highlighted_slot = slot;
}

pub fn unhighlight_inventory_slot(ch: &mut Character, cx: &mut SimContext) {
    cx.emit(GameEvent::HighlightSlot {
        slot: ch.highlighted_slot,
        highlighted: false,
    });
    ch.highlighted_slot = None;
}

/// An item finished flying to the camera: file it away.
pub fn get_pickup_item(ch: &mut Character, cx: &mut SimContext, picked: Entity) {
    item::play_equip_sound(ch, cx, picked, false);

    let Ok(is_weapon) = cx.world.get::<&Item>(picked).map(|it| it.is_weapon()) else {
        return;
    };
    if is_weapon {
        if ch.inventory.len() < INVENTORY_CAPACITY {
            let slot = ch.inventory.len();
            set_slot_index(cx.world, picked, slot);
            ch.inventory.push(picked);
            item::set_item_state(cx.world, picked, ItemState::PickedUp);
            debug!("Weapon stored in inventory slot {}", slot);
        } else {
            swap_weapon(ch, cx, picked);
        }
    } else {
        pickup_ammo(ch, cx, picked);
    }
}

fn pickup_ammo(ch: &mut Character, cx: &mut SimContext, picked: Entity) {
    let Some((ammo_type, count)) = cx
        .world
        .get::<&Item>(picked)
        .ok()
        .and_then(|it| it.ammo().map(|a| (a.ammo_type, it.count)))
    else {
        return;
    };
    *ch.ammo.entry(ammo_type).or_insert(0) += count;
    info!("Picked up {} rounds of {:?}", count, ammo_type);

    let equipped_is_empty_match = ch
        .equipped_weapon
        .and_then(|w| {
            cx.world
                .get::<&Item>(w)
                .ok()
                .and_then(|it| it.weapon().map(|wp| wp.ammo_type == ammo_type && !wp.has_ammo()))
        })
        .unwrap_or(false);
    if equipped_is_empty_match {
        combat::reload_weapon(ch, cx);
    }

    cx.destroy(picked);
}

/// Attach a weapon to the right hand and make it the equipped weapon.
pub fn equip_weapon(ch: &mut Character, cx: &mut SimContext, weapon: Entity, swapping: bool) {
    let Some(to_slot) = slot_index(cx.world, weapon) else {
        return;
    };
    cx.emit(GameEvent::AttachToSocket {
        item: entity_id(weapon),
        socket: RIGHT_HAND_SOCKET.to_string(),
    });
    let hand = ch.hand_socket_transform(cx.world);
    if let Ok(mut transform) = cx.world.get::<&mut Transform>(weapon) {
        *transform = hand;
    }

    match ch.equipped_weapon {
        None => cx.emit(GameEvent::EquipItem {
            from_slot: None,
            to_slot,
        }),
        Some(current) if !swapping => {
            let from_slot = slot_index(cx.world, current);
            cx.emit(GameEvent::EquipItem { from_slot, to_slot });
        }
        Some(_) => {}
    }

    ch.equipped_weapon = Some(weapon);
    item::set_item_state(cx.world, weapon, ItemState::Equipped);
}

/// Detach the equipped weapon and throw it.
pub fn drop_weapon(ch: &mut Character, cx: &mut SimContext) {
    let Some(weapon) = ch.equipped_weapon else {
        return;
    };
    cx.emit(GameEvent::Detach {
        item: entity_id(weapon),
    });
    item::set_item_state(cx.world, weapon, ItemState::Falling);
    weapon_motion::throw_weapon(cx, weapon);
}

/// Replace the equipped weapon with `new_weapon`, which takes over its slot.
pub fn swap_weapon(ch: &mut Character, cx: &mut SimContext, new_weapon: Entity) {
    if let Some(current) = ch.equipped_weapon {
        if let Some(slot) = slot_index(cx.world, current) {
            if slot < ch.inventory.len() {
                ch.inventory[slot] = new_weapon;
                set_slot_index(cx.world, new_weapon, slot);
            }
        }
    }
    drop_weapon(ch, cx);
    equip_weapon(ch, cx, new_weapon, true);
    ch.trace_hit_item = None;
    ch.trace_hit_item_last_frame = None;
}

/// Switch from the weapon in `current` to the one in `new`.
pub fn exchange_inventory_items(ch: &mut Character, cx: &mut SimContext, current: usize, new: usize) {
    let can_exchange = current != new
        && new < ch.inventory.len()
        && matches!(
            ch.combat_state,
            CombatState::Unoccupied | CombatState::Equipping
        );
    if !can_exchange {
        return;
    }
    let Some(old_weapon) = ch.equipped_weapon else {
        return;
    };
    let new_weapon = ch.inventory[new];
    if !cx.world.contains(new_weapon) {
        return;
    }

    if ch.aiming {
        combat::stop_aiming(ch, &cx.config.character);
    }
    equip_weapon(ch, cx, new_weapon, false);
    item::set_item_state(cx.world, old_weapon, ItemState::PickedUp);
    item::set_item_state(cx.world, new_weapon, ItemState::Equipped);

    ch.combat_state = CombatState::Equipping;
    cx.emit(GameEvent::PlayMontage {
        actor: entity_id(ch.body),
        montage: Montage::Equip,
        section: EQUIP_SECTION.to_string(),
        rate: 1.0,
    });
    item::play_equip_sound(ch, cx, new_weapon, true);
    debug!("Exchanged inventory slot {} for {}", current, new);
}

/// Number-row selection: equip the weapon in `slot` unless it already is.
pub fn inventory_key(ch: &mut Character, cx: &mut SimContext, slot: usize) {
    let Some(current) = ch.equipped_weapon.and_then(|w| slot_index(cx.world, w)) else {
        return;
    };
    if current == slot {
        return;
    }
    exchange_inventory_items(ch, cx, current, slot);
}
