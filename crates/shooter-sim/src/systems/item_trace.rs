//! Crosshair focus on nearby pickups.

use log::debug;

use shooter_core::components::Item;
use shooter_core::constants::INVENTORY_CAPACITY;
use shooter_core::enums::ItemState;

use crate::character::Character;
use crate::context::SimContext;
use crate::systems::{ballistics, inventory};

/// Track how many item areas the character stands in. Tracing runs only
/// while the count is positive.
pub fn increment_overlapped_item_count(ch: &mut Character, amount: i32) {
    let next = ch.overlapped_item_count as i64 + amount as i64;
    if next <= 0 {
        ch.overlapped_item_count = 0;
        ch.should_trace_for_items = false;
    } else {
        ch.overlapped_item_count = next as u32;
        ch.should_trace_for_items = true;
    }
}

fn unfocus(cx: &mut SimContext, item: hecs::Entity) {
    if let Ok(mut it) = cx.world.get::<&mut Item>(item) {
        it.widget_visible = false;
        it.disable_custom_depth();
    }
}

/// Focus the item under the crosshair and drop focus from last frame's.
pub fn trace_for_items(ch: &mut Character, cx: &mut SimContext) {
    if !ch.should_trace_for_items {
        if let Some(last) = ch.trace_hit_item_last_frame.take() {
            unfocus(cx, last);
        }
        ch.trace_hit_item = None;
        if ch.highlighted_slot.is_some() {
            inventory::unhighlight_inventory_slot(ch, cx);
        }
        return;
    }

    let config = cx.config;
    let (hit, _) = ballistics::trace_under_crosshairs(ch, cx.world, &config.scenario.geometry);
    let focused = hit.actor.and_then(|actor| {
        cx.world
            .get::<&Item>(actor)
            .ok()
            .map(|it| (actor, it.is_weapon(), it.state()))
    });

    match focused {
        Some((_, true, _)) if ch.highlighted_slot.is_none() => {
            inventory::highlight_inventory_slot(ch, cx)
        }
        Some((_, true, _)) => {}
        _ if ch.highlighted_slot.is_some() => inventory::unhighlight_inventory_slot(ch, cx),
        _ => {}
    }

    ch.trace_hit_item = focused
        .filter(|(_, _, state)| *state != ItemState::EquipInterping)
        .map(|(actor, ..)| actor);

    if let Some(item) = ch.trace_hit_item {
        let inventory_full = ch.inventory.len() >= INVENTORY_CAPACITY;
        if let Ok(mut it) = cx.world.get::<&mut Item>(item) {
            it.widget_visible = true;
            it.enable_custom_depth();
            it.inventory_full = inventory_full;
        }
    }

    if let Some(last) = ch.trace_hit_item_last_frame {
        if ch.trace_hit_item != Some(last) {
            unfocus(cx, last);
            debug!("Item focus changed");
        }
    }
    ch.trace_hit_item_last_frame = ch.trace_hit_item;
}
