//! Pickup interpolation: collected items fly to a camera-relative slot.

use hecs::Entity;
use log::debug;

use shooter_core::components::Item;
use shooter_core::enums::ItemState;
use shooter_core::math::finterp_to;
use shooter_core::types::{Rotator, Transform};

use crate::character::Character;
use crate::context::SimContext;
use crate::systems::{inventory, item};
use crate::timers::TimerKind;

/// Begin flying `target` towards the character.
pub fn start_item_curve(ch: &mut Character, cx: &mut SimContext, target: Entity, force_sound: bool) {
    let Ok((state, is_weapon, interping)) = cx
        .world
        .get::<&Item>(target)
        .map(|it| (it.state(), it.is_weapon(), it.interp.interping))
    else {
        return;
    };
    // Only items lying in the world or still falling can be collected.
    if interping || !matches!(state, ItemState::Pickup | ItemState::Falling) {
        return;
    }

    let slot = inventory::assign_slot(ch, is_weapon);
    inventory::increment_slot_count(ch, slot, 1);
    item::play_pickup_sound(ch, cx, target, force_sound);

    let item_transform = cx
        .world
        .get::<&Transform>(target)
        .map(|t| *t)
        .unwrap_or_default();
    let camera_yaw = ch.camera_transform(cx.world).rotation.yaw;

    if let Ok(mut it) = cx.world.get::<&mut Item>(target) {
        it.interp.interping = true;
        it.interp.start_location = item_transform.location;
        it.interp.slot = slot;
        it.interp.yaw_offset = item_transform.rotation.yaw - camera_yaw;
        it.set_state(ItemState::EquipInterping);
        it.can_change_custom_depth = false;
        if let Some(w) = it.weapon_mut() {
            w.falling = false;
        }
        debug!("{} interping to slot {}", it.name, slot);
    }

    // A weapon caught mid-throw must not settle back into Pickup.
    cx.cancel(target, TimerKind::ThrowWeapon);
    cx.cancel(target, TimerKind::Pulse);
    let duration = cx.config.items.z_curve_time;
    cx.arm(target, TimerKind::ItemInterp, duration);
}

/// Advance every interping item one frame.
pub fn run(ch: &Character, cx: &mut SimContext, dt: f32) {
    let camera = ch.camera_transform(cx.world);
    let tuning = &cx.config.items;

    let interping: Vec<(Entity, usize, glam::Vec3, f32)> = cx
        .world
        .query::<&Item>()
        .iter()
        .filter(|(_, it)| it.interp.interping)
        .map(|(e, it)| (e, it.interp.slot, it.interp.start_location, it.interp.yaw_offset))
        .collect();

    for (entity, slot, start, yaw_offset) in interping {
        let Some(elapsed) = cx.timers.elapsed(crate::timers::TimerKey::new(
            entity,
            TimerKind::ItemInterp,
        )) else {
            continue;
        };
        let elapsed = elapsed as f32;
        let Some(target) = ch.interp_location_world(cx.world, slot) else {
            continue;
        };
        let curve_value = tuning.z_curve.eval(elapsed);
        let delta_z = (target.z - start.z).abs();

        if let Ok(mut transform) = cx.world.get::<&mut Transform>(entity) {
            let mut location = transform.location;
            location.x = finterp_to(location.x, target.x, dt, tuning.interp_speed);
            location.y = finterp_to(location.y, target.y, dt, tuning.interp_speed);
            location.z = start.z + curve_value * delta_z;
            transform.location = location;
            transform.rotation = Rotator::new(0.0, camera.rotation.yaw + yaw_offset, 0.0);
            if let Some(scale_curve) = &tuning.scale_curve {
                transform.scale = scale_curve.eval(elapsed);
            }
        }
    }
}

/// Interpolation timer expired: restore cosmetics and hand the item over.
pub fn finish_interping(ch: &mut Character, cx: &mut SimContext, target: Entity) {
    let Ok(slot) = cx.world.get::<&mut Item>(target).map(|mut it| {
        it.interp.interping = false;
        it.can_change_custom_depth = true;
        it.disable_custom_depth();
        it.interp.slot
    }) else {
        return;
    };
    if let Ok(mut transform) = cx.world.get::<&mut Transform>(target) {
        transform.scale = 1.0;
    }
    item::disable_glow_material(cx.world, target);

    inventory::increment_slot_count(ch, slot, -1);
    inventory::get_pickup_item(ch, cx, target);
}
