//! Item state setter, glow material and pickup/equip sounds.

use hecs::{Entity, World};
use log::debug;

use shooter_core::components::{Glow, Item};
use shooter_core::config::ItemTuning;
use shooter_core::enums::ItemState;
use shooter_core::events::GameEvent;
use shooter_core::types::Transform;

use crate::character::Character;
use crate::context::SimContext;
use crate::timers::{TimerKey, TimerKind, Timers};

/// Change an item's state. The full property row is reapplied every call.
pub fn set_item_state(world: &mut World, item: Entity, state: ItemState) {
    if let Ok(mut it) = world.get::<&mut Item>(item) {
        if it.state() != state {
            debug!("Item {} {:?} -> {:?}", it.name, it.state(), state);
        }
        it.set_state(state);
    }
}

pub fn item_state(world: &World, item: Entity) -> Option<ItemState> {
    world.get::<&Item>(item).ok().map(|it| it.state())
}

/// Arm the idle pulse. Only items lying in the world pulse.
pub fn start_pulse_timer(cx: &mut SimContext, item: Entity) {
    if item_state(cx.world, item) == Some(ItemState::Pickup) {
        let period = cx.config.items.pulse_curve_time;
        cx.arm(item, TimerKind::Pulse, period);
    }
}

pub fn enable_glow_material(world: &mut World, item: Entity) {
    if let Ok(mut glow) = world.get::<&mut Glow>(item) {
        glow.glow_blend_alpha = 0.0;
    }
}

pub fn disable_glow_material(world: &mut World, item: Entity) {
    if let Ok(mut glow) = world.get::<&mut Glow>(item) {
        glow.glow_blend_alpha = 1.0;
    }
}

/// Write the pulse curves into every item's glow parameters.
pub fn run_pulse(world: &mut World, timers: &Timers, tuning: &ItemTuning) {
    for (entity, (item, glow)) in world.query_mut::<(&Item, &mut Glow)>() {
        if !glow.enabled {
            continue;
        }
        let curve_value = match item.state() {
            ItemState::Pickup => {
                let elapsed = timers
                    .elapsed(TimerKey::new(entity, TimerKind::Pulse))
                    .unwrap_or(0.0);
                tuning.pulse_curve.eval(elapsed as f32)
            }
            ItemState::EquipInterping => {
                let elapsed = timers
                    .elapsed(TimerKey::new(entity, TimerKind::ItemInterp))
                    .unwrap_or(0.0);
                tuning.interp_pulse_curve.eval(elapsed as f32)
            }
            _ => glam::Vec3::ZERO,
        };
        glow.glow_amount = curve_value.x * shooter_core::constants::GLOW_AMOUNT;
        glow.fresnel_exponent = curve_value.y * shooter_core::constants::FRESNEL_EXPONENT;
        glow.fresnel_reflect_fraction =
            curve_value.z * shooter_core::constants::FRESNEL_REFLECT_FRACTION;
    }
}

fn emit_item_sound(cx: &mut SimContext, item: Entity, pickup: bool) {
    let Ok(it) = cx.world.get::<&Item>(item) else {
        return;
    };
    let cue = if pickup {
        it.pickup_sound.clone()
    } else {
        it.equip_sound.clone()
    };
    drop(it);
    let location = cx.world.get::<&Transform>(item).ok().map(|t| t.location);
    if let Some(cue) = cue {
        cx.emit(GameEvent::PlaySound { cue, location });
    }
}

/// Play the pickup sound, rate-limited by the character unless forced.
pub fn play_pickup_sound(ch: &mut Character, cx: &mut SimContext, item: Entity, force: bool) {
    if force {
        emit_item_sound(cx, item, true);
    } else if ch.should_play_pickup_sound {
        ch.should_play_pickup_sound = false;
        cx.arm(
            ch.body,
            TimerKind::PickupSound,
            shooter_core::constants::PICKUP_SOUND_RESET_TIME,
        );
        emit_item_sound(cx, item, true);
    }
}

/// Play the equip sound, rate-limited by the character unless forced.
pub fn play_equip_sound(ch: &mut Character, cx: &mut SimContext, item: Entity, force: bool) {
    if force {
        emit_item_sound(cx, item, false);
    } else if ch.should_play_equip_sound {
        ch.should_play_equip_sound = false;
        cx.arm(
            ch.body,
            TimerKind::EquipSound,
            shooter_core::constants::EQUIP_SOUND_RESET_TIME,
        );
        emit_item_sound(cx, item, false);
    }
}
