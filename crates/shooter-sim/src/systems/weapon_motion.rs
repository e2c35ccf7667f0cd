//! Weapon throw, pistol slide and hand following.

use glam::{Quat, Vec3};
use hecs::Entity;
use log::debug;

use shooter_core::components::Item;
use shooter_core::constants::{THROW_ROLL_DEGREES, THROW_YAW_DEGREES};
use shooter_core::enums::ItemState;
use shooter_core::events::GameEvent;
use shooter_core::types::{Rotator, Transform};

use crate::character::Character;
use crate::context::{entity_id, SimContext};
use crate::systems::item;
use crate::timers::{TimerKey, TimerKind};

/// Impulse direction for a weapon thrown with yaw `mesh_yaw`.
pub fn throw_direction(mesh_yaw: f32) -> Vec3 {
    let mesh_rotation = Rotator::from_yaw(mesh_yaw);
    let forward = mesh_rotation.forward();
    let right = mesh_rotation.right();
    let tilted = Quat::from_axis_angle(forward, THROW_ROLL_DEGREES.to_radians()) * right;
    Quat::from_axis_angle(Vec3::Z, THROW_YAW_DEGREES.to_radians()) * tilted
}

/// Level the weapon and push it away; it settles after the throw time.
pub fn throw_weapon(cx: &mut SimContext, weapon: Entity) {
    let Ok(yaw) = cx.world.get::<&mut Transform>(weapon).map(|mut t| {
        t.rotation = Rotator::from_yaw(t.rotation.yaw);
        t.rotation.yaw
    }) else {
        return;
    };
    let impulse = throw_direction(yaw) * cx.config.weapon_motion.throw_impulse;
    if let Ok(mut it) = cx.world.get::<&mut Item>(weapon) {
        if let Some(w) = it.weapon_mut() {
            w.falling = true;
            w.last_impulse = Some(impulse);
        }
    }
    cx.emit(GameEvent::AddImpulse {
        entity: entity_id(weapon),
        impulse,
    });
    let throw_time = cx.config.weapon_motion.throw_time;
    cx.arm(weapon, TimerKind::ThrowWeapon, throw_time);
    item::enable_glow_material(cx.world, weapon);
    debug!("Weapon thrown with impulse {:?}", impulse);
}

/// Throw timer expired: the weapon becomes a pickup again. Only a weapon
/// still in `Falling` settles.
pub fn stop_falling(cx: &mut SimContext, weapon: Entity) {
    let Ok(mut it) = cx.world.get::<&mut Item>(weapon) else {
        return;
    };
    if it.state() != ItemState::Falling {
        return;
    }
    if let Some(w) = it.weapon_mut() {
        w.falling = false;
    }
    drop(it);
    item::set_item_state(cx.world, weapon, ItemState::Pickup);
    item::start_pulse_timer(cx, weapon);
}

pub fn start_slide_timer(cx: &mut SimContext, weapon: Entity) {
    if let Ok(mut it) = cx.world.get::<&mut Item>(weapon) {
        if let Some(w) = it.weapon_mut() {
            w.moving_slide = true;
        }
    }
    let slide_time = cx.config.weapon_motion.slide_time;
    cx.arm(weapon, TimerKind::Slide, slide_time);
}

pub fn finish_moving_slide(cx: &mut SimContext, weapon: Entity) {
    if let Ok(mut it) = cx.world.get::<&mut Item>(weapon) {
        if let Some(w) = it.weapon_mut() {
            w.moving_slide = false;
            w.slide_displacement = 0.0;
            w.recoil_rotation = 0.0;
        }
    }
}

/// Per-frame weapon update.
pub fn run(ch: &Character, cx: &mut SimContext) {
    if let Some(equipped) = ch.equipped_weapon {
        let hand = ch.hand_socket_transform(cx.world);
        if let Ok(mut t) = cx.world.get::<&mut Transform>(equipped) {
            *t = Transform {
                scale: t.scale,
                ..hand
            };
        }
    }

    let motion = &cx.config.weapon_motion;
    for (entity, (it, t)) in cx.world.query_mut::<(&mut Item, &mut Transform)>() {
        let state = it.state();
        let Some(w) = it.weapon_mut() else {
            continue;
        };
        if state == ItemState::Falling && w.falling {
            t.rotation = Rotator::from_yaw(t.rotation.yaw);
        }
        if w.moving_slide {
            let elapsed = cx
                .timers
                .elapsed(TimerKey::new(entity, TimerKind::Slide))
                .unwrap_or(0.0) as f32;
            let curve_value = motion.slide_curve.eval(elapsed);
            w.slide_displacement = curve_value * motion.max_slide_displacement;
            w.recoil_rotation = curve_value * motion.max_recoil_rotation;
        }
    }
}
