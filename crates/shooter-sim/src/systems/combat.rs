//! Combat state machine: fire, reload, equip, stun, aim.
//!
//! Every finish callback bails out while the character is stunned; only
//! `end_stun` leaves that state.

use hecs::Entity;
use log::{debug, info};

use shooter_core::components::{Item, Weapon};
use shooter_core::config::CharacterTuning;
use shooter_core::constants::*;
use shooter_core::enums::{CombatState, Montage, WeaponType};
use shooter_core::events::GameEvent;
use shooter_core::types::Transform;

use crate::character::Character;
use crate::context::{entity_id, SimContext};
use crate::systems::{ballistics, movement, weapon_motion};
use crate::timers::TimerKind;

/// Copy what the caller needs out of the equipped weapon.
fn with_equipped<T>(ch: &Character, cx: &SimContext, f: impl FnOnce(&Weapon) -> T) -> Option<T> {
    let weapon = ch.equipped_weapon?;
    let item = cx.world.get::<&Item>(weapon).ok()?;
    item.weapon().map(f)
}

fn equipped_weapon_mut(cx: &mut SimContext, weapon: Entity, f: impl FnOnce(&mut Weapon)) {
    if let Ok(mut item) = cx.world.get::<&mut Item>(weapon) {
        if let Some(w) = item.weapon_mut() {
            f(w);
        }
    }
}

fn play_montage(ch: &Character, cx: &mut SimContext, montage: Montage, section: &str) {
    cx.emit(GameEvent::PlayMontage {
        actor: entity_id(ch.body),
        montage,
        section: section.to_string(),
        rate: 1.0,
    });
}

pub fn fire_button_pressed(ch: &mut Character, cx: &mut SimContext) {
    ch.fire_button_pressed = true;
    fire_weapon(ch, cx);
}

pub fn fire_button_released(ch: &mut Character) {
    ch.fire_button_pressed = false;
}

/// Fire one round if the character is free and the magazine is not empty.
pub fn fire_weapon(ch: &mut Character, cx: &mut SimContext) {
    let Some(weapon) = ch.equipped_weapon else {
        return;
    };
    if ch.combat_state != CombatState::Unoccupied {
        return;
    }
    let Some((has_ammo, fire_sound, rate, weapon_type)) = with_equipped(ch, cx, |w| {
        (
            w.has_ammo(),
            w.fire_sound.clone(),
            w.auto_fire_rate,
            w.weapon_type,
        )
    }) else {
        return;
    };
    if !has_ammo {
        return;
    }

    if let Some(cue) = fire_sound {
        let location = cx.world.get::<&Transform>(weapon).ok().map(|t| t.location);
        cx.emit(GameEvent::PlaySound { cue, location });
    }
    ballistics::send_bullet(ch, cx);
    play_montage(ch, cx, Montage::HipFire, START_FIRE_SECTION);
    equipped_weapon_mut(cx, weapon, Weapon::decrement_ammo);
    start_fire_timer(ch, cx, rate);
    start_crosshair_bullet_fire(ch, cx);

    if weapon_type == WeaponType::Pistol {
        weapon_motion::start_slide_timer(cx, weapon);
    }
}

fn start_fire_timer(ch: &mut Character, cx: &mut SimContext, rate: f64) {
    // Never overwrite a stun.
    if ch.combat_state != CombatState::Stunned {
        ch.combat_state = CombatState::FiringTimerActive;
    }
    cx.arm(ch.body, TimerKind::AutoFire, rate.max(MIN_AUTO_FIRE_RATE));
}

/// Fire-rate timer expired.
pub fn auto_fire_reset(ch: &mut Character, cx: &mut SimContext) {
    if ch.combat_state == CombatState::Stunned {
        return;
    }
    ch.combat_state = CombatState::Unoccupied;
    let Some((has_ammo, automatic)) = with_equipped(ch, cx, |w| (w.has_ammo(), w.automatic)) else {
        return;
    };
    if has_ammo {
        if ch.fire_button_pressed && automatic {
            fire_weapon(ch, cx);
        }
    } else {
        reload_weapon(ch, cx);
    }
}

fn start_crosshair_bullet_fire(ch: &mut Character, cx: &mut SimContext) {
    ch.firing_bullet = true;
    cx.arm(ch.body, TimerKind::CrosshairShoot, SHOOT_TIME_DURATION);
}

pub fn finish_crosshair_bullet_fire(ch: &mut Character) {
    ch.firing_bullet = false;
}

/// Start a reload when free, the magazine has room and rounds are carried.
pub fn reload_weapon(ch: &mut Character, cx: &mut SimContext) {
    if ch.combat_state != CombatState::Unoccupied {
        return;
    }
    let Some((ammo_type, clip_full, section)) = with_equipped(ch, cx, |w| {
        (w.ammo_type, w.clip_is_full(), w.reload_montage_section.clone())
    }) else {
        return;
    };
    if ch.carried(ammo_type) == 0 || clip_full {
        return;
    }
    if ch.aiming {
        stop_aiming(ch, &cx.config.character);
    }
    ch.combat_state = CombatState::Reloading;
    play_montage(ch, cx, Montage::Reload, &section);
    debug!("Reloading {:?}", ammo_type);
}

/// Reload animation finished: move rounds from the ledger into the magazine.
pub fn finish_reloading(ch: &mut Character, cx: &mut SimContext) {
    if ch.combat_state == CombatState::Stunned {
        return;
    }
    ch.combat_state = CombatState::Unoccupied;
    if ch.aim_button_pressed {
        aim(ch, &cx.config.character);
    }

    let Some(weapon) = ch.equipped_weapon else {
        return;
    };
    let Some((ammo_type, empty_space)) = with_equipped(ch, cx, |w| (w.ammo_type, w.empty_space()))
    else {
        return;
    };
    let carried = ch.carried(ammo_type);
    let amount = carried.min(empty_space);
    equipped_weapon_mut(cx, weapon, |w| w.reload_ammo(amount));
    ch.ammo.insert(ammo_type, carried - amount);
    info!("Reloaded {} rounds, {} {:?} left", amount, carried - amount, ammo_type);
}

/// Equip animation finished.
pub fn finish_equipping(ch: &mut Character, tuning: &CharacterTuning) {
    if ch.combat_state == CombatState::Stunned {
        return;
    }
    ch.combat_state = CombatState::Unoccupied;
    if ch.aim_button_pressed {
        aim(ch, tuning);
    }
}

/// Reload notify: the left hand grabs the magazine.
pub fn grab_clip(ch: &mut Character, cx: &mut SimContext) {
    let Some(weapon) = ch.equipped_weapon else {
        return;
    };
    let Some(bone) = with_equipped(ch, cx, |w| w.clip_bone_name.clone()) else {
        return;
    };
    cx.emit(GameEvent::AttachHandHelper {
        weapon: entity_id(weapon),
        bone: bone.clone(),
    });
    ch.hand_helper_bone = Some(bone);
    equipped_weapon_mut(cx, weapon, |w| w.moving_clip = true);
}

/// Reload notify: the magazine is back in the weapon.
pub fn release_clip(ch: &mut Character, cx: &mut SimContext) {
    let Some(weapon) = ch.equipped_weapon else {
        return;
    };
    equipped_weapon_mut(cx, weapon, |w| w.moving_clip = false);
    if ch.hand_helper_bone.take().is_some() {
        cx.emit(GameEvent::DetachHandHelper {
            weapon: entity_id(weapon),
        });
    }
}

/// Stagger the character. Ignored once health is depleted.
pub fn stun(ch: &mut Character, cx: &mut SimContext) {
    if ch.health.is_depleted() {
        return;
    }
    info!("Character stunned (was {:?})", ch.combat_state);
    ch.combat_state = CombatState::Stunned;
    play_montage(ch, cx, Montage::HitReact, HIT_REACT_SECTION);
}

/// Hit-react animation finished.
pub fn end_stun(ch: &mut Character, tuning: &CharacterTuning) {
    if ch.combat_state != CombatState::Stunned {
        return;
    }
    ch.combat_state = CombatState::Unoccupied;
    if ch.aim_button_pressed {
        aim(ch, tuning);
    }
}

/// Damage the character. Health clamps at zero.
pub fn take_damage(ch: &mut Character, cx: &mut SimContext, amount: f32) {
    let depleted = ch.health.apply_damage(amount);
    cx.emit(GameEvent::CharacterDamaged {
        amount,
        health: ch.health.current,
    });
    if depleted {
        info!("Character health depleted");
    }
}

pub fn aiming_button_pressed(ch: &mut Character, tuning: &CharacterTuning) {
    ch.aim_button_pressed = true;
    if ch.combat_state != CombatState::Reloading
        && ch.combat_state != CombatState::Equipping
        && ch.combat_state != CombatState::Stunned
    {
        aim(ch, tuning);
    }
}

pub fn aiming_button_released(ch: &mut Character, tuning: &CharacterTuning) {
    ch.aim_button_pressed = false;
    stop_aiming(ch, tuning);
}

pub fn aim(ch: &mut Character, tuning: &CharacterTuning) {
    ch.aiming = true;
    ch.movement.max_walk_speed = tuning.crouch_movement_speed;
}

pub fn stop_aiming(ch: &mut Character, tuning: &CharacterTuning) {
    ch.aiming = false;
    if !ch.crouching {
        ch.movement.max_walk_speed = tuning.base_movement_speed;
    }
}

/// Toggle crouch while grounded.
pub fn crouch_button_pressed(ch: &mut Character, tuning: &CharacterTuning) {
    if !ch.movement.falling {
        ch.crouching = !ch.crouching;
    }
    if ch.crouching {
        ch.movement.max_walk_speed = tuning.crouch_movement_speed;
        ch.movement.ground_friction = CROUCH_GROUND_FRICTION;
    } else {
        ch.movement.max_walk_speed = tuning.base_movement_speed;
        ch.movement.ground_friction = BASE_GROUND_FRICTION;
    }
}

/// Jumping out of a crouch only stands up.
pub fn jump(ch: &mut Character, tuning: &CharacterTuning) {
    if ch.crouching {
        ch.crouching = false;
        ch.movement.max_walk_speed = tuning.base_movement_speed;
        ch.movement.ground_friction = BASE_GROUND_FRICTION;
    } else {
        movement::jump(ch);
    }
}
