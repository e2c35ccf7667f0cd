//! Enemy commands, timer callbacks and melee strikes.
//!
//! Decision-making lives with the host's behaviour tree; this module applies
//! its actions and publishes blackboard writes as events.

use glam::Vec3;
use hecs::Entity;
use log::{debug, info};
use rand::Rng;

use shooter_core::commands::{EnemyAction, EnemyCommand};
use shooter_core::components::Enemy;
use shooter_core::constants::{BLOOD_PARTICLES, MELEE_IMPACT_SOUND};
use shooter_core::enums::{Montage, WeaponHand};
use shooter_core::events::GameEvent;
use shooter_core::types::Transform;
use shooter_enemy::blackboard::Blackboard;
use shooter_enemy::rules;

use crate::character::{local_offset, Character};
use crate::context::{entity_from_id, entity_id, SimContext};
use crate::systems::combat;
use crate::timers::TimerKind;

/// Sideways offset of each weapon bone from the enemy's centre line.
const WEAPON_SIDE_OFFSET: f32 = 30.0;

/// Publish pending blackboard writes of `target` as events.
pub fn flush_blackboard(cx: &mut SimContext, target: Entity) {
    let writes = match cx.world.get::<&mut Blackboard>(target) {
        Ok(mut bb) => bb.drain_writes(),
        Err(_) => return,
    };
    for (key, value) in writes {
        cx.emit(GameEvent::BlackboardSet {
            enemy: entity_id(target),
            key,
            value,
        });
    }
}

/// World position of the tip of one of an enemy's weapons.
pub fn weapon_tip(transform: &Transform, reach: f32, hand: WeaponHand) -> Vec3 {
    let side = match hand {
        WeaponHand::Left => -WEAPON_SIDE_OFFSET,
        WeaponHand::Right => WEAPON_SIDE_OFFSET,
    };
    let yaw_only = Transform {
        rotation: shooter_core::types::Rotator::from_yaw(transform.rotation.yaw),
        ..*transform
    };
    yaw_only.transform_point(local_offset(Vec3::new(reach, side, 0.0)))
}

pub fn handle_command(cx: &mut SimContext, command: EnemyCommand) {
    let Some(target) = entity_from_id(command.enemy).filter(|e| cx.world.get::<&Enemy>(*e).is_ok())
    else {
        debug!("Enemy command for unknown actor {:?}", command.enemy);
        return;
    };
    match command.action {
        EnemyAction::Attack => attack(cx, target),
        EnemyAction::ActivateWeapon { hand } => set_weapon_active(cx, target, hand, true),
        EnemyAction::DeactivateWeapon { hand } => set_weapon_active(cx, target, hand, false),
        EnemyAction::EndHitReact => {
            if let Ok((e, bb)) = cx.world.query_one_mut::<(&mut Enemy, &mut Blackboard)>(target) {
                rules::set_stunned(e, bb, false);
            }
        }
        EnemyAction::FinishDeath => finish_death(cx, target),
    }
    flush_blackboard(cx, target);
}

fn attack(cx: &mut SimContext, target: Entity) {
    let Ok((e, bb)) = cx.world.query_one_mut::<(&mut Enemy, &mut Blackboard)>(target) else {
        return;
    };
    let Some(section) = rules::begin_attack(e, bb, &mut *cx.rng) else {
        return;
    };
    let wait = e.attack_wait_time;
    cx.emit(GameEvent::PlayMontage {
        actor: entity_id(target),
        montage: Montage::EnemyAttack,
        section: section.to_string(),
        rate: 1.0,
    });
    cx.arm(target, TimerKind::AttackWait, wait);
}

fn set_weapon_active(cx: &mut SimContext, target: Entity, hand: WeaponHand, active: bool) {
    let Ok(mut e) = cx.world.get::<&mut Enemy>(target) else {
        return;
    };
    let active = active && !e.dying;
    match hand {
        WeaponHand::Left => {
            e.left_weapon_active = active;
            e.left_weapon_struck = false;
        }
        WeaponHand::Right => {
            e.right_weapon_active = active;
            e.right_weapon_struck = false;
        }
    }
}

fn finish_death(cx: &mut SimContext, target: Entity) {
    let Ok(death_time) = cx.world.get::<&mut Enemy>(target).map(|mut e| {
        e.animations_paused = true;
        e.death_time
    }) else {
        return;
    };
    cx.emit(GameEvent::PauseAnimations {
        enemy: entity_id(target),
    });
    cx.arm(target, TimerKind::Death, death_time);
}

pub fn hide_health_bar(cx: &mut SimContext, target: Entity) {
    if let Ok(mut e) = cx.world.get::<&mut Enemy>(target) {
        e.health_bar_visible = false;
    } else {
        return;
    }
    cx.emit(GameEvent::HealthBar {
        enemy: entity_id(target),
        visible: false,
    });
}

pub fn reset_hit_react(cx: &mut SimContext, target: Entity) {
    if let Ok(mut e) = cx.world.get::<&mut Enemy>(target) {
        e.can_hit_react = true;
    }
}

pub fn reset_can_attack(cx: &mut SimContext, target: Entity) {
    if let Ok((e, bb)) = cx.world.query_one_mut::<(&mut Enemy, &mut Blackboard)>(target) {
        rules::reset_can_attack(e, bb);
    }
    flush_blackboard(cx, target);
}

pub fn destroy_hit_number(cx: &mut SimContext, target: Entity, id: u32) {
    if let Ok(mut e) = cx.world.get::<&mut Enemy>(target) {
        e.hit_numbers.retain(|h| h.id != id);
    }
}

/// Death linger elapsed.
pub fn destroy_enemy(cx: &mut SimContext, target: Entity) {
    info!("Enemy {:?} removed", entity_id(target));
    cx.destroy(target);
}

/// The player walked into the agro sphere.
pub fn on_agro(cx: &mut SimContext, target: Entity, player: Entity) {
    if let Ok(mut bb) = cx.world.get::<&mut Blackboard>(target) {
        rules::agro(&mut bb, entity_id(player));
    }
    flush_blackboard(cx, target);
}

/// The player entered or left combat range.
pub fn on_combat_range(cx: &mut SimContext, target: Entity, in_range: bool) {
    if let Ok((e, bb)) = cx.world.query_one_mut::<(&mut Enemy, &mut Blackboard)>(target) {
        rules::set_in_attack_range(e, bb, in_range);
    }
    flush_blackboard(cx, target);
}

/// An active weapon overlapped the character. Each activation strikes once.
pub fn weapon_strike(ch: &mut Character, cx: &mut SimContext, target: Entity, hand: WeaponHand) {
    let Ok(mut e) = cx.world.get::<&mut Enemy>(target) else {
        return;
    };
    let (active, struck) = match hand {
        WeaponHand::Left => (e.left_weapon_active, &mut e.left_weapon_struck),
        WeaponHand::Right => (e.right_weapon_active, &mut e.right_weapon_struck),
    };
    if !active || *struck {
        return;
    }
    *struck = true;
    let damage = e.base_damage;
    let reach = e.weapon_reach;
    drop(e);

    let tip = cx
        .world
        .get::<&Transform>(target)
        .map(|t| weapon_tip(&t, reach, hand))
        .unwrap_or_default();
    combat::take_damage(ch, cx, damage);
    cx.emit(GameEvent::PlaySound {
        cue: MELEE_IMPACT_SOUND.to_string(),
        location: Some(ch.location(cx.world)),
    });
    cx.emit(GameEvent::SpawnParticles {
        effect: BLOOD_PARTICLES.to_string(),
        location: tip,
    });

    let roll: f32 = cx.rng.gen_range(0.0..=1.0);
    let stuns = cx
        .world
        .get::<&Enemy>(target)
        .map(|e| rules::melee_stuns(&e, roll))
        .unwrap_or(false);
    if stuns {
        combat::stun(ch, cx);
    }
}
