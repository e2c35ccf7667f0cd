//! Damage application to enemies and the character.

use glam::Vec3;
use hecs::Entity;
use log::debug;
use rand::Rng;

use shooter_core::components::{Enemy, HitNumber};
use shooter_core::constants::{DEATH_SECTION, HIT_NUMBER_DESTROY_TIME, HIT_REACT_SECTION};
use shooter_core::enums::Montage;
use shooter_core::events::GameEvent;
use shooter_core::types::Transform;
use shooter_enemy::blackboard::Blackboard;
use shooter_enemy::rules;

use crate::character::Character;
use crate::context::{entity_id, SimContext};
use crate::systems::{combat, enemy};
use crate::timers::TimerKind;

/// Damage an enemy and run the follow-ups its rules ask for.
pub fn damage_enemy(cx: &mut SimContext, target: Entity, amount: f32, instigator: Option<Entity>) {
    let stun_roll: f32 = cx.rng.gen_range(0.0..=1.0);
    let Ok((enemy_data, blackboard)) = cx.world.query_one_mut::<(&mut Enemy, &mut Blackboard)>(target)
    else {
        return;
    };
    let outcome = rules::take_damage(
        enemy_data,
        blackboard,
        amount,
        instigator.map(entity_id),
        stun_roll,
    );
    let hit_react_delay = outcome
        .play_hit_react
        .then(|| rules::hit_react_delay(enemy_data, &mut *cx.rng));
    let health_bar_time = enemy_data.health_bar_display_time;
    enemy::flush_blackboard(cx, target);

    let actor = entity_id(target);
    if outcome.died {
        cx.cancel(target, TimerKind::HealthBar);
        cx.cancel(target, TimerKind::AttackWait);
        cx.cancel(target, TimerKind::HitReact);
        cx.emit(GameEvent::HealthBar {
            enemy: actor,
            visible: false,
        });
        cx.emit(GameEvent::StopMovement { enemy: actor });
        cx.emit(GameEvent::PlayMontage {
            actor,
            montage: Montage::EnemyDeath,
            section: DEATH_SECTION.to_string(),
            rate: 1.0,
        });
        return;
    }
    if outcome.show_health_bar {
        cx.emit(GameEvent::HealthBar {
            enemy: actor,
            visible: true,
        });
        cx.arm(target, TimerKind::HealthBar, health_bar_time);
    }
    if let Some(delay) = hit_react_delay {
        cx.emit(GameEvent::PlayMontage {
            actor,
            montage: Montage::EnemyHitReact,
            section: HIT_REACT_SECTION.to_string(),
            rate: 1.0,
        });
        cx.arm(target, TimerKind::HitReact, delay);
    }
    debug!("Enemy {:?} took {} damage (stunned: {})", actor, amount, outcome.stunned);
}

/// Floating damage number above an enemy, removed after a fixed time.
pub fn show_hit_number(cx: &mut SimContext, target: Entity, amount: f32, location: Vec3, headshot: bool) {
    let Ok(id) = cx.world.get::<&mut Enemy>(target).map(|mut e| {
        let id = e.next_hit_number_id;
        e.next_hit_number_id += 1;
        e.hit_numbers.push(HitNumber {
            id,
            damage: amount,
            location,
            headshot,
        });
        id
    }) else {
        return;
    };
    cx.emit(GameEvent::HitNumber {
        enemy: entity_id(target),
        damage: amount,
        location,
        headshot,
    });
    cx.arm(target, TimerKind::HitNumber(id), HIT_NUMBER_DESTROY_TIME);
}

/// Splash damage to the character and every enemy within `radius`.
pub fn radial_damage(
    ch: &mut Character,
    cx: &mut SimContext,
    center: Vec3,
    radius: f32,
    amount: f32,
    source: Entity,
) {
    if ch.location(cx.world).distance(center) <= radius {
        combat::take_damage(ch, cx, amount);
    }
    let victims: Vec<Entity> = cx
        .world
        .query::<(&Transform, &Enemy)>()
        .iter()
        .filter(|(e, (t, _))| *e != source && t.location.distance(center) <= radius)
        .map(|(e, _)| e)
        .collect();
    for victim in victims {
        damage_enemy(cx, victim, amount, Some(ch.body));
    }
}
