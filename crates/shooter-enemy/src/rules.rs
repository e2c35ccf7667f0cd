//! Enemy damage, stun, death and attack rules.
//!
//! Pure functions over an `Enemy` and its `Blackboard`. Randomness comes in
//! as an `Rng` or a pre-drawn roll so the simulation keeps every draw on its
//! seeded generator. No ECS dependency.

use glam::Vec3;
use log::debug;
use rand::Rng;

use shooter_core::components::Enemy;
use shooter_core::types::{EntityId, Transform};

use crate::blackboard::{keys, Blackboard};

/// Attack montage sections, one picked at random per attack.
pub const ATTACK_SECTIONS: [&str; 4] = ["AttackLFast", "AttackRFast", "AttackL", "AttackR"];

/// What the simulation must do after an enemy took damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// This hit started the death sequence.
    pub died: bool,
    /// Re-arm the health bar timer.
    pub show_health_bar: bool,
    /// The stun roll succeeded.
    pub stunned: bool,
    /// Play the hit-react montage and start its cooldown.
    pub play_hit_react: bool,
}

/// Spawn-time setup: resolve patrol points to world space and publish them.
pub fn begin_play(
    enemy: &mut Enemy,
    blackboard: &mut Blackboard,
    spawn: &Transform,
    patrol_local: Vec3,
    patrol_local_2: Vec3,
) {
    enemy.patrol_point = spawn.transform_point(patrol_local);
    enemy.patrol_point_2 = spawn.transform_point(patrol_local_2);
    blackboard.set_vector(keys::PATROL_POINT, enemy.patrol_point);
    blackboard.set_vector(keys::PATROL_POINT_2, enemy.patrol_point_2);
    blackboard.set_bool(keys::CAN_ATTACK, true);
}

/// Apply `amount` damage from `instigator`.
///
/// `stun_roll` is a uniform draw in [0, 1]; the enemy staggers when it is at
/// or below the enemy's stun chance.
pub fn take_damage(
    enemy: &mut Enemy,
    blackboard: &mut Blackboard,
    amount: f32,
    instigator: Option<EntityId>,
    stun_roll: f32,
) -> DamageOutcome {
    let mut outcome = DamageOutcome::default();
    blackboard.set_object(keys::TARGET, instigator);

    if enemy.health.apply_damage(amount) {
        outcome.died = die(enemy, blackboard);
    }
    if enemy.dying {
        return outcome;
    }

    enemy.health_bar_visible = true;
    outcome.show_health_bar = true;

    if stun_roll <= enemy.stun_chance {
        outcome.stunned = true;
        if enemy.can_hit_react {
            enemy.can_hit_react = false;
            outcome.play_hit_react = true;
        }
        set_stunned(enemy, blackboard, true);
    }
    outcome
}

/// Start the death sequence. Returns false if it had already started.
pub fn die(enemy: &mut Enemy, blackboard: &mut Blackboard) -> bool {
    if enemy.dying {
        return false;
    }
    enemy.dying = true;
    enemy.health_bar_visible = false;
    enemy.movement_stopped = true;
    enemy.left_weapon_active = false;
    enemy.right_weapon_active = false;
    blackboard.set_bool(keys::DEAD, true);
    debug!("Enemy {:?} died", enemy.archetype);
    true
}

pub fn set_stunned(enemy: &mut Enemy, blackboard: &mut Blackboard, stunned: bool) {
    enemy.stunned = stunned;
    blackboard.set_bool(keys::STUNNED, stunned);
}

/// Hit-react cooldown for this enemy, drawn uniformly from its range.
pub fn hit_react_delay<R: Rng>(enemy: &Enemy, rng: &mut R) -> f64 {
    let (min, max) = enemy.hit_react_time;
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Begin an attack. Returns the montage section, or None if the enemy may
/// not attack right now.
pub fn begin_attack<R: Rng>(
    enemy: &mut Enemy,
    blackboard: &mut Blackboard,
    rng: &mut R,
) -> Option<&'static str> {
    if enemy.dying || !enemy.can_attack {
        return None;
    }
    enemy.can_attack = false;
    blackboard.set_bool(keys::CAN_ATTACK, false);
    Some(ATTACK_SECTIONS[rng.gen_range(0..ATTACK_SECTIONS.len())])
}

pub fn reset_can_attack(enemy: &mut Enemy, blackboard: &mut Blackboard) {
    enemy.can_attack = true;
    blackboard.set_bool(keys::CAN_ATTACK, true);
}

/// The player entered the agro sphere.
pub fn agro(blackboard: &mut Blackboard, target: EntityId) {
    blackboard.set_object(keys::TARGET, Some(target));
}

/// The player entered or left the combat-range sphere.
pub fn set_in_attack_range(enemy: &mut Enemy, blackboard: &mut Blackboard, in_range: bool) {
    enemy.in_attack_range = in_range;
    blackboard.set_bool(keys::IN_ATTACK_RANGE, in_range);
}

/// A melee hit stuns its victim when `roll` is at or below the attacker's stun chance.
pub fn melee_stuns(enemy: &Enemy, roll: f32) -> bool {
    roll <= enemy.stun_chance
}
