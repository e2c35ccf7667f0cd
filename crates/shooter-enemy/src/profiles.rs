//! Archetype-specific enemy profiles.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use shooter_core::components::{Enemy, Health};
use shooter_core::constants::*;
use shooter_core::enums::EnemyArchetype;

/// Tuning for an enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub max_health: f32,
    /// Probability a hit staggers the enemy (and a melee hit stuns the player).
    pub stun_chance: f32,
    pub base_damage: f32,
    pub attack_wait_time: f64,
    /// Hit-react cooldown range (seconds).
    pub hit_react_time: (f64, f64),
    pub agro_radius: f32,
    pub combat_range: f32,
    pub weapon_reach: f32,
}

/// Get the profile for a given archetype.
pub fn get_profile(archetype: EnemyArchetype) -> EnemyProfile {
    match archetype {
        EnemyArchetype::Grux => EnemyProfile {
            max_health: ENEMY_MAX_HEALTH,
            stun_chance: ENEMY_STUN_CHANCE,
            base_damage: ENEMY_BASE_DAMAGE,
            attack_wait_time: ENEMY_ATTACK_WAIT_TIME,
            hit_react_time: (ENEMY_HIT_REACT_MIN, ENEMY_HIT_REACT_MAX),
            agro_radius: ENEMY_AGRO_RADIUS,
            combat_range: ENEMY_COMBAT_RANGE,
            weapon_reach: ENEMY_WEAPON_REACH,
        },
        EnemyArchetype::GruxElite => EnemyProfile {
            max_health: ENEMY_MAX_HEALTH * 2.5,
            stun_chance: ENEMY_STUN_CHANCE * 0.4,
            base_damage: ENEMY_BASE_DAMAGE * 1.5,
            attack_wait_time: ENEMY_ATTACK_WAIT_TIME * 0.75,
            hit_react_time: (ENEMY_HIT_REACT_MIN * 2.0, ENEMY_HIT_REACT_MAX * 2.0),
            agro_radius: ENEMY_AGRO_RADIUS * 1.5,
            combat_range: ENEMY_COMBAT_RANGE,
            weapon_reach: ENEMY_WEAPON_REACH * 1.2,
        },
    }
}

/// Build a fresh enemy of `archetype`. Patrol points are world-space.
pub fn build_enemy(archetype: EnemyArchetype, patrol_point: Vec3, patrol_point_2: Vec3) -> Enemy {
    let profile = get_profile(archetype);
    Enemy {
        archetype,
        health: Health::new(profile.max_health),
        head_bone: HEAD_BONE.to_string(),
        stun_chance: profile.stun_chance,
        base_damage: profile.base_damage,
        attack_wait_time: profile.attack_wait_time,
        health_bar_display_time: ENEMY_HEALTH_BAR_DISPLAY_TIME,
        hit_react_time: profile.hit_react_time,
        death_time: ENEMY_DEATH_TIME,
        dying: false,
        stunned: false,
        can_hit_react: true,
        can_attack: true,
        in_attack_range: false,
        health_bar_visible: false,
        movement_stopped: false,
        animations_paused: false,
        left_weapon_active: false,
        right_weapon_active: false,
        left_weapon_struck: false,
        right_weapon_struck: false,
        patrol_point,
        patrol_point_2,
        hit_numbers: Vec::new(),
        next_hit_number_id: 0,
        impact_sound: Some("EnemyImpact".to_string()),
        impact_particles: Some(BLOOD_PARTICLES.to_string()),
        agro_radius: profile.agro_radius,
        combat_range: profile.combat_range,
        weapon_reach: profile.weapon_reach,
    }
}
