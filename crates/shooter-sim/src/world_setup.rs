//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player body, weapon and ammo pickups, enemies and explosive
//! props with their component bundles.

use glam::Vec3;
use hecs::{Entity, World};

use shooter_core::components::*;
use shooter_core::config::{AmmoSpawn, EnemySpawn, GameConfig};
use shooter_core::constants::*;
use shooter_core::enums::*;
use shooter_core::types::{Rotator, Transform};
use shooter_enemy::blackboard::Blackboard;
use shooter_enemy::{profiles, rules};

use crate::systems::ballistics::{BulletHitCapability, EnemyImpact, ExplosiveHit};

/// Spawn the player's body at the scenario start.
pub fn spawn_player(world: &mut World, config: &GameConfig) -> Entity {
    let scenario = &config.scenario;
    world.spawn((
        PlayerBody,
        Transform {
            location: scenario.player_start,
            rotation: Rotator::from_yaw(scenario.player_yaw),
            scale: 1.0,
        },
    ))
}

/// Spawn a weapon of `weapon_type` configured from the data table.
pub fn spawn_weapon(
    world: &mut World,
    config: &GameConfig,
    weapon_type: WeaponType,
    rarity: ItemRarity,
    transform: Transform,
) -> Entity {
    let row = config.weapons.find_row(weapon_type);
    if row.is_none() {
        log::warn!("No weapon data row for {:?}; using defaults", weapon_type);
    }
    let weapon = Weapon::from_row(weapon_type, row);
    let rarity_row = config.rarities.row(rarity);
    let name = row
        .map(|r| r.item_name.clone())
        .unwrap_or_else(|| "Default".to_string());

    let mut item = Item::new(name, ItemKind::Weapon(weapon), rarity, rarity_row.number_of_stars);
    if let Some(row) = row {
        item.pickup_sound = row.pickup_sound.clone();
        item.equip_sound = row.equip_sound.clone();
    }

    world.spawn((
        item,
        transform,
        Collider::sphere(ITEM_COLLISION_RADIUS),
        Glow::from_rarity(&rarity_row),
    ))
}

/// Spawn an ammo pickup holding `count` rounds.
pub fn spawn_ammo(world: &mut World, config: &GameConfig, spawn: &AmmoSpawn) -> Entity {
    let rarity_row = config.rarities.row(ItemRarity::Common);
    let name = match spawn.ammo_type {
        AmmoType::NineMm => "9mm",
        AmmoType::AssaultRifle => "AR Ammo",
    };
    let mut item = Item::new(
        name,
        ItemKind::Ammo(AmmoPickup {
            ammo_type: spawn.ammo_type,
            collect_sphere_enabled: true,
        }),
        ItemRarity::Common,
        rarity_row.number_of_stars,
    );
    item.count = spawn.count;
    item.pickup_sound = Some("AmmoPickup".to_string());
    item.equip_sound = Some("AmmoEquip".to_string());

    world.spawn((
        item,
        Transform::at(spawn.location),
        Collider::sphere(ITEM_COLLISION_RADIUS),
        Glow::from_rarity(&rarity_row),
    ))
}

/// Spawn an enemy with a body and a head collision shape.
pub fn spawn_enemy(world: &mut World, spawn: &EnemySpawn) -> Entity {
    let transform = Transform {
        location: spawn.location,
        rotation: Rotator::from_yaw(spawn.yaw),
        scale: 1.0,
    };
    let mut enemy = profiles::build_enemy(spawn.archetype, Vec3::ZERO, Vec3::ZERO);
    let mut blackboard = Blackboard::default();
    rules::begin_play(
        &mut enemy,
        &mut blackboard,
        &transform,
        spawn.patrol_point,
        spawn.patrol_point_2,
    );

    let collider = Collider {
        shapes: vec![
            ColliderShape {
                bone: Some(enemy.head_bone.clone()),
                offset: Vec3::new(0.0, 0.0, ENEMY_HEAD_HEIGHT),
                radius: ENEMY_HEAD_RADIUS,
            },
            ColliderShape {
                bone: Some(BODY_BONE.to_string()),
                offset: Vec3::ZERO,
                radius: ENEMY_BODY_RADIUS,
            },
        ],
    };
    let impact = EnemyImpact {
        sound: enemy.impact_sound.clone(),
        particles: enemy.impact_particles.clone(),
    };

    world.spawn((
        enemy,
        blackboard,
        transform,
        collider,
        BulletHitCapability(Box::new(impact)),
    ))
}

/// Spawn an explosive prop.
pub fn spawn_explosive(world: &mut World, location: Vec3) -> Entity {
    let explosive = Explosive::default();
    let hit = ExplosiveHit {
        damage: explosive.damage,
        radius: explosive.radius,
        sound: explosive.impact_sound.clone(),
        particles: explosive.explode_particles.clone(),
    };
    world.spawn((
        explosive,
        Transform::at(location),
        Collider::sphere(EXPLOSIVE_COLLISION_RADIUS),
        BulletHitCapability(Box::new(hit)),
    ))
}

/// Spawn every pickup, enemy and prop of the scenario. Returns the pickups
/// so the caller can start their idle pulse.
pub fn setup_scenario(world: &mut World, config: &GameConfig) -> Vec<Entity> {
    let scenario = &config.scenario;
    let mut pickups = Vec::new();
    for spawn in &scenario.weapons {
        let transform = Transform {
            location: spawn.location,
            rotation: Rotator::from_yaw(spawn.yaw),
            scale: 1.0,
        };
        pickups.push(spawn_weapon(world, config, spawn.weapon_type, spawn.rarity, transform));
    }
    for spawn in &scenario.ammo {
        pickups.push(spawn_ammo(world, config, spawn));
    }
    for spawn in &scenario.enemies {
        spawn_enemy(world, spawn);
    }
    for &location in &scenario.explosives {
        spawn_explosive(world, location);
    }
    pickups
}
