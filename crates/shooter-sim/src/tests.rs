//! Tests for the engine: combat state machine, inventory, pickups, ballistics and enemies.

use glam::Vec3;
use hecs::Entity;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use shooter_core::commands::{EnemyAction, EnemyCommand, PlayerCommand};
use shooter_core::components::{Enemy, Item};
use shooter_core::config::{AmmoSpawn, EnemySpawn, GameConfig};
use shooter_core::enums::*;
use shooter_core::events::GameEvent;
use shooter_core::state::GameStateSnapshot;
use shooter_core::types::{BlackboardValue, Transform};

use crate::context::entity_id;
use crate::engine::GameEngine;
use crate::systems::{item, item_interp, weapon_motion};
use crate::timers::{TimerKey, TimerKind};
use crate::world_setup;

// ---- Helpers ----

/// Default tuning with an empty level apart from the floor and back wall.
fn bare_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.scenario.weapons.clear();
    config.scenario.ammo.clear();
    config.scenario.enemies.clear();
    config.scenario.explosives.clear();
    config
}

fn started(config: GameConfig) -> GameEngine {
    let mut engine = GameEngine::new(config);
    engine.tick();
    engine
}

/// Run `ticks` fixed steps and collect every event emitted.
fn run_ticks(engine: &mut GameEngine, ticks: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        events.extend(engine.tick().events);
    }
    events
}

fn equipped(engine: &GameEngine) -> Entity {
    engine.character().equipped_weapon.expect("a weapon is equipped")
}

fn magazine(engine: &GameEngine, weapon: Entity) -> u32 {
    let it = engine.world().get::<&Item>(weapon).unwrap();
    it.weapon().unwrap().ammo()
}

fn state_of(engine: &GameEngine, item: Entity) -> ItemState {
    engine.world().get::<&Item>(item).unwrap().state()
}

fn drain_magazine_to(engine: &mut GameEngine, rounds: u32) {
    let weapon = equipped(engine);
    engine.with_context(|_, cx| {
        let mut it = cx.world.get::<&mut Item>(weapon).unwrap();
        let w = it.weapon_mut().unwrap();
        while w.ammo() > rounds {
            w.decrement_ammo();
        }
    });
}

/// Put a weapon straight into the next inventory slot.
fn give_weapon(engine: &mut GameEngine, weapon_type: WeaponType) -> Entity {
    engine.with_context(|ch, cx| {
        let weapon = world_setup::spawn_weapon(
            cx.world,
            cx.config,
            weapon_type,
            ItemRarity::Common,
            Transform::at(Vec3::new(-1000.0, 0.0, 0.0)),
        );
        cx.world.get::<&mut Item>(weapon).unwrap().slot_index = ch.inventory.len();
        item::set_item_state(cx.world, weapon, ItemState::PickedUp);
        ch.inventory.push(weapon);
        weapon
    })
}

fn spawn_enemy_at(engine: &mut GameEngine, location: Vec3, yaw: f32) -> Entity {
    engine.with_context(|_, cx| {
        world_setup::spawn_enemy(
            cx.world,
            &EnemySpawn {
                archetype: EnemyArchetype::Grux,
                location,
                yaw,
                patrol_point: Vec3::ZERO,
                patrol_point_2: Vec3::ZERO,
            },
        )
    })
}

fn enemy_health(engine: &GameEngine, enemy: Entity) -> f32 {
    engine.world().get::<&Enemy>(enemy).unwrap().health.current
}

fn montages(events: &[GameEvent], montage: Montage) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::PlayMontage {
                montage: m, section, ..
            } if *m == montage => Some(section.clone()),
            _ => None,
        })
        .collect()
}

fn sounds(events: &[GameEvent], cue: &str) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::PlaySound { cue: c, .. } if c == cue))
        .count()
}

fn fire_once(engine: &mut GameEngine) -> GameStateSnapshot {
    engine.queue_commands([PlayerCommand::FirePressed, PlayerCommand::FireReleased]);
    engine.tick()
}

// ---- Startup ----

#[test]
fn test_default_weapon_equipped_on_start() {
    let mut engine = GameEngine::new(bare_config());
    let snap = engine.tick();

    assert_eq!(snap.inventory.len(), 1);
    assert_eq!(snap.inventory[0].weapon_type, WeaponType::SubmachineGun);
    assert_eq!(snap.inventory[0].state, ItemState::Equipped);
    assert_eq!(snap.character.equipped_slot, Some(0));
    assert_eq!(snap.character.combat_state, CombatState::Unoccupied);
    assert_eq!(snap.character.ammo[&AmmoType::NineMm], 85);
    assert_eq!(snap.character.ammo[&AmmoType::AssaultRifle], 120);
    assert!(snap.events.contains(&GameEvent::EquipItem {
        from_slot: None,
        to_slot: 0,
    }));
    assert_eq!(snap.interp_slots, vec![0; 7]);
}

#[test]
fn test_scenario_pickups_pulse() {
    let mut engine = GameEngine::new(GameConfig::default());
    let pickups: Vec<Entity> = engine
        .world()
        .query::<&Item>()
        .iter()
        .filter(|(_, it)| it.state() == ItemState::Pickup)
        .map(|(e, _)| e)
        .collect();
    assert_eq!(pickups.len(), 3);

    run_ticks(&mut engine, 330);
    for pickup in pickups {
        assert!(engine
            .timers()
            .is_active(TimerKey::new(pickup, TimerKind::Pulse)));
    }
    assert_eq!(engine.surface_type(), SurfaceType::Concrete);
}

// ---- Reload ----

#[test]
fn test_reload_with_full_magazine_is_noop() {
    let mut engine = started(bare_config());
    engine.queue_command(PlayerCommand::ReloadPressed);
    let snap = engine.tick();

    assert_eq!(snap.character.combat_state, CombatState::Unoccupied);
    assert_eq!(snap.inventory[0].ammo, 30);
    assert_eq!(snap.character.ammo[&AmmoType::NineMm], 85);
    assert!(montages(&snap.events, Montage::Reload).is_empty());
}

#[test]
fn test_reload_empty_magazine_with_few_rounds() {
    let mut engine = started(bare_config());
    drain_magazine_to(&mut engine, 0);
    engine.character_mut().ammo.insert(AmmoType::NineMm, 10);

    engine.queue_command(PlayerCommand::ReloadPressed);
    let snap = engine.tick();
    assert_eq!(snap.character.combat_state, CombatState::Reloading);
    assert_eq!(montages(&snap.events, Montage::Reload), vec!["ReloadSMG"]);

    engine.queue_command(PlayerCommand::FinishReloading);
    let snap = engine.tick();
    assert_eq!(snap.character.combat_state, CombatState::Unoccupied);
    assert_eq!(snap.inventory[0].ammo, 10);
    assert_eq!(snap.character.ammo[&AmmoType::NineMm], 0);
}

#[test]
fn test_reload_partial_magazine() {
    let mut engine = started(bare_config());
    drain_magazine_to(&mut engine, 5);

    engine.queue_commands([PlayerCommand::ReloadPressed, PlayerCommand::FinishReloading]);
    let snap = engine.tick();
    assert_eq!(snap.inventory[0].ammo, 30);
    assert_eq!(snap.character.ammo[&AmmoType::NineMm], 60);
}

#[test]
fn test_reload_conserves_rounds() {
    for (in_mag, carried) in [(0, 0), (0, 7), (12, 100), (29, 1), (3, 27), (0, 30)] {
        let mut engine = started(bare_config());
        drain_magazine_to(&mut engine, in_mag);
        engine.character_mut().ammo.insert(AmmoType::NineMm, carried);

        engine.queue_commands([PlayerCommand::ReloadPressed, PlayerCommand::FinishReloading]);
        let snap = engine.tick();
        let after_mag = snap.inventory[0].ammo;
        let after_carried = snap.character.ammo[&AmmoType::NineMm];
        assert!(after_mag <= 30);
        assert_eq!(after_mag + after_carried, in_mag + carried);
        assert_eq!(after_mag, (in_mag + carried).min(30));
    }
}

#[test]
fn test_reload_without_carried_rounds_does_nothing() {
    let mut engine = started(bare_config());
    drain_magazine_to(&mut engine, 0);
    engine.character_mut().ammo.insert(AmmoType::NineMm, 0);

    engine.queue_command(PlayerCommand::ReloadPressed);
    let snap = engine.tick();
    assert_eq!(snap.character.combat_state, CombatState::Unoccupied);
}

#[test]
fn test_grab_and_release_clip() {
    let mut engine = started(bare_config());
    let weapon = equipped(&engine);
    drain_magazine_to(&mut engine, 0);

    engine.queue_commands([PlayerCommand::ReloadPressed, PlayerCommand::GrabClip]);
    let snap = engine.tick();
    assert!(snap.events.contains(&GameEvent::AttachHandHelper {
        weapon: entity_id(weapon),
        bone: "smg_clip".to_string(),
    }));
    assert!(engine.world().get::<&Item>(weapon).unwrap().weapon().unwrap().moving_clip);

    engine.queue_command(PlayerCommand::ReleaseClip);
    let snap = engine.tick();
    assert!(snap.events.contains(&GameEvent::DetachHandHelper {
        weapon: entity_id(weapon),
    }));
    assert!(!engine.world().get::<&Item>(weapon).unwrap().weapon().unwrap().moving_clip);
}

// ---- Firing ----

#[test]
fn test_hold_fire_empties_magazine_then_reloads() {
    let mut engine = started(bare_config());
    engine.queue_command(PlayerCommand::FirePressed);

    let mut shot_ticks = Vec::new();
    let mut last_ammo = 30;
    let mut reloading = false;
    for tick in 0..300 {
        let snap = engine.tick();
        shot_ticks.extend(
            montages(&snap.events, Montage::HipFire)
                .iter()
                .map(|_| tick),
        );
        let ammo = snap.inventory[0].ammo;
        assert!(ammo <= last_ammo);
        last_ammo = ammo;
        if snap.character.combat_state == CombatState::Reloading {
            reloading = true;
            assert_eq!(ammo, 0);
            break;
        }
    }

    assert!(reloading, "reload should start once the magazine is empty");
    assert_eq!(shot_ticks.len(), 30);
    for pair in shot_ticks.windows(2) {
        let gap = pair[1] - pair[0];
        assert!((5..=7).contains(&gap), "auto-fire gap {} ticks", gap);
    }
}

#[test]
fn test_fire_emits_effects_and_crosshair_flag() {
    let mut engine = started(bare_config());
    let snap = fire_once(&mut engine);

    assert_eq!(snap.character.combat_state, CombatState::FiringTimerActive);
    assert_eq!(snap.inventory[0].ammo, 29);
    assert_eq!(sounds(&snap.events, "SmgFire"), 1);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::SpawnBeam { .. })));
    // The crosshair ray ends on the back wall.
    let impact = snap.events.iter().find_map(|e| match e {
        GameEvent::SpawnParticles { effect, location } if effect == "BulletImpact" => Some(*location),
        _ => None,
    });
    assert!(impact.is_some_and(|l| (l.x - 4000.0).abs() < 1.0));
    assert!(engine.character().firing_bullet);

    run_ticks(&mut engine, 10);
    assert!(!engine.character().firing_bullet);
    assert_eq!(engine.character().combat_state, CombatState::Unoccupied);
}

#[test]
fn test_fire_ignored_while_reloading() {
    let mut engine = started(bare_config());
    drain_magazine_to(&mut engine, 10);
    engine.queue_command(PlayerCommand::ReloadPressed);
    engine.tick();

    let snap = fire_once(&mut engine);
    assert_eq!(snap.inventory[0].ammo, 10);
    assert!(montages(&snap.events, Montage::HipFire).is_empty());
}

#[test]
fn test_pistol_slide_cycles() {
    let mut config = bare_config();
    config.character.default_weapon = WeaponType::Pistol;
    let mut engine = started(config);
    let pistol = equipped(&engine);

    fire_once(&mut engine);
    {
        let it = engine.world().get::<&Item>(pistol).unwrap();
        let w = it.weapon().unwrap();
        assert!(w.moving_slide);
        assert!(w.slide_displacement > 0.0);
    }

    run_ticks(&mut engine, 15);
    let it = engine.world().get::<&Item>(pistol).unwrap();
    let w = it.weapon().unwrap();
    assert!(!w.moving_slide);
    assert_eq!(w.slide_displacement, 0.0);
}

#[test]
fn test_semi_auto_does_not_refire_while_held() {
    let mut config = bare_config();
    config.character.default_weapon = WeaponType::Pistol;
    let mut engine = started(config);

    engine.queue_command(PlayerCommand::FirePressed);
    let events = run_ticks(&mut engine, 60);
    assert_eq!(montages(&events, Montage::HipFire).len(), 1);
}

// ---- Stun ----

#[test]
fn test_stun_during_reload_blocks_finish() {
    let mut engine = started(bare_config());
    drain_magazine_to(&mut engine, 0);
    engine.queue_command(PlayerCommand::ReloadPressed);
    engine.tick();
    assert_eq!(engine.character().combat_state, CombatState::Reloading);

    engine.stun_character();
    engine.queue_command(PlayerCommand::FinishReloading);
    let snap = engine.tick();
    assert_eq!(snap.character.combat_state, CombatState::Stunned);
    assert_eq!(snap.inventory[0].ammo, 0);
    assert_eq!(snap.character.ammo[&AmmoType::NineMm], 85);

    engine.queue_command(PlayerCommand::EndStun);
    let snap = engine.tick();
    assert_eq!(snap.character.combat_state, CombatState::Unoccupied);
}

#[test]
fn test_stun_survives_auto_fire_timer() {
    let mut engine = started(bare_config());
    engine.queue_command(PlayerCommand::FirePressed);
    engine.tick();
    engine.stun_character();

    let events = run_ticks(&mut engine, 30);
    assert_eq!(engine.character().combat_state, CombatState::Stunned);
    assert!(montages(&events, Montage::HipFire).is_empty());

    engine.queue_commands([PlayerCommand::FireReleased, PlayerCommand::EndStun]);
    engine.tick();
    assert_eq!(engine.character().combat_state, CombatState::Unoccupied);
}

#[test]
fn test_stun_survives_finish_equipping() {
    let mut engine = started(bare_config());
    give_weapon(&mut engine, WeaponType::Pistol);
    engine.queue_command(PlayerCommand::InventoryKey { slot: 1 });
    engine.tick();
    assert_eq!(engine.character().combat_state, CombatState::Equipping);

    engine.stun_character();
    engine.queue_command(PlayerCommand::FinishEquipping);
    engine.tick();
    assert_eq!(engine.character().combat_state, CombatState::Stunned);
}

#[test]
fn test_end_stun_only_leaves_stunned() {
    let mut engine = started(bare_config());
    drain_magazine_to(&mut engine, 0);
    engine.queue_commands([PlayerCommand::ReloadPressed, PlayerCommand::EndStun]);
    let snap = engine.tick();
    assert_eq!(snap.character.combat_state, CombatState::Reloading);
}

#[test]
fn test_stun_ignored_when_health_depleted() {
    let mut engine = started(bare_config());
    engine.damage_character(250.0);
    engine.stun_character();
    let snap = engine.tick();
    assert_eq!(snap.character.health, 0.0);
    assert_eq!(snap.character.combat_state, CombatState::Unoccupied);
}

#[test]
fn test_end_stun_resumes_aim_if_held() {
    let mut engine = started(bare_config());
    engine.stun_character();
    engine.queue_command(PlayerCommand::AimPressed);
    engine.tick();
    assert!(!engine.character().aiming);

    engine.queue_command(PlayerCommand::EndStun);
    engine.tick();
    assert!(engine.character().aiming);
}

// ---- Aim, crouch, jump ----

#[test]
fn test_aim_zooms_and_slows() {
    let mut engine = started(bare_config());
    engine.queue_command(PlayerCommand::AimPressed);
    run_ticks(&mut engine, 60);
    let snap = engine.tick();
    assert!(snap.character.aiming);
    assert!((snap.character.camera_fov - 25.0).abs() < 0.5);
    assert_eq!(snap.character.base_turn_rate, 20.0);
    assert_eq!(snap.character.base_look_up_rate, 20.0);
    assert_eq!(engine.character().movement.max_walk_speed, 300.0);

    engine.queue_command(PlayerCommand::AimReleased);
    run_ticks(&mut engine, 60);
    let snap = engine.tick();
    assert!(!snap.character.aiming);
    assert!((snap.character.camera_fov - 90.0).abs() < 0.5);
    assert_eq!(snap.character.base_turn_rate, 90.0);
    assert_eq!(engine.character().movement.max_walk_speed, 650.0);
}

#[test]
fn test_aim_held_through_reload() {
    let mut engine = started(bare_config());
    drain_magazine_to(&mut engine, 0);
    engine.queue_commands([PlayerCommand::ReloadPressed, PlayerCommand::AimPressed]);
    engine.tick();
    assert!(!engine.character().aiming);

    engine.queue_command(PlayerCommand::FinishReloading);
    engine.tick();
    assert!(engine.character().aiming);
}

#[test]
fn test_crouch_then_jump_stands_up() {
    let mut engine = started(bare_config());
    engine.queue_command(PlayerCommand::CrouchPressed);
    run_ticks(&mut engine, 60);
    let snap = engine.tick();
    assert!(snap.character.crouching);
    assert!((snap.character.capsule_half_height - 44.0).abs() < 0.5);
    assert!((snap.character.location.z - 44.0).abs() < 0.5);

    // First jump only stands up.
    engine.queue_command(PlayerCommand::Jump);
    let snap = engine.tick();
    assert!(!snap.character.crouching);
    assert!(!snap.character.in_air);

    engine.queue_command(PlayerCommand::Jump);
    let snap = engine.tick();
    assert!(snap.character.in_air);

    run_ticks(&mut engine, 120);
    let snap = engine.tick();
    assert!(!snap.character.in_air);
    assert!((snap.character.location.z - 88.0).abs() < 0.5);
}

#[test]
fn test_look_pitch_clamped() {
    let mut engine = started(bare_config());
    for _ in 0..10 {
        engine.queue_command(PlayerCommand::LookUp { value: 50.0 });
    }
    let snap = engine.tick();
    assert!(snap.character.control_rotation.pitch.abs() <= 89.0);
}

// ---- Pickups ----

#[test]
fn test_trace_focus_and_select_pickup() {
    let mut engine = started(bare_config());
    let pistol = engine.with_context(|_, cx| {
        world_setup::spawn_weapon(
            cx.world,
            cx.config,
            WeaponType::Pistol,
            ItemRarity::Uncommon,
            Transform::at(Vec3::new(100.0, -50.0, 158.0)),
        )
    });

    let snap = engine.tick();
    assert_eq!(snap.character.overlapped_item_count, 1);
    assert_eq!(snap.character.trace_hit_item, Some(entity_id(pistol)));
    assert_eq!(snap.character.highlighted_slot, Some(1));
    let view = snap.items.iter().find(|i| i.id == entity_id(pistol)).unwrap();
    assert!(view.widget_visible);
    assert!(view.custom_depth);

    // A second press while the first pickup is in flight does nothing.
    engine.queue_commands([PlayerCommand::SelectPressed, PlayerCommand::SelectPressed]);
    let snap = engine.tick();
    assert_eq!(state_of(&engine, pistol), ItemState::EquipInterping);
    assert_eq!(snap.interp_slots.iter().sum::<u32>(), 1);
    assert_eq!(snap.interp_slots[0], 1);
    assert_eq!(sounds(&snap.events, "PistolPickup"), 1);

    let events = run_ticks(&mut engine, 50);
    let snap = engine.tick();
    assert_eq!(snap.inventory.len(), 2);
    assert_eq!(snap.inventory[1].item, entity_id(pistol));
    assert_eq!(snap.inventory[1].state, ItemState::PickedUp);
    assert_eq!(snap.interp_slots.iter().sum::<u32>(), 0);
    assert_eq!(snap.character.highlighted_slot, None);
    assert_eq!(sounds(&events, "PistolEquip"), 1);
    let view = snap.items.iter().find(|i| i.id == entity_id(pistol)).unwrap();
    assert!(!view.interping);
    assert!(!view.custom_depth);
    assert_eq!(view.scale, 1.0);
}

#[test]
fn test_select_without_focus_does_nothing() {
    let mut engine = started(bare_config());
    engine.queue_command(PlayerCommand::SelectPressed);
    let snap = engine.tick();
    assert_eq!(snap.interp_slots.iter().sum::<u32>(), 0);
    assert_eq!(snap.inventory.len(), 1);
}

#[test]
fn test_full_inventory_swaps_equipped_weapon() {
    let mut engine = started(bare_config());
    let old = equipped(&engine);
    for _ in 0..5 {
        give_weapon(&mut engine, WeaponType::Pistol);
    }
    assert_eq!(engine.character().inventory.len(), 6);

    let rifle = engine.with_context(|ch, cx| {
        let rifle = world_setup::spawn_weapon(
            cx.world,
            cx.config,
            WeaponType::AssaultRifle,
            ItemRarity::Rare,
            Transform::at(Vec3::new(100.0, 300.0, 20.0)),
        );
        item_interp::start_item_curve(ch, cx, rifle, true);
        rifle
    });

    let events = run_ticks(&mut engine, 60);
    let ch = engine.character();
    assert_eq!(ch.inventory.len(), 6);
    assert_eq!(ch.inventory[0], rifle);
    assert_eq!(ch.equipped_weapon, Some(rifle));
    assert_eq!(state_of(&engine, rifle), ItemState::Equipped);
    assert_eq!(engine.world().get::<&Item>(rifle).unwrap().slot_index, 0);
    assert!(ch.trace_hit_item.is_none());

    assert_eq!(state_of(&engine, old), ItemState::Falling);
    assert!(engine
        .world()
        .get::<&Item>(old)
        .unwrap()
        .weapon()
        .unwrap()
        .last_impulse
        .is_some());
    assert!(events.iter().any(
        |e| matches!(e, GameEvent::AddImpulse { entity, .. } if *entity == entity_id(old))
    ));
    assert!(events.contains(&GameEvent::Detach {
        item: entity_id(old),
    }));
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::EquipItem { .. })));

    run_ticks(&mut engine, 45);
    assert_eq!(state_of(&engine, old), ItemState::Pickup);
    assert!(engine.timers().is_active(TimerKey::new(old, TimerKind::Pulse)));
}

/// Select `target` as if the crosshair rested on it.
fn select(engine: &mut GameEngine, target: Entity) -> GameStateSnapshot {
    engine.character_mut().trace_hit_item = Some(target);
    engine.queue_command(PlayerCommand::SelectPressed);
    engine.tick()
}

fn assert_interp_slots_balanced(snap: &GameStateSnapshot) {
    let mut interping = 0;
    for view in &snap.items {
        assert_eq!(
            view.interping,
            view.state == ItemState::EquipInterping,
            "item {:?} interping={} in state {:?}",
            view.id,
            view.interping,
            view.state
        );
        interping += u32::from(view.interping);
    }
    assert_eq!(snap.interp_slots.iter().sum::<u32>(), interping);
}

#[test]
fn test_weapon_caught_mid_throw_keeps_slots_balanced() {
    let mut engine = started(bare_config());
    let rifle = engine.with_context(|_, cx| {
        let rifle = world_setup::spawn_weapon(
            cx.world,
            cx.config,
            WeaponType::AssaultRifle,
            ItemRarity::Common,
            Transform::at(Vec3::new(100.0, -50.0, 158.0)),
        );
        item::set_item_state(cx.world, rifle, ItemState::Falling);
        weapon_motion::throw_weapon(cx, rifle);
        rifle
    });
    run_ticks(&mut engine, 20);
    assert_eq!(state_of(&engine, rifle), ItemState::Falling);

    engine.with_context(|ch, cx| item_interp::start_item_curve(ch, cx, rifle, true));
    assert!(!engine
        .timers()
        .is_active(TimerKey::new(rifle, TimerKind::ThrowWeapon)));
    let falling = engine.world().get::<&Item>(rifle).unwrap().weapon().unwrap().falling;
    assert!(!falling);
    assert_eq!(engine.character().interp_occupancy(), 1);

    // Past the throw time: the flight must not be restarted or settled.
    for _ in 0..60 {
        let snap = select(&mut engine, rifle);
        assert_interp_slots_balanced(&snap);
    }

    assert_eq!(engine.character().interp_occupancy(), 0);
    assert_eq!(state_of(&engine, rifle), ItemState::PickedUp);
    assert_eq!(engine.character().inventory, vec![engine.character().inventory[0], rifle]);
    assert!(!engine.timers().is_active(TimerKey::new(rifle, TimerKind::Pulse)));
}

#[test]
fn test_stop_falling_ignores_weapon_no_longer_falling() {
    let mut engine = started(bare_config());
    let pistol = give_weapon(&mut engine, WeaponType::Pistol);
    engine.with_context(|_, cx| weapon_motion::stop_falling(cx, pistol));
    assert_eq!(state_of(&engine, pistol), ItemState::PickedUp);
    assert!(!engine.timers().is_active(TimerKey::new(pistol, TimerKind::Pulse)));
}

#[test]
fn test_swap_cycle_reclaims_thrown_weapons() {
    let mut engine = started(bare_config());
    let smg = equipped(&engine);
    for _ in 0..5 {
        give_weapon(&mut engine, WeaponType::Pistol);
    }
    let rifle = engine.with_context(|_, cx| {
        world_setup::spawn_weapon(
            cx.world,
            cx.config,
            WeaponType::AssaultRifle,
            ItemRarity::Rare,
            Transform::at(Vec3::new(100.0, -50.0, 158.0)),
        )
    });

    // Rifle replaces the SMG, then the SMG is caught mid-throw and replaces
    // the rifle, and so on.
    let mut incoming = rifle;
    let mut outgoing = smg;
    for round in 0..4 {
        let snap = select(&mut engine, incoming);
        assert_interp_slots_balanced(&snap);
        for _ in 0..50 {
            let snap = engine.tick();
            assert_interp_slots_balanced(&snap);
        }
        assert_eq!(engine.character().equipped_weapon, Some(incoming), "round {}", round);
        assert_eq!(engine.character().inventory[0], incoming);
        assert_eq!(engine.character().inventory.len(), 6);
        assert_eq!(state_of(&engine, outgoing), ItemState::Falling);
        assert_eq!(engine.character().interp_occupancy(), 0);
        std::mem::swap(&mut incoming, &mut outgoing);
    }

    // After the last exchange `incoming` names the weapon left falling.
    run_ticks(&mut engine, 45);
    assert_eq!(state_of(&engine, incoming), ItemState::Pickup);
    assert_eq!(engine.character().equipped_weapon, Some(outgoing));
    assert_eq!(engine.character().interp_occupancy(), 0);
}

#[test]
fn test_interp_slots_balance_over_flights() {
    let mut engine = started(bare_config());
    let boxes: Vec<Entity> = engine.with_context(|ch, cx| {
        (0..3)
            .map(|i| {
                let ammo = world_setup::spawn_ammo(
                    cx.world,
                    cx.config,
                    &AmmoSpawn {
                        ammo_type: AmmoType::NineMm,
                        count: 20,
                        location: Vec3::new(400.0, -400.0 + i as f32 * 100.0, 20.0),
                    },
                );
                item_interp::start_item_curve(ch, cx, ammo, false);
                ammo
            })
            .collect()
    });

    let slots: Vec<usize> = boxes
        .iter()
        .map(|b| engine.world().get::<&Item>(*b).unwrap().interp.slot)
        .collect();
    assert_eq!(slots, vec![1, 2, 3]);

    let mut events = Vec::new();
    for _ in 0..60 {
        let snap = engine.tick();
        let interping = snap.items.iter().filter(|i| i.interping).count() as u32;
        assert_eq!(snap.interp_slots.iter().sum::<u32>(), interping);
        events.extend(snap.events);
    }

    assert_eq!(engine.character().interp_occupancy(), 0);
    assert_eq!(engine.character().carried(AmmoType::NineMm), 85 + 60);
    for b in &boxes {
        assert!(!engine.world().contains(*b));
    }
    assert_eq!(sounds(&events, "AmmoPickup"), 1);
    assert_eq!(sounds(&events, "AmmoEquip"), 1);
}

#[test]
fn test_ammo_collected_by_walking_over_it() {
    let mut engine = started(bare_config());
    drain_magazine_to(&mut engine, 0);
    engine.character_mut().ammo.insert(AmmoType::NineMm, 0);
    let ammo = engine.with_context(|_, cx| {
        world_setup::spawn_ammo(
            cx.world,
            cx.config,
            &AmmoSpawn {
                ammo_type: AmmoType::NineMm,
                count: 20,
                location: Vec3::new(0.0, 0.0, 20.0),
            },
        )
    });

    run_ticks(&mut engine, 60);
    assert!(!engine.world().contains(ammo));
    assert_eq!(engine.character().combat_state, CombatState::Reloading);
    assert_eq!(engine.character().carried(AmmoType::NineMm), 20);

    engine.queue_command(PlayerCommand::FinishReloading);
    let snap = engine.tick();
    assert_eq!(snap.inventory[0].ammo, 20);
    assert_eq!(snap.character.ammo[&AmmoType::NineMm], 0);
}

#[test]
fn test_inventory_key_exchanges_weapons() {
    let mut engine = started(bare_config());
    let smg = equipped(&engine);
    let pistol = give_weapon(&mut engine, WeaponType::Pistol);

    engine.queue_command(PlayerCommand::InventoryKey { slot: 1 });
    let snap = engine.tick();
    assert_eq!(snap.character.combat_state, CombatState::Equipping);
    assert_eq!(snap.character.equipped_slot, Some(1));
    assert_eq!(state_of(&engine, pistol), ItemState::Equipped);
    assert_eq!(state_of(&engine, smg), ItemState::PickedUp);
    assert!(snap.events.contains(&GameEvent::EquipItem {
        from_slot: Some(0),
        to_slot: 1,
    }));
    assert_eq!(montages(&snap.events, Montage::Equip), vec!["Equip"]);
    assert_eq!(sounds(&snap.events, "PistolEquip"), 1);

    // Same slot and out-of-range slots are ignored.
    engine.queue_commands([
        PlayerCommand::InventoryKey { slot: 1 },
        PlayerCommand::InventoryKey { slot: 4 },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.character.equipped_slot, Some(1));

    engine.queue_command(PlayerCommand::FinishEquipping);
    let snap = engine.tick();
    assert_eq!(snap.character.combat_state, CombatState::Unoccupied);

    engine.queue_command(PlayerCommand::InventoryKey { slot: 0 });
    let snap = engine.tick();
    assert_eq!(snap.character.equipped_slot, Some(0));
    assert_eq!(state_of(&engine, smg), ItemState::Equipped);
}

#[test]
fn test_inventory_key_ignored_while_reloading() {
    let mut engine = started(bare_config());
    give_weapon(&mut engine, WeaponType::Pistol);
    drain_magazine_to(&mut engine, 0);
    engine.queue_commands([
        PlayerCommand::ReloadPressed,
        PlayerCommand::InventoryKey { slot: 1 },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.character.combat_state, CombatState::Reloading);
    assert_eq!(snap.character.equipped_slot, Some(0));
}

// ---- Ballistics and enemies ----

#[test]
fn test_headshot_uses_headshot_damage() {
    let mut engine = started(bare_config());
    let enemy = spawn_enemy_at(&mut engine, Vec3::new(600.0, -50.0, 88.0), 180.0);

    let snap = fire_once(&mut engine);
    let hit = snap.events.iter().find_map(|e| match e {
        GameEvent::HitNumber {
            enemy: id,
            damage,
            headshot,
            ..
        } if *id == entity_id(enemy) => Some((*damage, *headshot)),
        _ => None,
    });
    assert_eq!(hit, Some((50.0, true)));
    assert_eq!(enemy_health(&engine, enemy), 50.0);
    assert!(snap.events.contains(&GameEvent::HealthBar {
        enemy: entity_id(enemy),
        visible: true,
    }));
}

#[test]
fn test_body_shot_uses_base_damage() {
    let mut engine = started(bare_config());
    let enemy = spawn_enemy_at(&mut engine, Vec3::new(600.0, -50.0, 158.0), 180.0);

    let snap = fire_once(&mut engine);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::HitNumber { damage, headshot: false, .. } if *damage == 20.0
    )));
    assert_eq!(enemy_health(&engine, enemy), 80.0);
    assert_eq!(snap.enemies[0].hit_numbers, 1);

    run_ticks(&mut engine, 100);
    let snap = engine.tick();
    assert_eq!(snap.enemies[0].hit_numbers, 0);
}

#[test]
fn test_enemy_death_is_idempotent() {
    let mut engine = started(bare_config());
    let enemy = spawn_enemy_at(&mut engine, Vec3::new(2000.0, 0.0, 88.0), 180.0);

    engine.damage_enemy(enemy, 150.0);
    engine.damage_enemy(enemy, 150.0);
    let snap = engine.tick();
    assert_eq!(montages(&snap.events, Montage::EnemyDeath).len(), 1);
    assert_eq!(
        snap.events
            .iter()
            .filter(|e| matches!(e, GameEvent::StopMovement { .. }))
            .count(),
        1
    );
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::BlackboardSet { key, value: BlackboardValue::Bool(true), .. } if key == "Dead"
    )));
    assert_eq!(snap.enemies[0].health, 0.0);
    assert!(snap.enemies[0].dying);

    engine.queue_enemy_command(EnemyCommand {
        enemy: entity_id(enemy),
        action: EnemyAction::FinishDeath,
    });
    let events = run_ticks(&mut engine, 60 * 4 + 5);
    assert!(!engine.world().contains(enemy));
    assert!(events.contains(&GameEvent::PauseAnimations {
        enemy: entity_id(enemy),
    }));
    assert!(events.contains(&GameEvent::ActorDestroyed {
        actor: entity_id(enemy),
    }));
}

#[test]
fn test_explosive_damages_nearby_enemy_and_disappears() {
    let mut engine = started(bare_config());
    let barrel = engine.with_context(|_, cx| {
        world_setup::spawn_explosive(cx.world, Vec3::new(600.0, -50.0, 158.0))
    });
    let enemy = spawn_enemy_at(&mut engine, Vec3::new(700.0, 150.0, 158.0), 180.0);

    let snap = fire_once(&mut engine);
    assert!(!engine.world().contains(barrel));
    assert_eq!(enemy_health(&engine, enemy), 40.0);
    assert_eq!(snap.character.health, 100.0);
    assert_eq!(sounds(&snap.events, "ExplosionSound"), 1);
    assert!(snap.events.iter().any(
        |e| matches!(e, GameEvent::SpawnParticles { effect, .. } if effect == "Explosion")
    ));
}

#[test]
fn test_enemy_melee_strikes_once_per_activation() {
    let mut engine = started(bare_config());
    let enemy = spawn_enemy_at(&mut engine, Vec3::new(120.0, 0.0, 88.0), 180.0);
    let left = |active: bool| EnemyCommand {
        enemy: entity_id(enemy),
        action: if active {
            EnemyAction::ActivateWeapon {
                hand: WeaponHand::Left,
            }
        } else {
            EnemyAction::DeactivateWeapon {
                hand: WeaponHand::Left,
            }
        },
    };

    engine.queue_enemy_command(left(true));
    let snap = engine.tick();
    assert_eq!(snap.character.health, 60.0);
    assert_eq!(sounds(&snap.events, "MeleeImpact"), 1);
    assert!(snap.events.contains(&GameEvent::CharacterDamaged {
        amount: 40.0,
        health: 60.0,
    }));

    run_ticks(&mut engine, 10);
    assert_eq!(engine.character().health.current, 60.0);

    engine.queue_enemy_command(left(false));
    engine.queue_enemy_command(left(true));
    engine.tick();
    assert_eq!(engine.character().health.current, 20.0);
}

#[test]
fn test_enemy_attack_then_cooldown() {
    let mut engine = started(bare_config());
    let enemy = spawn_enemy_at(&mut engine, Vec3::new(2000.0, 0.0, 88.0), 180.0);

    engine.enemy_attack(enemy);
    let snap = engine.tick();
    let sections = montages(&snap.events, Montage::EnemyAttack);
    assert_eq!(sections.len(), 1);
    assert!(shooter_enemy::rules::ATTACK_SECTIONS.contains(&sections[0].as_str()));
    assert!(!engine.world().get::<&Enemy>(enemy).unwrap().can_attack);

    engine.enemy_attack(enemy);
    let snap = engine.tick();
    assert!(montages(&snap.events, Montage::EnemyAttack).is_empty());

    run_ticks(&mut engine, 61);
    assert!(engine.world().get::<&Enemy>(enemy).unwrap().can_attack);
}

#[test]
fn test_enemy_agro_and_combat_range() {
    let mut engine = started(bare_config());
    let enemy = spawn_enemy_at(&mut engine, Vec3::new(500.0, 0.0, 88.0), 180.0);

    let snap = engine.tick();
    assert!(snap.events.contains(&GameEvent::BlackboardSet {
        enemy: entity_id(enemy),
        key: "Target".to_string(),
        value: BlackboardValue::Object(Some(entity_id(engine.character().body))),
    }));
    assert!(!engine.world().get::<&Enemy>(enemy).unwrap().in_attack_range);

    engine.set_character_location(Vec3::new(400.0, 0.0, 88.0));
    engine.tick();
    assert!(engine.world().get::<&Enemy>(enemy).unwrap().in_attack_range);

    engine.set_character_location(Vec3::new(0.0, 0.0, 88.0));
    engine.tick();
    assert!(!engine.world().get::<&Enemy>(enemy).unwrap().in_attack_range);
}

// ---- Determinism ----

fn first_enemy(engine: &GameEngine) -> Entity {
    engine
        .world()
        .query::<&Enemy>()
        .iter()
        .map(|(e, _)| e)
        .min_by_key(|e| e.to_bits())
        .unwrap()
}

fn scripted_session(seed: u64, ticks: usize) -> (Vec<String>, Vec<String>) {
    let mut engine = GameEngine::new(GameConfig {
        seed,
        ..Default::default()
    });
    let enemy = first_enemy(&engine);
    let mut jsons = Vec::new();
    let mut sections = Vec::new();
    for tick in 0..ticks {
        match tick {
            5 => engine.queue_command(PlayerCommand::FirePressed),
            60 => engine.queue_command(PlayerCommand::FireReleased),
            90 => engine.queue_command(PlayerCommand::MoveForward { value: 1.0 }),
            150 => engine.queue_command(PlayerCommand::MoveForward { value: 0.0 }),
            _ => {}
        }
        if tick % 70 == 0 {
            engine.enemy_attack(enemy);
        }
        let snap = engine.tick();
        sections.extend(montages(&snap.events, Montage::EnemyAttack));
        jsons.push(serde_json::to_string(&snap).unwrap());
    }
    (jsons, sections)
}

#[test]
fn test_determinism_same_seed() {
    let (a, _) = scripted_session(12345, 600);
    let (b, _) = scripted_session(12345, 600);
    for (json_a, json_b) in a.iter().zip(&b) {
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let (_, a) = scripted_session(111, 1200);
    let (_, b) = scripted_session(222, 1200);
    assert!(a.len() >= 10);
    assert_ne!(a, b, "Different seeds should pick different attack sections");
}

// ---- Randomised invariants ----

#[test]
fn test_random_input_keeps_invariants() {
    let commands = [
        PlayerCommand::FirePressed,
        PlayerCommand::FireReleased,
        PlayerCommand::AimPressed,
        PlayerCommand::AimReleased,
        PlayerCommand::ReloadPressed,
        PlayerCommand::FinishReloading,
        PlayerCommand::FinishEquipping,
        PlayerCommand::EndStun,
        PlayerCommand::GrabClip,
        PlayerCommand::ReleaseClip,
        PlayerCommand::SelectPressed,
        PlayerCommand::InventoryKey { slot: 0 },
        PlayerCommand::InventoryKey { slot: 1 },
        PlayerCommand::InventoryKey { slot: 2 },
        PlayerCommand::MoveForward { value: 1.0 },
        PlayerCommand::MoveForward { value: 0.0 },
        PlayerCommand::MoveRight { value: -1.0 },
        PlayerCommand::MoveRight { value: 0.0 },
        PlayerCommand::Turn { value: 15.0 },
        PlayerCommand::Turn { value: -15.0 },
        PlayerCommand::CrouchPressed,
        PlayerCommand::Jump,
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut engine = started(GameConfig::default());
    // Start full so every weapon pickup goes through the swap and throw.
    for _ in 0..5 {
        give_weapon(&mut engine, WeaponType::Pistol);
    }

    for _ in 0..3000 {
        let mut end_stun_queued = false;
        if rng.gen_bool(0.05) {
            // Grab any weapon outside the inventory, thrown ones included.
            let mut loose: Vec<Entity> = engine
                .world()
                .query::<&Item>()
                .iter()
                .filter(|(e, it)| it.is_weapon() && !engine.character().inventory.contains(e))
                .map(|(e, _)| e)
                .collect();
            loose.sort_by_key(|e| e.to_bits());
            if !loose.is_empty() {
                let target = loose[rng.gen_range(0..loose.len())];
                engine.character_mut().trace_hit_item = Some(target);
                engine.queue_command(PlayerCommand::SelectPressed);
            }
        } else if rng.gen_bool(0.3) {
            let command = commands[rng.gen_range(0..commands.len())].clone();
            end_stun_queued = command == PlayerCommand::EndStun;
            engine.queue_command(command);
        }
        if rng.gen_bool(0.01) {
            engine.stun_character();
        }
        let stunned_before = engine.character().combat_state == CombatState::Stunned;

        let snap = engine.tick();

        for (_, it) in engine.world().query::<&Item>().iter() {
            if let Some(w) = it.weapon() {
                assert!(w.ammo() <= w.magazine_capacity());
            }
        }
        assert_interp_slots_balanced(&snap);
        assert_eq!(
            engine.character().interp_occupancy(),
            snap.interp_slots.iter().sum::<u32>()
        );
        if stunned_before && !end_stun_queued {
            assert_eq!(snap.character.combat_state, CombatState::Stunned);
        }
        assert_eq!(snap.inventory.len(), 6);
    }
}
