//! Sphere overlap events between the character and the world.
//!
//! Overlaps are recomputed every frame from distances; begin and end
//! callbacks fire on transitions, like collision components would.

use std::collections::BTreeSet;

use hecs::Entity;

use shooter_core::components::{Enemy, Item};
use shooter_core::constants::{AMMO_COLLECT_RADIUS, CAPSULE_RADIUS, ITEM_AREA_RADIUS};
use shooter_core::enums::WeaponHand;
use shooter_core::types::Transform;

use crate::character::Character;
use crate::context::SimContext;
use crate::systems::{enemy, item_interp, item_trace};

/// Extra reach of an enemy weapon's collision box around its tip.
const WEAPON_BOX_EXTENT: f32 = 20.0;

/// Overlaps currently in effect, keyed by entity bits.
#[derive(Debug, Default)]
pub struct OverlapTracker {
    item_areas: BTreeSet<u64>,
    agro: BTreeSet<u64>,
    combat_range: BTreeSet<u64>,
}

impl OverlapTracker {
    pub fn new() -> Self {
        Self::default()
    }
}

fn bits(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Update every overlap volume against the character's current position.
pub fn run(ch: &mut Character, tracker: &mut OverlapTracker, cx: &mut SimContext) {
    let here = ch.location(cx.world);
    update_item_areas(ch, tracker, cx, here);
    collect_ammo(ch, cx, here);
    update_enemy_volumes(ch, tracker, cx, here);
    enemy_weapon_strikes(ch, cx, here);
}

fn update_item_areas(ch: &mut Character, tracker: &mut OverlapTracker, cx: &mut SimContext, here: glam::Vec3) {
    let inside: BTreeSet<u64> = cx
        .world
        .query::<(&Item, &Transform)>()
        .iter()
        .filter(|(_, (it, t))| {
            it.properties().area_overlap && t.location.distance(here) <= ITEM_AREA_RADIUS
        })
        .map(|(e, _)| bits(e))
        .collect();

    let ended = tracker.item_areas.difference(&inside).count();
    let began = inside.difference(&tracker.item_areas).count();
    for _ in 0..ended {
        item_trace::increment_overlapped_item_count(ch, -1);
    }
    for _ in 0..began {
        item_trace::increment_overlapped_item_count(ch, 1);
    }
    tracker.item_areas = inside;
}

fn collect_ammo(ch: &mut Character, cx: &mut SimContext, here: glam::Vec3) {
    let touched: Vec<Entity> = cx
        .world
        .query::<(&Item, &Transform)>()
        .iter()
        .filter(|(_, (it, t))| {
            it.ammo().is_some_and(|a| a.collect_sphere_enabled)
                && t.location.distance(here) <= AMMO_COLLECT_RADIUS + CAPSULE_RADIUS
        })
        .map(|(e, _)| e)
        .collect();

    for ammo in touched {
        if let Ok(mut it) = cx.world.get::<&mut Item>(ammo) {
            if let Some(a) = it.ammo_mut() {
                a.collect_sphere_enabled = false;
            }
        }
        item_interp::start_item_curve(ch, cx, ammo, false);
    }
}

fn update_enemy_volumes(ch: &mut Character, tracker: &mut OverlapTracker, cx: &mut SimContext, here: glam::Vec3) {
    let enemies: Vec<(Entity, f32, f32, f32)> = cx
        .world
        .query::<(&Enemy, &Transform)>()
        .iter()
        .map(|(e, (en, t))| (e, t.location.distance(here), en.agro_radius, en.combat_range))
        .collect();

    let mut live = BTreeSet::new();
    for (entity, distance, agro_radius, combat_range) in enemies {
        let key = bits(entity);
        live.insert(key);

        let in_agro = distance <= agro_radius + CAPSULE_RADIUS;
        if in_agro && tracker.agro.insert(key) {
            enemy::on_agro(cx, entity, ch.body);
        } else if !in_agro {
            tracker.agro.remove(&key);
        }

        let in_range = distance <= combat_range + CAPSULE_RADIUS;
        if in_range && tracker.combat_range.insert(key) {
            enemy::on_combat_range(cx, entity, true);
        } else if !in_range && tracker.combat_range.remove(&key) {
            enemy::on_combat_range(cx, entity, false);
        }
    }
    tracker.agro.retain(|k| live.contains(k));
    tracker.combat_range.retain(|k| live.contains(k));
}

fn enemy_weapon_strikes(ch: &mut Character, cx: &mut SimContext, here: glam::Vec3) {
    let mut strikes = Vec::new();
    for (entity, (en, t)) in cx.world.query::<(&Enemy, &Transform)>().iter() {
        for (hand, active, struck) in [
            (WeaponHand::Left, en.left_weapon_active, en.left_weapon_struck),
            (WeaponHand::Right, en.right_weapon_active, en.right_weapon_struck),
        ] {
            if !active || struck {
                continue;
            }
            let tip = enemy::weapon_tip(t, en.weapon_reach, hand);
            if tip.distance(here) <= CAPSULE_RADIUS + WEAPON_BOX_EXTENT {
                strikes.push((entity, hand));
            }
        }
    }
    for (entity, hand) in strikes {
        enemy::weapon_strike(ch, cx, entity, hand);
    }
}
