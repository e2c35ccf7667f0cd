//! Game state snapshot: the complete visible state handed to the host each tick.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::Glow;
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{EntityId, Rotator, SimTime};

/// Complete game state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub character: CharacterView,
    pub inventory: Vec<InventorySlotView>,
    pub items: Vec<ItemView>,
    /// Occupancy count of each interpolation destination.
    pub interp_slots: Vec<u32>,
    pub enemies: Vec<EnemyView>,
    pub events: Vec<GameEvent>,
}

/// Player character status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterView {
    pub location: Vec3,
    pub control_rotation: Rotator,
    pub health: f32,
    pub max_health: f32,
    pub combat_state: CombatState,
    pub aiming: bool,
    pub crouching: bool,
    pub in_air: bool,
    pub equipped_weapon: Option<EntityId>,
    pub equipped_slot: Option<usize>,
    pub ammo: BTreeMap<AmmoType, u32>,
    pub crosshair_spread: f32,
    pub camera_fov: f32,
    pub base_turn_rate: f32,
    pub base_look_up_rate: f32,
    pub capsule_half_height: f32,
    pub overlapped_item_count: u32,
    pub trace_hit_item: Option<EntityId>,
    pub highlighted_slot: Option<usize>,
    pub anim: AnimView,
}

/// Values fed to the character's animation graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimView {
    pub speed: f32,
    pub in_air: bool,
    pub accelerating: bool,
    pub movement_offset_yaw: f32,
    pub last_movement_offset_yaw: f32,
    pub aiming: bool,
    pub reloading: bool,
    pub equipping: bool,
    pub crouching: bool,
    pub should_use_fabrik: bool,
    pub offset_state: OffsetState,
    pub root_yaw_offset: f32,
    pub pitch: f32,
    pub turning_in_place: bool,
    pub recoil_weight: f32,
    pub yaw_delta: f32,
    pub weapon_type: Option<WeaponType>,
}

/// One occupied inventory slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySlotView {
    pub slot: usize,
    pub item: EntityId,
    pub name: String,
    pub weapon_type: WeaponType,
    pub ammo: u32,
    pub magazine_capacity: u32,
    pub state: ItemState,
}

/// A pickup item in the world or inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub id: EntityId,
    pub name: String,
    pub is_weapon: bool,
    pub count: u32,
    pub rarity: ItemRarity,
    pub state: ItemState,
    pub location: Vec3,
    pub scale: f32,
    pub interping: bool,
    pub widget_visible: bool,
    pub custom_depth: bool,
    pub glow: Option<Glow>,
}

/// Enemy status for the HUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub archetype: EnemyArchetype,
    pub location: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub dying: bool,
    pub stunned: bool,
    pub health_bar_visible: bool,
    pub hit_numbers: usize,
}
