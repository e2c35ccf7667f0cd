//! The player character's non-ECS state.
//!
//! The body (location, collider) is an entity in the world; everything the
//! combat and inventory systems own exclusively lives here, like the
//! engagement table lives beside the world.

use std::collections::BTreeMap;

use glam::Vec3;
use hecs::{Entity, World};

use shooter_core::components::Health;
use shooter_core::config::CharacterTuning;
use shooter_core::constants::*;
use shooter_core::enums::{AmmoType, CombatState};
use shooter_core::types::{Rotator, Transform};

use crate::systems::anim::AnimState;

/// Convert a (forward, right, up) offset into the local x-forward frame.
pub fn local_offset(forward_right_up: Vec3) -> Vec3 {
    Vec3::new(forward_right_up.x, -forward_right_up.y, forward_right_up.z)
}

/// Interpolation destination and how many items are flying to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpLocation {
    /// Camera-relative offset (forward, right, up).
    pub offset: Vec3,
    pub item_count: u32,
}

/// Crosshair spread factors; the multiplier is their sum plus a base.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrosshairSpread {
    pub multiplier: f32,
    pub velocity_factor: f32,
    pub in_air_factor: f32,
    pub aim_factor: f32,
    pub shooting_factor: f32,
}

/// Kinematic movement state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub velocity: Vec3,
    /// Last frame's acceleration (input direction × walk speed).
    pub acceleration: Vec3,
    pub forward_input: f32,
    pub right_input: f32,
    pub falling: bool,
    pub max_walk_speed: f32,
    pub ground_friction: f32,
    /// Height of the walkable ground; a grounded capsule rests its bottom here.
    pub floor_z: f32,
}

#[derive(Debug)]
pub struct Character {
    pub body: Entity,
    pub combat_state: CombatState,
    pub aiming: bool,
    pub aim_button_pressed: bool,
    pub fire_button_pressed: bool,
    /// Set for a short window after each shot; widens the crosshair.
    pub firing_bullet: bool,
    pub crouching: bool,
    pub health: Health,
    pub equipped_weapon: Option<Entity>,
    /// Carried weapons; each weapon's slot index equals its position.
    pub inventory: Vec<Entity>,
    pub ammo: BTreeMap<AmmoType, u32>,
    pub interp_locations: Vec<InterpLocation>,
    pub overlapped_item_count: u32,
    pub should_trace_for_items: bool,
    pub trace_hit_item: Option<Entity>,
    pub trace_hit_item_last_frame: Option<Entity>,
    pub highlighted_slot: Option<usize>,
    pub should_play_pickup_sound: bool,
    pub should_play_equip_sound: bool,
    pub control_rotation: Rotator,
    pub camera_default_fov: f32,
    pub camera_current_fov: f32,
    pub base_turn_rate: f32,
    pub base_look_up_rate: f32,
    pub crosshair: CrosshairSpread,
    pub movement: Movement,
    pub capsule_half_height: f32,
    /// Mesh offset compensating the capsule shrinking while crouched.
    pub mesh_offset_z: f32,
    /// Magazine bone the left-hand helper is attached to.
    pub hand_helper_bone: Option<String>,
    pub anim: AnimState,
}

impl Character {
    pub fn new(body: Entity, tuning: &CharacterTuning, control_yaw: f32, floor_z: f32) -> Self {
        let mut ammo = BTreeMap::new();
        ammo.insert(AmmoType::NineMm, tuning.starting_9mm_ammo);
        ammo.insert(AmmoType::AssaultRifle, tuning.starting_ar_ammo);

        let interp_locations = tuning
            .interp_offsets
            .iter()
            .map(|offset| InterpLocation {
                offset: *offset,
                item_count: 0,
            })
            .collect();

        Self {
            body,
            combat_state: CombatState::Unoccupied,
            aiming: false,
            aim_button_pressed: false,
            fire_button_pressed: false,
            firing_bullet: false,
            crouching: false,
            health: Health::new(tuning.max_health),
            equipped_weapon: None,
            inventory: Vec::new(),
            ammo,
            interp_locations,
            overlapped_item_count: 0,
            should_trace_for_items: false,
            trace_hit_item: None,
            trace_hit_item_last_frame: None,
            highlighted_slot: None,
            should_play_pickup_sound: true,
            should_play_equip_sound: true,
            control_rotation: Rotator::from_yaw(control_yaw),
            camera_default_fov: tuning.camera_default_fov,
            camera_current_fov: tuning.camera_default_fov,
            base_turn_rate: tuning.hip_turn_rate,
            base_look_up_rate: tuning.hip_look_up_rate,
            crosshair: CrosshairSpread {
                multiplier: CROSSHAIR_BASE_SPREAD,
                ..Default::default()
            },
            movement: Movement {
                velocity: Vec3::ZERO,
                acceleration: Vec3::ZERO,
                forward_input: 0.0,
                right_input: 0.0,
                falling: false,
                max_walk_speed: tuning.base_movement_speed,
                ground_friction: BASE_GROUND_FRICTION,
                floor_z,
            },
            capsule_half_height: STANDING_CAPSULE_HALF_HEIGHT,
            mesh_offset_z: -STANDING_CAPSULE_HALF_HEIGHT,
            hand_helper_bone: None,
            anim: AnimState::default(),
        }
    }

    /// Body transform (capsule centre, facing the control yaw).
    pub fn transform(&self, world: &World) -> Transform {
        world
            .get::<&Transform>(self.body)
            .map(|t| *t)
            .unwrap_or_default()
    }

    pub fn location(&self, world: &World) -> Vec3 {
        self.transform(world).location
    }

    /// Follow camera at the end of the spring arm.
    pub fn camera_transform(&self, world: &World) -> Transform {
        let pivot = self.location(world);
        let rotation = self.control_rotation;
        let quat = rotation.to_quat();
        let [forward, right, up] = CAMERA_SOCKET_OFFSET;
        let arm = Vec3::new(-CAMERA_BOOM_LENGTH, 0.0, 0.0)
            + local_offset(Vec3::new(forward, right, up));
        Transform {
            location: pivot + quat * arm,
            rotation,
            scale: 1.0,
        }
    }

    /// World position of interpolation destination `index`.
    pub fn interp_location_world(&self, world: &World, index: usize) -> Option<Vec3> {
        let slot = self.interp_locations.get(index)?;
        Some(
            self.camera_transform(world)
                .transform_point(local_offset(slot.offset)),
        )
    }

    /// World position of the right-hand weapon socket.
    pub fn hand_socket_transform(&self, world: &World) -> Transform {
        let body = self.transform(world);
        let yaw_only = Transform {
            location: body.location,
            rotation: Rotator::from_yaw(self.control_rotation.yaw),
            scale: 1.0,
        };
        let [forward, right, up] = HAND_SOCKET_OFFSET;
        Transform {
            location: yaw_only.transform_point(local_offset(Vec3::new(forward, right, up))),
            rotation: self.control_rotation,
            scale: 1.0,
        }
    }

    /// Rounds of `ammo_type` carried outside the magazine.
    pub fn carried(&self, ammo_type: AmmoType) -> u32 {
        self.ammo.get(&ammo_type).copied().unwrap_or(0)
    }

    /// Sum of every interpolation slot's occupancy.
    pub fn interp_occupancy(&self) -> u32 {
        self.interp_locations.iter().map(|l| l.item_count).sum()
    }
}
