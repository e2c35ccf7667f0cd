//! Animation feed: the values an animation graph reads each frame.

use hecs::World;
use serde::{Deserialize, Serialize};

use shooter_core::components::Item;
use shooter_core::enums::{CombatState, OffsetState, WeaponType};
use shooter_core::math::{finterp_to, normalize_axis};
use shooter_core::state::AnimView;
use shooter_core::types::Rotator;

use crate::character::Character;

/// Root yaw offset beyond which turn-in-place clamps the excess.
const MAX_ROOT_YAW_OFFSET: f32 = 90.0;
const LEAN_INTERP_SPEED: f32 = 6.0;
const MAX_LEAN_YAW_DELTA: f32 = 90.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimState {
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
    pub pitch: f32,
    pub root_yaw_offset: f32,
    pub turning_in_place: bool,
    pub recoil_weight: f32,
    pub yaw_delta: f32,
    pub weapon_type: Option<WeaponType>,
    /// Host-supplied "Turning" and "Rotation" curve values of the turn animation.
    pub turning_curve: f32,
    pub rotation_curve_input: f32,
    tip_character_yaw: f32,
    tip_character_yaw_last_frame: f32,
    rotation_curve: f32,
    rotation_curve_last_frame: f32,
    character_rotation: Rotator,
    character_rotation_last_frame: Rotator,
}

impl AnimState {
    pub fn view(&self) -> AnimView {
        AnimView {
            speed: self.speed,
            in_air: self.in_air,
            accelerating: self.accelerating,
            movement_offset_yaw: self.movement_offset_yaw,
            last_movement_offset_yaw: self.last_movement_offset_yaw,
            aiming: self.aiming,
            reloading: self.reloading,
            equipping: self.equipping,
            crouching: self.crouching,
            should_use_fabrik: self.should_use_fabrik,
            offset_state: self.offset_state,
            root_yaw_offset: self.root_yaw_offset,
            pitch: self.pitch,
            turning_in_place: self.turning_in_place,
            recoil_weight: self.recoil_weight,
            yaw_delta: self.yaw_delta,
            weapon_type: self.weapon_type,
        }
    }
}

pub fn update(ch: &mut Character, world: &World, dt: f32) {
    let actor_rotation = ch.transform(world).rotation;
    let aim_rotation = ch.control_rotation;
    let velocity = ch.movement.velocity;
    let weapon_type = ch.equipped_weapon.and_then(|w| {
        world
            .get::<&Item>(w)
            .ok()
            .and_then(|it| it.weapon().map(|wp| wp.weapon_type))
    });

    let anim = &mut ch.anim;
    anim.crouching = ch.crouching;
    anim.reloading = ch.combat_state == CombatState::Reloading;
    anim.equipping = ch.combat_state == CombatState::Equipping;
    anim.should_use_fabrik = matches!(
        ch.combat_state,
        CombatState::Unoccupied | CombatState::FiringTimerActive
    );
    anim.speed = horizontal_speed(velocity);
    anim.in_air = ch.movement.falling;
    anim.accelerating = ch.movement.acceleration.length() > 0.0;

    let movement_rotation = Rotator::from_direction(velocity);
    anim.movement_offset_yaw = movement_rotation.delta(&aim_rotation).yaw;
    if velocity.length() > 0.0 {
        anim.last_movement_offset_yaw = anim.movement_offset_yaw;
    }
    anim.aiming = ch.aiming;

    anim.offset_state = if anim.reloading {
        OffsetState::Reloading
    } else if anim.in_air {
        OffsetState::InAir
    } else if anim.aiming {
        OffsetState::Aiming
    } else {
        OffsetState::Hip
    };
    if weapon_type.is_some() {
        anim.weapon_type = weapon_type;
    }

    turn_in_place(anim, actor_rotation, aim_rotation);
    lean(anim, actor_rotation, dt);
}

fn horizontal_speed(velocity: glam::Vec3) -> f32 {
    glam::Vec3::new(velocity.x, velocity.y, 0.0).length()
}

fn turn_in_place(anim: &mut AnimState, actor_rotation: Rotator, aim_rotation: Rotator) {
    anim.pitch = aim_rotation.pitch;

    if anim.speed > 0.0 || anim.in_air {
        anim.root_yaw_offset = 0.0;
        anim.tip_character_yaw = actor_rotation.yaw;
        anim.tip_character_yaw_last_frame = anim.tip_character_yaw;
        anim.rotation_curve_last_frame = 0.0;
        anim.rotation_curve = 0.0;
    } else {
        anim.tip_character_yaw_last_frame = anim.tip_character_yaw;
        anim.tip_character_yaw = actor_rotation.yaw;
        let yaw_delta = anim.tip_character_yaw - anim.tip_character_yaw_last_frame;
        anim.root_yaw_offset = normalize_axis(anim.root_yaw_offset - yaw_delta);

        if anim.turning_curve > 0.0 {
            anim.turning_in_place = true;
            anim.rotation_curve_last_frame = anim.rotation_curve;
            anim.rotation_curve = anim.rotation_curve_input;
            let delta_rotation = anim.rotation_curve - anim.rotation_curve_last_frame;

            if anim.root_yaw_offset > 0.0 {
                anim.root_yaw_offset -= delta_rotation;
            } else {
                anim.root_yaw_offset += delta_rotation;
            }

            let abs_offset = anim.root_yaw_offset.abs();
            if abs_offset > MAX_ROOT_YAW_OFFSET {
                let excess = abs_offset - MAX_ROOT_YAW_OFFSET;
                if anim.root_yaw_offset > 0.0 {
                    anim.root_yaw_offset -= excess;
                } else {
                    anim.root_yaw_offset += excess;
                }
            }
        } else {
            anim.turning_in_place = false;
        }
    }

    anim.recoil_weight = if anim.turning_in_place {
        if anim.reloading || anim.equipping {
            1.0
        } else {
            0.0
        }
    } else if anim.crouching {
        if anim.reloading || anim.equipping {
            1.0
        } else {
            0.1
        }
    } else if anim.aiming || anim.reloading || anim.equipping {
        1.0
    } else {
        0.5
    };
}

fn lean(anim: &mut AnimState, actor_rotation: Rotator, dt: f32) {
    if dt <= 0.0 {
        return;
    }
    anim.character_rotation_last_frame = anim.character_rotation;
    anim.character_rotation = actor_rotation;
    let delta = anim
        .character_rotation
        .delta(&anim.character_rotation_last_frame);
    let target = delta.yaw / dt;
    let interp = finterp_to(anim.yaw_delta, target, dt, LEAN_INTERP_SPEED);
    anim.yaw_delta = interp.clamp(-MAX_LEAN_YAW_DELTA, MAX_LEAN_YAW_DELTA);
}
