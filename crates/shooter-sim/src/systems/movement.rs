//! Kinematic character movement and look input.

use shooter_core::constants::{GRAVITY_Z, JUMP_Z_VELOCITY};
use shooter_core::types::{Rotator, Transform};
use hecs::World;

use crate::character::Character;

/// Pitch limit of the control rotation.
const MAX_PITCH: f32 = 89.0;

pub fn move_forward(ch: &mut Character, value: f32) {
    ch.movement.forward_input = value.clamp(-1.0, 1.0);
}

pub fn move_right(ch: &mut Character, value: f32) {
    ch.movement.right_input = value.clamp(-1.0, 1.0);
}

/// Mouse yaw input, scaled down while aiming.
pub fn turn(ch: &mut Character, value: f32, hip_scale: f32, aiming_scale: f32) {
    let scale = if ch.aiming { aiming_scale } else { hip_scale };
    add_yaw(ch, value * scale);
}

/// Mouse pitch input, scaled down while aiming.
pub fn look_up(ch: &mut Character, value: f32, hip_scale: f32, aiming_scale: f32) {
    let scale = if ch.aiming { aiming_scale } else { hip_scale };
    add_pitch(ch, value * scale);
}

/// Gamepad yaw: `rate` is a normalized stick value.
pub fn turn_at_rate(ch: &mut Character, rate: f32, dt: f32) {
    add_yaw(ch, rate * ch.base_turn_rate * dt);
}

/// Gamepad pitch: `rate` is a normalized stick value.
pub fn look_up_at_rate(ch: &mut Character, rate: f32, dt: f32) {
    add_pitch(ch, rate * ch.base_look_up_rate * dt);
}

fn add_yaw(ch: &mut Character, degrees: f32) {
    ch.control_rotation.yaw = shooter_core::math::normalize_axis(ch.control_rotation.yaw + degrees);
}

fn add_pitch(ch: &mut Character, degrees: f32) {
    ch.control_rotation.pitch = (ch.control_rotation.pitch + degrees).clamp(-MAX_PITCH, MAX_PITCH);
}

pub fn jump(ch: &mut Character) {
    if !ch.movement.falling {
        ch.movement.velocity.z = JUMP_Z_VELOCITY;
        ch.movement.falling = true;
    }
}

/// Integrate one frame of walking, jumping and landing.
pub fn run(ch: &mut Character, world: &mut World, dt: f32) {
    let facing = Rotator::from_yaw(ch.control_rotation.yaw);
    let mut wish = facing.forward() * ch.movement.forward_input
        + facing.right() * ch.movement.right_input;
    wish.z = 0.0;
    let wish = wish.clamp_length_max(1.0);

    let m = &mut ch.movement;
    m.acceleration = wish * m.max_walk_speed;
    if !m.falling {
        let horizontal = wish * m.max_walk_speed;
        m.velocity.x = horizontal.x;
        m.velocity.y = horizontal.y;
    } else {
        m.velocity.z += GRAVITY_Z * dt;
    }

    let Ok(mut transform) = world.get::<&mut Transform>(ch.body) else {
        return;
    };
    let mut location = transform.location + m.velocity * dt;
    let rest_z = m.floor_z + ch.capsule_half_height;
    if m.falling {
        if location.z <= rest_z && m.velocity.z <= 0.0 {
            location.z = rest_z;
            m.velocity.z = 0.0;
            m.falling = false;
        }
    } else {
        location.z = rest_z;
    }
    *transform = Transform {
        location,
        rotation: facing,
        scale: transform.scale,
    };
}

