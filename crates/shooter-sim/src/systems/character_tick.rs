//! Per-frame character update, always in this order: field of view, look
//! rates, crosshair spread, item trace, capsule height.

use shooter_core::config::CharacterTuning;
use shooter_core::constants::*;
use shooter_core::math::{finterp_to, mapped_range_clamped};

use crate::character::Character;
use crate::context::SimContext;
use crate::systems::item_trace;

pub fn run(ch: &mut Character, cx: &mut SimContext, dt: f32) {
    let config = cx.config;
    let tuning = &config.character;
    camera_interp_zoom(ch, tuning, dt);
    set_look_rates(ch, tuning);
    calculate_crosshair_spread(ch, dt);
    item_trace::trace_for_items(ch, cx);
    interp_capsule_half_height(ch, dt);
}

pub fn camera_interp_zoom(ch: &mut Character, tuning: &CharacterTuning, dt: f32) {
    let target = if ch.aiming {
        tuning.camera_zoomed_fov
    } else {
        ch.camera_default_fov
    };
    ch.camera_current_fov = finterp_to(ch.camera_current_fov, target, dt, tuning.zoom_interp_speed);
}

pub fn set_look_rates(ch: &mut Character, tuning: &CharacterTuning) {
    if ch.aiming {
        ch.base_turn_rate = tuning.aiming_turn_rate;
        ch.base_look_up_rate = tuning.aiming_look_up_rate;
    } else {
        ch.base_turn_rate = tuning.hip_turn_rate;
        ch.base_look_up_rate = tuning.hip_look_up_rate;
    }
}

pub fn calculate_crosshair_spread(ch: &mut Character, dt: f32) {
    let spread = &mut ch.crosshair;
    let mut velocity = ch.movement.velocity;
    velocity.z = 0.0;
    spread.velocity_factor = mapped_range_clamped((0.0, 600.0), (0.0, 1.0), velocity.length());

    spread.in_air_factor = if ch.movement.falling {
        finterp_to(spread.in_air_factor, CROSSHAIR_IN_AIR_TARGET, dt, CROSSHAIR_IN_AIR_SPEED)
    } else {
        finterp_to(spread.in_air_factor, 0.0, dt, CROSSHAIR_LANDED_SPEED)
    };

    let aim_target = if ch.aiming { CROSSHAIR_AIM_TARGET } else { 0.0 };
    spread.aim_factor = finterp_to(spread.aim_factor, aim_target, dt, CROSSHAIR_AIM_SPEED);

    let shooting_target = if ch.firing_bullet {
        CROSSHAIR_SHOOTING_TARGET
    } else {
        0.0
    };
    spread.shooting_factor = finterp_to(
        spread.shooting_factor,
        shooting_target,
        dt,
        CROSSHAIR_SHOOTING_SPEED,
    );

    spread.multiplier = CROSSHAIR_BASE_SPREAD
        + spread.velocity_factor
        + spread.in_air_factor
        + spread.aim_factor
        + spread.shooting_factor;
}

/// Shrink or grow the capsule; the mesh moves the other way so the feet stay put.
pub fn interp_capsule_half_height(ch: &mut Character, dt: f32) {
    let target = if ch.crouching {
        CROUCHING_CAPSULE_HALF_HEIGHT
    } else {
        STANDING_CAPSULE_HALF_HEIGHT
    };
    let interp = finterp_to(ch.capsule_half_height, target, dt, CAPSULE_INTERP_SPEED);
    let delta = interp - ch.capsule_half_height;
    ch.mesh_offset_z -= delta;
    ch.capsule_half_height = interp;
}
