//! Fundamental geometric and simulation types.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::normalize_axis;

/// Stable, serializable reference to a world entity.
///
/// The simulation converts these to and from `hecs::Entity` bits; the core
/// crate only needs to carry them around in events and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Controller that instigated an action (player or an AI controller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControllerId(pub u32);

impl ControllerId {
    /// The local player's controller.
    pub const PLAYER: ControllerId = ControllerId(0);
}

/// Orientation in degrees. x = forward, y = right, z = up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Rotation around the vertical axis only.
    pub fn from_yaw(yaw: f32) -> Self {
        Self {
            pitch: 0.0,
            yaw,
            roll: 0.0,
        }
    }

    /// Rotator pointing along `direction` (roll is always zero).
    pub fn from_direction(direction: Vec3) -> Self {
        let yaw = direction.y.atan2(direction.x).to_degrees();
        let horizontal = (direction.x * direction.x + direction.y * direction.y).sqrt();
        let pitch = direction.z.atan2(horizontal).to_degrees();
        Self {
            pitch,
            yaw,
            roll: 0.0,
        }
    }

    /// Same rotation with every axis wrapped into (-180, 180].
    pub fn normalized(&self) -> Self {
        Self {
            pitch: normalize_axis(self.pitch),
            yaw: normalize_axis(self.yaw),
            roll: normalize_axis(self.roll),
        }
    }

    /// Component-wise difference `self - other`, normalized.
    pub fn delta(&self, other: &Rotator) -> Rotator {
        Rotator {
            pitch: self.pitch - other.pitch,
            yaw: self.yaw - other.yaw,
            roll: self.roll - other.roll,
        }
        .normalized()
    }

    /// Quaternion for this rotation (yaw about z, then pitch, then roll).
    pub fn to_quat(&self) -> Quat {
        Quat::from_rotation_z(self.yaw.to_radians())
            * Quat::from_rotation_y(-self.pitch.to_radians())
            * Quat::from_rotation_x(self.roll.to_radians())
    }

    /// Unit vector the rotation faces.
    pub fn forward(&self) -> Vec3 {
        self.to_quat() * Vec3::X
    }

    /// Unit vector to the right of the facing direction.
    pub fn right(&self) -> Vec3 {
        self.to_quat() * Vec3::NEG_Y
    }

    /// Unit vector above the facing direction.
    pub fn up(&self) -> Vec3 {
        self.to_quat() * Vec3::Z
    }
}

/// World transform of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub location: Vec3,
    pub rotation: Rotator,
    /// Uniform scale (1.0 = authored size).
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            rotation: Rotator::ZERO,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn at(location: Vec3) -> Self {
        Self {
            location,
            ..Default::default()
        }
    }

    /// Transform a point from local space into world space (scale ignored).
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.location + self.rotation.to_quat() * local
    }
}

/// Value written to an AI blackboard key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum BlackboardValue {
    Bool(bool),
    Vector(Vec3),
    Object(Option<EntityId>),
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
