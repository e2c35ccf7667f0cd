//! Game configuration: tunables, data tables and the initial world layout.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides. `GameConfig::default()` reproduces the stock game.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::StaticBox;
use crate::constants::*;
use crate::curves::{self, FloatCurve, VectorCurve};
use crate::data_table::{RarityTable, WeaponDataTable};
use crate::enums::*;
use crate::error::ConfigError;

/// Top-level configuration for a game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    pub character: CharacterTuning,
    pub items: ItemTuning,
    pub weapon_motion: WeaponMotionTuning,
    pub weapons: WeaponDataTable,
    pub rarities: RarityTable,
    pub scenario: Scenario,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            character: CharacterTuning::default(),
            items: ItemTuning::default(),
            weapon_motion: WeaponMotionTuning::default(),
            weapons: WeaponDataTable::builtin(),
            rarities: RarityTable::builtin(),
            scenario: Scenario::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.character.interp_offsets.len() != INTERP_LOCATION_COUNT {
            return Err(ConfigError::Invalid(format!(
                "character.interp_offsets needs {INTERP_LOCATION_COUNT} entries, got {}",
                self.character.interp_offsets.len()
            )));
        }
        if self.items.z_curve_time <= 0.0 {
            return Err(ConfigError::Invalid(
                "items.z_curve_time must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Player character tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTuning {
    pub max_health: f32,
    pub starting_9mm_ammo: u32,
    pub starting_ar_ammo: u32,
    pub default_weapon: WeaponType,
    pub base_movement_speed: f32,
    pub crouch_movement_speed: f32,
    pub camera_default_fov: f32,
    pub camera_zoomed_fov: f32,
    pub zoom_interp_speed: f32,
    pub hip_turn_rate: f32,
    pub hip_look_up_rate: f32,
    pub aiming_turn_rate: f32,
    pub aiming_look_up_rate: f32,
    pub mouse_hip_scale: f32,
    pub mouse_aiming_scale: f32,
    /// Camera-relative interpolation destinations (forward, right, up).
    /// Index 0 is the weapon target, the rest are holster targets.
    pub interp_offsets: Vec<Vec3>,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        let mut interp_offsets = vec![Vec3::new(
            CAMERA_INTERP_DISTANCE,
            0.0,
            CAMERA_INTERP_ELEVATION,
        )];
        for right in [-150.0, -90.0, -30.0, 30.0, 90.0, 150.0] {
            interp_offsets.push(Vec3::new(200.0, right, -50.0));
        }
        Self {
            max_health: CHARACTER_MAX_HEALTH,
            starting_9mm_ammo: STARTING_9MM_AMMO,
            starting_ar_ammo: STARTING_AR_AMMO,
            default_weapon: WeaponType::SubmachineGun,
            base_movement_speed: BASE_MOVEMENT_SPEED,
            crouch_movement_speed: CROUCH_MOVEMENT_SPEED,
            camera_default_fov: CAMERA_DEFAULT_FOV,
            camera_zoomed_fov: CAMERA_ZOOMED_FOV,
            zoom_interp_speed: ZOOM_INTERP_SPEED,
            hip_turn_rate: HIP_TURN_RATE,
            hip_look_up_rate: HIP_LOOK_UP_RATE,
            aiming_turn_rate: AIMING_TURN_RATE,
            aiming_look_up_rate: AIMING_LOOK_UP_RATE,
            mouse_hip_scale: MOUSE_HIP_SCALE,
            mouse_aiming_scale: MOUSE_AIMING_SCALE,
            interp_offsets,
        }
    }
}

/// Pickup flight and glow tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTuning {
    pub z_curve_time: f64,
    pub interp_speed: f32,
    pub z_curve: FloatCurve,
    /// Optional size curve during the flight.
    pub scale_curve: Option<FloatCurve>,
    pub pulse_curve_time: f64,
    pub pulse_curve: VectorCurve,
    pub interp_pulse_curve: VectorCurve,
}

impl Default for ItemTuning {
    fn default() -> Self {
        Self {
            z_curve_time: Z_CURVE_TIME,
            interp_speed: ITEM_INTERP_SPEED,
            z_curve: curves::default_item_z_curve(),
            scale_curve: Some(curves::default_item_scale_curve()),
            pulse_curve_time: PULSE_CURVE_TIME,
            pulse_curve: curves::default_pulse_curve(),
            interp_pulse_curve: curves::default_interp_pulse_curve(),
        }
    }
}

/// Weapon throw and slide tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponMotionTuning {
    pub throw_time: f64,
    pub throw_impulse: f32,
    pub slide_time: f64,
    pub slide_curve: FloatCurve,
    pub max_slide_displacement: f32,
    pub max_recoil_rotation: f32,
}

impl Default for WeaponMotionTuning {
    fn default() -> Self {
        Self {
            throw_time: THROW_WEAPON_TIME,
            throw_impulse: THROW_IMPULSE,
            slide_time: SLIDE_DISPLACEMENT_TIME,
            slide_curve: curves::default_slide_curve(),
            max_slide_displacement: MAX_SLIDE_DISPLACEMENT,
            max_recoil_rotation: MAX_RECOIL_ROTATION,
        }
    }
}

/// A weapon lying in the world at session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponSpawn {
    pub weapon_type: WeaponType,
    #[serde(default)]
    pub rarity: ItemRarity,
    pub location: Vec3,
    #[serde(default)]
    pub yaw: f32,
}

/// An ammo box lying in the world at session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoSpawn {
    pub ammo_type: AmmoType,
    pub count: u32,
    pub location: Vec3,
}

/// An enemy and its two patrol points (relative to the spawn location).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySpawn {
    #[serde(default)]
    pub archetype: EnemyArchetype,
    pub location: Vec3,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub patrol_point: Vec3,
    #[serde(default)]
    pub patrol_point_2: Vec3,
}

/// Initial world layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub player_start: Vec3,
    pub player_yaw: f32,
    pub weapons: Vec<WeaponSpawn>,
    pub ammo: Vec<AmmoSpawn>,
    pub enemies: Vec<EnemySpawn>,
    pub explosives: Vec<Vec3>,
    pub geometry: Vec<StaticBox>,
}

impl Default for Scenario {
    /// A small firing range: floor, back wall, a few pickups, two enemies.
    fn default() -> Self {
        Self {
            player_start: Vec3::new(0.0, 0.0, STANDING_CAPSULE_HALF_HEIGHT),
            player_yaw: 0.0,
            weapons: vec![
                WeaponSpawn {
                    weapon_type: WeaponType::AssaultRifle,
                    rarity: ItemRarity::Rare,
                    location: Vec3::new(300.0, 100.0, 20.0),
                    yaw: 90.0,
                },
                WeaponSpawn {
                    weapon_type: WeaponType::Pistol,
                    rarity: ItemRarity::Uncommon,
                    location: Vec3::new(300.0, -100.0, 20.0),
                    yaw: 90.0,
                },
            ],
            ammo: vec![AmmoSpawn {
                ammo_type: AmmoType::AssaultRifle,
                count: 30,
                location: Vec3::new(500.0, 0.0, 20.0),
            }],
            enemies: vec![
                EnemySpawn {
                    archetype: EnemyArchetype::Grux,
                    location: Vec3::new(2000.0, 300.0, 95.0),
                    yaw: 180.0,
                    patrol_point: Vec3::new(0.0, 600.0, 0.0),
                    patrol_point_2: Vec3::new(0.0, -600.0, 0.0),
                },
                EnemySpawn {
                    archetype: EnemyArchetype::GruxElite,
                    location: Vec3::new(2500.0, -400.0, 95.0),
                    yaw: 180.0,
                    patrol_point: Vec3::new(-400.0, 0.0, 0.0),
                    patrol_point_2: Vec3::new(400.0, 0.0, 0.0),
                },
            ],
            explosives: vec![Vec3::new(1500.0, -300.0, 40.0)],
            geometry: vec![
                StaticBox {
                    min: Vec3::new(-5000.0, -5000.0, -50.0),
                    max: Vec3::new(5000.0, 5000.0, 0.0),
                    surface: SurfaceType::Concrete,
                },
                StaticBox {
                    min: Vec3::new(4000.0, -5000.0, 0.0),
                    max: Vec3::new(4100.0, 5000.0, 800.0),
                    surface: SurfaceType::Metal,
                },
            ],
        }
    }
}
