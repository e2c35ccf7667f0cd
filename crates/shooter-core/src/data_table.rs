//! Weapon and rarity data tables.
//!
//! Rows are keyed by weapon type / rarity and consumed once when an item is
//! constructed. Tables load from JSON; the built-in tables carry the stock
//! values so the game runs without any asset files.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{AmmoType, ItemRarity, WeaponType};
use crate::error::ConfigError;

/// Static stat block for one weapon type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDataRow {
    pub item_name: String,
    pub ammo_type: AmmoType,
    /// Rounds loaded when the weapon is spawned.
    pub weapon_ammo: u32,
    pub magazine_capacity: u32,
    pub automatic: bool,
    pub damage: f32,
    pub headshot_damage: f32,
    pub auto_fire_rate: f64,
    pub reload_montage_section: String,
    pub clip_bone_name: String,
    #[serde(default)]
    pub bone_to_hide: Option<String>,
    #[serde(default)]
    pub fire_sound: Option<String>,
    #[serde(default)]
    pub pickup_sound: Option<String>,
    #[serde(default)]
    pub equip_sound: Option<String>,
    #[serde(default)]
    pub muzzle_flash: Option<String>,
    #[serde(default)]
    pub muzzle_offset: Option<Vec3>,
}

/// Weapon rows keyed by weapon type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponDataTable {
    rows: HashMap<WeaponType, WeaponDataRow>,
}

impl WeaponDataTable {
    /// Parse a table from JSON (`{"Pistol": {...}, ...}`).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let table: WeaponDataTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Stock rows for every weapon type.
    pub fn builtin() -> Self {
        let mut rows = HashMap::new();
        rows.insert(
            WeaponType::SubmachineGun,
            WeaponDataRow {
                item_name: "SubmachineGun".to_string(),
                ammo_type: AmmoType::NineMm,
                weapon_ammo: 30,
                magazine_capacity: 30,
                automatic: true,
                damage: 20.0,
                headshot_damage: 50.0,
                auto_fire_rate: 0.1,
                reload_montage_section: "ReloadSMG".to_string(),
                clip_bone_name: "smg_clip".to_string(),
                bone_to_hide: None,
                fire_sound: Some("SmgFire".to_string()),
                pickup_sound: Some("SmgPickup".to_string()),
                equip_sound: Some("SmgEquip".to_string()),
                muzzle_flash: Some("SmgMuzzleFlash".to_string()),
                muzzle_offset: Some(Vec3::new(60.0, 0.0, 10.0)),
            },
        );
        rows.insert(
            WeaponType::AssaultRifle,
            WeaponDataRow {
                item_name: "AssaultRifle".to_string(),
                ammo_type: AmmoType::AssaultRifle,
                weapon_ammo: 30,
                magazine_capacity: 30,
                automatic: true,
                damage: 30.0,
                headshot_damage: 75.0,
                auto_fire_rate: 0.12,
                reload_montage_section: "ReloadAR".to_string(),
                clip_bone_name: "ar_clip".to_string(),
                bone_to_hide: None,
                fire_sound: Some("ArFire".to_string()),
                pickup_sound: Some("ArPickup".to_string()),
                equip_sound: Some("ArEquip".to_string()),
                muzzle_flash: Some("ArMuzzleFlash".to_string()),
                muzzle_offset: Some(Vec3::new(80.0, 0.0, 12.0)),
            },
        );
        rows.insert(
            WeaponType::Pistol,
            WeaponDataRow {
                item_name: "Pistol".to_string(),
                ammo_type: AmmoType::NineMm,
                weapon_ammo: 12,
                magazine_capacity: 12,
                automatic: false,
                damage: 25.0,
                headshot_damage: 80.0,
                auto_fire_rate: 0.2,
                reload_montage_section: "ReloadPistol".to_string(),
                clip_bone_name: "pistol_clip".to_string(),
                bone_to_hide: Some("pistol_sight".to_string()),
                fire_sound: Some("PistolFire".to_string()),
                pickup_sound: Some("PistolPickup".to_string()),
                equip_sound: Some("PistolEquip".to_string()),
                muzzle_flash: Some("PistolMuzzleFlash".to_string()),
                muzzle_offset: Some(Vec3::new(35.0, 0.0, 8.0)),
            },
        );
        Self { rows }
    }

    pub fn find_row(&self, weapon_type: WeaponType) -> Option<&WeaponDataRow> {
        self.rows.get(&weapon_type)
    }

    pub fn insert(&mut self, weapon_type: WeaponType, row: WeaponDataRow) {
        self.rows.insert(weapon_type, row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (weapon_type, row) in &self.rows {
            if row.magazine_capacity == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{weapon_type:?}: magazine_capacity must be positive"
                )));
            }
            if row.weapon_ammo > row.magazine_capacity {
                return Err(ConfigError::Invalid(format!(
                    "{weapon_type:?}: weapon_ammo {} exceeds magazine_capacity {}",
                    row.weapon_ammo, row.magazine_capacity
                )));
            }
            if row.auto_fire_rate <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{weapon_type:?}: auto_fire_rate must be positive"
                )));
            }
        }
        Ok(())
    }
}

/// Presentation row for one rarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityRow {
    pub number_of_stars: u8,
    pub glow_colour: [f32; 4],
    pub custom_depth_stencil: u8,
}

/// Rarity rows keyed by rarity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RarityTable {
    rows: HashMap<ItemRarity, RarityRow>,
}

impl RarityTable {
    pub fn builtin() -> Self {
        let entries = [
            (ItemRarity::Damaged, 1, [0.4, 0.4, 0.4, 1.0], 250),
            (ItemRarity::Common, 2, [1.0, 1.0, 1.0, 1.0], 251),
            (ItemRarity::Uncommon, 3, [0.1, 0.9, 0.1, 1.0], 252),
            (ItemRarity::Rare, 4, [0.1, 0.3, 1.0, 1.0], 253),
            (ItemRarity::Legendary, 5, [1.0, 0.6, 0.0, 1.0], 254),
        ];
        let rows = entries
            .into_iter()
            .map(|(rarity, stars, colour, stencil)| {
                (
                    rarity,
                    RarityRow {
                        number_of_stars: stars,
                        glow_colour: colour,
                        custom_depth_stencil: stencil,
                    },
                )
            })
            .collect();
        Self { rows }
    }

    /// Row for `rarity`, falling back to a single grey star.
    pub fn row(&self, rarity: ItemRarity) -> RarityRow {
        self.rows.get(&rarity).copied().unwrap_or(RarityRow {
            number_of_stars: 1,
            glow_colour: [1.0, 1.0, 1.0, 1.0],
            custom_depth_stencil: 250,
        })
    }
}
