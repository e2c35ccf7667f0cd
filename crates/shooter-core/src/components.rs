//! ECS components for hecs entities.
//!
//! Components are plain data. The exceptions are `Item` and `Weapon`, whose
//! state and ammo fields are only reachable through methods that keep the
//! derived flags and the magazine bounds consistent.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::data_table::{RarityRow, WeaponDataRow};
use crate::enums::*;

/// Presentation, physics and collision flags derived from an item state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProperties {
    pub mesh_visible: bool,
    pub simulate_physics: bool,
    pub gravity: bool,
    pub mesh_collision: MeshCollision,
    /// Pickup trigger generates overlaps with the character.
    pub area_overlap: bool,
    /// Collision box blocks the visibility channel (crosshair traces).
    pub blocks_visibility: bool,
}

impl ItemProperties {
    /// The full property row for `state`.
    pub fn for_state(state: ItemState) -> Self {
        match state {
            ItemState::Pickup => Self {
                mesh_visible: true,
                simulate_physics: false,
                gravity: false,
                mesh_collision: MeshCollision::None,
                area_overlap: true,
                blocks_visibility: true,
            },
            ItemState::EquipInterping => Self {
                mesh_visible: true,
                simulate_physics: false,
                gravity: false,
                mesh_collision: MeshCollision::None,
                area_overlap: false,
                blocks_visibility: false,
            },
            ItemState::PickedUp => Self {
                mesh_visible: false,
                simulate_physics: false,
                gravity: false,
                mesh_collision: MeshCollision::None,
                area_overlap: false,
                blocks_visibility: false,
            },
            ItemState::Equipped => Self {
                mesh_visible: true,
                simulate_physics: false,
                gravity: false,
                mesh_collision: MeshCollision::None,
                area_overlap: false,
                blocks_visibility: false,
            },
            ItemState::Falling => Self {
                mesh_visible: true,
                simulate_physics: true,
                gravity: true,
                mesh_collision: MeshCollision::BlockStatic,
                area_overlap: true,
                blocks_visibility: true,
            },
        }
    }
}

/// Progress of an item flying toward the character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemInterp {
    pub interping: bool,
    /// World location when the flight started.
    pub start_location: Vec3,
    /// Interpolation destination slot the item holds a reservation on.
    pub slot: usize,
    /// Item yaw minus camera yaw at the start of the flight.
    pub yaw_offset: f32,
}

/// Kind-specific item data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ItemKind {
    Weapon(Weapon),
    Ammo(AmmoPickup),
}

/// A pickup-able item: weapon or ammo box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Rounds in an ammo box; 0 for weapons.
    pub count: u32,
    pub rarity: ItemRarity,
    /// Star icons lit on the pickup widget.
    pub active_stars: [bool; 5],
    /// Inventory index once picked up.
    pub slot_index: usize,
    pub kind: ItemKind,
    pub interp: ItemInterp,
    /// Pickup widget shown by the character's crosshair focus.
    pub widget_visible: bool,
    /// Outline rendering on.
    pub custom_depth: bool,
    /// Outline may be toggled (false while flying to the character).
    pub can_change_custom_depth: bool,
    /// Character's inventory was full when this item was last focused.
    pub inventory_full: bool,
    pub pickup_sound: Option<String>,
    pub equip_sound: Option<String>,
    state: ItemState,
    properties: ItemProperties,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind, rarity: ItemRarity, stars: u8) -> Self {
        let mut active_stars = [false; 5];
        for star in active_stars.iter_mut().take(stars as usize) {
            *star = true;
        }
        Self {
            name: name.into(),
            count: 0,
            rarity,
            active_stars,
            slot_index: 0,
            kind,
            interp: ItemInterp::default(),
            widget_visible: false,
            custom_depth: false,
            can_change_custom_depth: true,
            inventory_full: false,
            pickup_sound: None,
            equip_sound: None,
            state: ItemState::Pickup,
            properties: ItemProperties::for_state(ItemState::Pickup),
        }
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn properties(&self) -> ItemProperties {
        self.properties
    }

    /// Change state and reapply the full property row.
    pub fn set_state(&mut self, state: ItemState) {
        self.state = state;
        self.properties = ItemProperties::for_state(state);
        if state != ItemState::Pickup {
            self.widget_visible = false;
        }
    }

    pub fn enable_custom_depth(&mut self) {
        if self.can_change_custom_depth {
            self.custom_depth = true;
        }
    }

    pub fn disable_custom_depth(&mut self) {
        if self.can_change_custom_depth {
            self.custom_depth = false;
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon(_))
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        match &self.kind {
            ItemKind::Weapon(weapon) => Some(weapon),
            ItemKind::Ammo(_) => None,
        }
    }

    pub fn weapon_mut(&mut self) -> Option<&mut Weapon> {
        match &mut self.kind {
            ItemKind::Weapon(weapon) => Some(weapon),
            ItemKind::Ammo(_) => None,
        }
    }

    pub fn ammo(&self) -> Option<&AmmoPickup> {
        match &self.kind {
            ItemKind::Ammo(ammo) => Some(ammo),
            ItemKind::Weapon(_) => None,
        }
    }

    pub fn ammo_mut(&mut self) -> Option<&mut AmmoPickup> {
        match &mut self.kind {
            ItemKind::Ammo(ammo) => Some(ammo),
            ItemKind::Weapon(_) => None,
        }
    }
}

/// Weapon stats and per-weapon animation feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub weapon_type: WeaponType,
    pub ammo_type: AmmoType,
    ammo: u32,
    magazine_capacity: u32,
    pub automatic: bool,
    pub damage: f32,
    pub headshot_damage: f32,
    /// Seconds between automatic shots.
    pub auto_fire_rate: f64,
    pub reload_montage_section: String,
    pub clip_bone_name: String,
    pub bone_to_hide: Option<String>,
    pub fire_sound: Option<String>,
    pub muzzle_flash: Option<String>,
    /// Barrel socket in weapon space. None if the mesh has no barrel socket.
    pub muzzle_offset: Option<Vec3>,
    /// Magazine is in the character's hand during a reload.
    pub moving_clip: bool,
    /// Thrown and not yet settled.
    pub falling: bool,
    /// Impulse applied by the last throw.
    pub last_impulse: Option<Vec3>,
    pub moving_slide: bool,
    pub slide_displacement: f32,
    pub recoil_rotation: f32,
}

impl Weapon {
    /// Build a weapon from its data-table row, or stock defaults if absent.
    pub fn from_row(weapon_type: WeaponType, row: Option<&WeaponDataRow>) -> Self {
        let mut weapon = Self {
            weapon_type,
            ammo_type: AmmoType::NineMm,
            ammo: DEFAULT_WEAPON_AMMO,
            magazine_capacity: DEFAULT_MAGAZINE_CAPACITY,
            automatic: true,
            damage: DEFAULT_WEAPON_DAMAGE,
            headshot_damage: DEFAULT_HEADSHOT_DAMAGE,
            auto_fire_rate: DEFAULT_AUTO_FIRE_RATE,
            reload_montage_section: "ReloadSMG".to_string(),
            clip_bone_name: "smg_clip".to_string(),
            bone_to_hide: None,
            fire_sound: None,
            muzzle_flash: None,
            muzzle_offset: Some(Vec3::new(60.0, 0.0, 10.0)),
            moving_clip: false,
            falling: false,
            last_impulse: None,
            moving_slide: false,
            slide_displacement: 0.0,
            recoil_rotation: 0.0,
        };
        if let Some(row) = row {
            weapon.ammo_type = row.ammo_type;
            weapon.magazine_capacity = row.magazine_capacity;
            weapon.ammo = row.weapon_ammo.min(row.magazine_capacity);
            weapon.automatic = row.automatic;
            weapon.damage = row.damage;
            weapon.headshot_damage = row.headshot_damage;
            weapon.auto_fire_rate = row.auto_fire_rate;
            weapon.reload_montage_section = row.reload_montage_section.clone();
            weapon.clip_bone_name = row.clip_bone_name.clone();
            weapon.bone_to_hide = row.bone_to_hide.clone();
            weapon.fire_sound = row.fire_sound.clone();
            weapon.muzzle_flash = row.muzzle_flash.clone();
            weapon.muzzle_offset = row.muzzle_offset;
        }
        weapon
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn magazine_capacity(&self) -> u32 {
        self.magazine_capacity
    }

    pub fn has_ammo(&self) -> bool {
        self.ammo > 0
    }

    pub fn clip_is_full(&self) -> bool {
        self.ammo >= self.magazine_capacity
    }

    /// Rounds the magazine can still take.
    pub fn empty_space(&self) -> u32 {
        self.magazine_capacity.saturating_sub(self.ammo)
    }

    /// Spend one round; never drops below zero.
    pub fn decrement_ammo(&mut self) {
        self.ammo = self.ammo.saturating_sub(1);
    }

    /// Load `amount` rounds. Overfilling is a caller bug.
    pub fn reload_ammo(&mut self, amount: u32) {
        debug_assert!(
            self.ammo + amount <= self.magazine_capacity,
            "reload of {} rounds overflows magazine ({}/{})",
            amount,
            self.ammo,
            self.magazine_capacity
        );
        self.ammo = (self.ammo + amount).min(self.magazine_capacity);
    }
}

/// Ammo box data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoPickup {
    pub ammo_type: AmmoType,
    /// Auto-collect sphere still armed.
    pub collect_sphere_enabled: bool,
}

/// Dynamic glow material parameters written by the pulse system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    /// Dynamic material instance is active.
    pub enabled: bool,
    /// 0 = glowing, 1 = plain.
    pub glow_blend_alpha: f32,
    pub glow_amount: f32,
    pub fresnel_exponent: f32,
    pub fresnel_reflect_fraction: f32,
    pub colour: [f32; 4],
}

impl Glow {
    pub fn from_rarity(row: &RarityRow) -> Self {
        Self {
            enabled: true,
            glow_blend_alpha: 0.0,
            glow_amount: GLOW_AMOUNT,
            fresnel_exponent: FRESNEL_EXPONENT,
            fresnel_reflect_fraction: FRESNEL_REFLECT_FRACTION,
            colour: row.glow_colour,
        }
    }
}

/// One trace-able sphere of an actor's collision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderShape {
    /// Bone reported when this shape is hit.
    pub bone: Option<String>,
    /// Centre relative to the actor location.
    pub offset: Vec3,
    pub radius: f32,
}

/// Trace collision of an actor against the visibility channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub shapes: Vec<ColliderShape>,
}

impl Collider {
    pub fn sphere(radius: f32) -> Self {
        Self {
            shapes: vec![ColliderShape {
                bone: None,
                offset: Vec3::ZERO,
                radius,
            }],
        }
    }
}

/// Static world geometry box, tagged with its surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticBox {
    pub min: Vec3,
    pub max: Vec3,
    #[serde(default)]
    pub surface: SurfaceType,
}

/// Hit points with a floor of zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Subtract `amount`, clamping at zero. Returns true if health is now zero.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        if self.current - amount <= 0.0 {
            self.current = 0.0;
        } else {
            self.current -= amount;
        }
        self.current <= 0.0
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Marker for the player character's body entity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerBody;

/// Floating damage number shown over an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitNumber {
    pub id: u32,
    pub damage: f32,
    pub location: Vec3,
    pub headshot: bool,
}

/// Melee enemy state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub archetype: EnemyArchetype,
    pub health: Health,
    pub head_bone: String,
    pub stun_chance: f32,
    pub base_damage: f32,
    pub attack_wait_time: f64,
    pub health_bar_display_time: f64,
    pub hit_react_time: (f64, f64),
    pub death_time: f64,
    /// Death has started; further damage effects are ignored.
    pub dying: bool,
    pub stunned: bool,
    pub can_hit_react: bool,
    pub can_attack: bool,
    pub in_attack_range: bool,
    pub health_bar_visible: bool,
    pub movement_stopped: bool,
    pub animations_paused: bool,
    pub left_weapon_active: bool,
    pub right_weapon_active: bool,
    /// A weapon box already struck during the current activation.
    pub left_weapon_struck: bool,
    pub right_weapon_struck: bool,
    pub patrol_point: Vec3,
    pub patrol_point_2: Vec3,
    pub hit_numbers: Vec<HitNumber>,
    pub next_hit_number_id: u32,
    pub impact_sound: Option<String>,
    pub impact_particles: Option<String>,
    pub agro_radius: f32,
    pub combat_range: f32,
    pub weapon_reach: f32,
}

/// Barrel that blows up when shot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosive {
    pub damage: f32,
    /// Characters and enemies within this radius are damaged.
    pub radius: f32,
    pub impact_sound: Option<String>,
    pub explode_particles: Option<String>,
}

impl Default for Explosive {
    fn default() -> Self {
        Self {
            damage: EXPLOSIVE_DAMAGE,
            radius: EXPLOSIVE_RADIUS,
            impact_sound: Some("ExplosionSound".to_string()),
            explode_particles: Some("Explosion".to_string()),
        }
    }
}
