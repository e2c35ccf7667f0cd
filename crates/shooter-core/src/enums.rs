//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level mode of the player character. Gates which actions may run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatState {
    #[default]
    Unoccupied,
    /// Auto-fire cooldown window after a shot.
    FiringTimerActive,
    Reloading,
    Equipping,
    /// Only the explicit stun-end transition leaves this state.
    Stunned,
}

/// Lifecycle state of a pickup item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemState {
    /// Lying in the world, waiting to be picked up.
    #[default]
    Pickup,
    /// Flying from the world toward the character.
    EquipInterping,
    /// Held in the inventory but not in hand.
    PickedUp,
    /// In the character's hand.
    Equipped,
    /// Thrown or dropped, simulating physics.
    Falling,
}

/// Item rarity. Drives star count and glow colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemRarity {
    Damaged,
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// Ammunition calibre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AmmoType {
    #[default]
    NineMm,
    AssaultRifle,
}

/// Weapon family. Key into the weapon data table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponType {
    #[default]
    SubmachineGun,
    AssaultRifle,
    Pistol,
}

/// Aim-offset blend selection fed to the animation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffsetState {
    Aiming,
    #[default]
    Hip,
    Reloading,
    InAir,
}

/// Physical surface under a trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceType {
    #[default]
    Default,
    Grass,
    Concrete,
    Metal,
    Water,
}

/// Collision response of an item's visible mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshCollision {
    #[default]
    None,
    /// Blocks static world geometry only.
    BlockStatic,
}

/// Animation montage assets the gameplay layer asks to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Montage {
    HipFire,
    Reload,
    Equip,
    HitReact,
    EnemyHitReact,
    EnemyAttack,
    EnemyDeath,
}

/// Enemy archetypes. Each has a behavior profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Standard melee brute.
    #[default]
    Grux,
    /// Tougher variant that staggers less.
    GruxElite,
}

/// Which hand weapon of an enemy a notify refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponHand {
    Left,
    Right,
}
