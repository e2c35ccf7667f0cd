//! Presentation side effects emitted by the simulation.
//!
//! The core never plays sounds, spawns particles or drives animation itself.
//! It records what should happen, and the host drains the events after each
//! tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::Montage;
use crate::types::{BlackboardValue, EntityId};

/// A side effect for the host's audio, VFX, animation or UI layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    PlaySound {
        cue: String,
        location: Option<Vec3>,
    },
    SpawnParticles {
        effect: String,
        location: Vec3,
    },
    /// Tracer from the muzzle to the resolved hit point.
    SpawnBeam { start: Vec3, end: Vec3 },
    PlayMontage {
        actor: EntityId,
        montage: Montage,
        section: String,
        rate: f32,
    },
    AttachToSocket { item: EntityId, socket: String },
    Detach { item: EntityId },
    /// Left-hand helper follows the magazine bone during a reload.
    AttachHandHelper { weapon: EntityId, bone: String },
    DetachHandHelper { weapon: EntityId },
    AddImpulse { entity: EntityId, impulse: Vec3 },
    /// Equipped weapon changed; `from_slot` is None for the first equip.
    EquipItem {
        from_slot: Option<usize>,
        to_slot: usize,
    },
    /// Inventory slot highlight toggled; `slot` is None when the inventory is full.
    HighlightSlot { slot: Option<usize>, highlighted: bool },
    HitNumber {
        enemy: EntityId,
        damage: f32,
        location: Vec3,
        headshot: bool,
    },
    HealthBar { enemy: EntityId, visible: bool },
    BlackboardSet {
        enemy: EntityId,
        key: String,
        value: BlackboardValue,
    },
    StopMovement { enemy: EntityId },
    PauseAnimations { enemy: EntityId },
    CharacterDamaged { amount: f32, health: f32 },
    ActorDestroyed { actor: EntityId },
}
