//! Commands fed into the simulation by the host.
//!
//! Input edges, animation notifies and AI actions are all queued and
//! processed at the next tick boundary, before any timers or per-frame work.

use serde::{Deserialize, Serialize};

use crate::enums::WeaponHand;
use crate::types::EntityId;

/// Player input and the player's animation notifies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Movement and look ---
    /// Forward/back axis in [-1, 1]. Held until changed.
    MoveForward { value: f32 },
    /// Right/left axis in [-1, 1]. Held until changed.
    MoveRight { value: f32 },
    /// Mouse yaw delta, scaled by hip/aim sensitivity.
    Turn { value: f32 },
    /// Mouse pitch delta, scaled by hip/aim sensitivity.
    LookUp { value: f32 },
    /// Gamepad yaw rate in [-1, 1] for this frame.
    TurnAtRate { rate: f32 },
    /// Gamepad pitch rate in [-1, 1] for this frame.
    LookUpAtRate { rate: f32 },
    Jump,
    CrouchPressed,

    // --- Combat ---
    FirePressed,
    FireReleased,
    AimPressed,
    AimReleased,
    ReloadPressed,

    // --- Items ---
    SelectPressed,
    SelectReleased,
    /// Inventory hot key: F = 0, number keys 1..5.
    InventoryKey { slot: usize },

    // --- Animation notifies ---
    GrabClip,
    ReleaseClip,
    FinishReloading,
    FinishEquipping,
    EndStun,
    /// Turn-in-place curve values sampled by the animation graph.
    AnimCurves { turning: f32, rotation: f32 },
}

/// Actions for one enemy, issued by the behavior tree or its notifies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EnemyAction {
    /// Play a random attack section if the enemy may attack.
    Attack,
    ActivateWeapon { hand: WeaponHand },
    DeactivateWeapon { hand: WeaponHand },
    /// Hit-react montage finished; clear the stunned flag.
    EndHitReact,
    /// Death montage finished; freeze and schedule removal.
    FinishDeath,
}

/// An action addressed to a specific enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyCommand {
    pub enemy: EntityId,
    pub action: EnemyAction,
}
