//! Stand-in for the animation layer.
//!
//! Watches `PlayMontage` events and fires the notifies an animation graph
//! would fire, after fixed delays in simulation time. Starting a montage on
//! an actor interrupts whatever that actor was playing, dropping its
//! outstanding notifies.

use shooter_core::commands::{EnemyAction, EnemyCommand, PlayerCommand};
use shooter_core::enums::{Montage, WeaponHand};
use shooter_core::events::GameEvent;
use shooter_core::types::EntityId;

pub const GRAB_CLIP_AT: f64 = 0.4;
pub const RELEASE_CLIP_AT: f64 = 1.0;
pub const RELOAD_LENGTH: f64 = 1.3;
pub const EQUIP_LENGTH: f64 = 0.5;
pub const HIT_REACT_LENGTH: f64 = 0.6;
pub const ENEMY_HIT_REACT_LENGTH: f64 = 0.7;
/// Weapon collision window inside an attack section (start, end).
pub const ATTACK_ACTIVE_WINDOW: (f64, f64) = (0.3, 0.5);
pub const DEATH_LENGTH: f64 = 1.5;

/// A notify due for the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Notify {
    Player(PlayerCommand),
    Enemy(EnemyCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Player,
    Enemy(EntityId),
}

#[derive(Debug)]
struct Pending {
    at: f64,
    seq: u64,
    owner: Owner,
    notify: Notify,
}

/// Schedules montage notifies.
#[derive(Debug, Default)]
pub struct MontageDriver {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl MontageDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notifies not yet fired.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Schedule notifies for every montage started in `events`.
    pub fn observe(&mut self, now: f64, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::PlayMontage {
                actor,
                montage,
                section,
                ..
            } = event
            {
                self.start_montage(now, *actor, *montage, section);
            }
        }
    }

    /// Remove and return every notify due at or before `now`, in firing order.
    pub fn due(&mut self, now: f64) -> Vec<Notify> {
        let (mut ready, rest): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.at <= now);
        self.pending = rest;
        ready.sort_by(|a, b| a.at.total_cmp(&b.at).then(a.seq.cmp(&b.seq)));
        ready.into_iter().map(|p| p.notify).collect()
    }

    fn start_montage(&mut self, now: f64, actor: EntityId, montage: Montage, section: &str) {
        match montage {
            Montage::HipFire => {}
            Montage::Reload => {
                self.interrupt(Owner::Player);
                self.player(now + GRAB_CLIP_AT, PlayerCommand::GrabClip);
                self.player(now + RELEASE_CLIP_AT, PlayerCommand::ReleaseClip);
                self.player(now + RELOAD_LENGTH, PlayerCommand::FinishReloading);
            }
            Montage::Equip => {
                self.interrupt(Owner::Player);
                self.player(now + EQUIP_LENGTH, PlayerCommand::FinishEquipping);
            }
            Montage::HitReact => {
                self.interrupt(Owner::Player);
                self.player(now + HIT_REACT_LENGTH, PlayerCommand::EndStun);
            }
            Montage::EnemyHitReact => {
                self.interrupt(Owner::Enemy(actor));
                self.enemy(now + ENEMY_HIT_REACT_LENGTH, actor, EnemyAction::EndHitReact);
            }
            Montage::EnemyAttack => {
                self.interrupt(Owner::Enemy(actor));
                let hand = attack_hand(section);
                let (start, end) = ATTACK_ACTIVE_WINDOW;
                self.enemy(now + start, actor, EnemyAction::ActivateWeapon { hand });
                self.enemy(now + end, actor, EnemyAction::DeactivateWeapon { hand });
            }
            Montage::EnemyDeath => {
                self.interrupt(Owner::Enemy(actor));
                self.enemy(now + DEATH_LENGTH, actor, EnemyAction::FinishDeath);
            }
        }
    }

    fn interrupt(&mut self, owner: Owner) {
        self.pending.retain(|p| p.owner != owner);
    }

    fn player(&mut self, at: f64, command: PlayerCommand) {
        self.push(at, Owner::Player, Notify::Player(command));
    }

    fn enemy(&mut self, at: f64, enemy: EntityId, action: EnemyAction) {
        self.push(
            at,
            Owner::Enemy(enemy),
            Notify::Enemy(EnemyCommand { enemy, action }),
        );
    }

    fn push(&mut self, at: f64, owner: Owner, notify: Notify) {
        self.pending.push(Pending {
            at,
            seq: self.next_seq,
            owner,
            notify,
        });
        self.next_seq += 1;
    }
}

/// Which weapon an attack section swings.
fn attack_hand(section: &str) -> WeaponHand {
    if section.starts_with("AttackL") {
        WeaponHand::Left
    } else {
        WeaponHand::Right
    }
}
