//! Virtual-time timer service.
//!
//! One live timer per `(owner, kind)`. Arming a key that is already armed
//! replaces it. The engine advances the clock each tick and dispatches due
//! timers in expiry order (ties in arming order), moving the clock to each
//! expiry before its callback runs so callbacks may re-arm.

use std::collections::HashMap;

use hecs::Entity;
use serde::{Deserialize, Serialize};

/// Purpose of a timer. Together with the owner it forms the timer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Character: auto-fire cooldown.
    AutoFire,
    /// Character: "firing" crosshair flag.
    CrosshairShoot,
    /// Character: pickup sound rate limit.
    PickupSound,
    /// Character: equip sound rate limit.
    EquipSound,
    /// Item: flight to the character.
    ItemInterp,
    /// Item: idle glow pulse period.
    Pulse,
    /// Weapon: thrown and settling.
    ThrowWeapon,
    /// Weapon: pistol slide cycle.
    Slide,
    /// Enemy: health bar display.
    HealthBar,
    /// Enemy: hit-react cooldown.
    HitReact,
    /// Enemy: wait between attacks.
    AttackWait,
    /// Enemy: removal after the death montage.
    Death,
    /// Enemy: one floating damage number.
    HitNumber(u32),
}

/// Handle of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerKey {
    pub owner: Entity,
    pub kind: TimerKind,
}

impl TimerKey {
    pub fn new(owner: Entity, kind: TimerKind) -> Self {
        Self { owner, kind }
    }
}

#[derive(Debug, Clone, Copy)]
struct ArmedTimer {
    armed_at: f64,
    expires_at: f64,
    seq: u64,
}

#[derive(Debug, Default)]
pub struct Timers {
    now: f64,
    next_seq: u64,
    armed: HashMap<TimerKey, ArmedTimer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Arm `key` to fire once after `delay` seconds, replacing any armed
    /// instance. A non-positive delay just cancels.
    pub fn arm_once(&mut self, key: TimerKey, delay: f64) {
        if delay <= 0.0 {
            self.cancel(key);
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.armed.insert(
            key,
            ArmedTimer {
                armed_at: self.now,
                expires_at: self.now + delay,
                seq,
            },
        );
    }

    /// Cancel `key`. Returns true if it was armed.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.armed.remove(&key).is_some()
    }

    /// Cancel every timer owned by `owner`.
    pub fn cancel_owner(&mut self, owner: Entity) {
        self.armed.retain(|key, _| key.owner != owner);
    }

    pub fn is_active(&self, key: TimerKey) -> bool {
        self.armed.contains_key(&key)
    }

    /// Seconds since `key` was armed, or None if it is not armed.
    pub fn elapsed(&self, key: TimerKey) -> Option<f64> {
        self.armed.get(&key).map(|t| self.now - t.armed_at)
    }

    /// Seconds until `key` fires, or None if it is not armed.
    pub fn remaining(&self, key: TimerKey) -> Option<f64> {
        self.armed.get(&key).map(|t| t.expires_at - self.now)
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its expiry.
    pub fn pop_due(&mut self, until: f64) -> Option<TimerKey> {
        let (key, timer) = self
            .armed
            .iter()
            .filter(|(_, t)| t.expires_at <= until)
            .min_by(|(_, a), (_, b)| {
                a.expires_at
                    .total_cmp(&b.expires_at)
                    .then(a.seq.cmp(&b.seq))
            })
            .map(|(k, t)| (*k, *t))?;
        self.armed.remove(&key);
        if timer.expires_at > self.now {
            self.now = timer.expires_at;
        }
        Some(key)
    }

    /// Move the clock forward to `until` once every due timer has fired.
    pub fn settle(&mut self, until: f64) {
        if until > self.now {
            self.now = until;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    fn owners() -> (Entity, Entity) {
        let mut world = World::new();
        (world.spawn(()), world.spawn(()))
    }

    #[test]
    fn test_arm_replaces_existing() {
        let (a, _) = owners();
        let mut timers = Timers::new();
        let key = TimerKey::new(a, TimerKind::Pulse);
        timers.arm_once(key, 1.0);
        timers.settle(0.5);
        timers.arm_once(key, 1.0);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.elapsed(key), Some(0.0));
        assert!(timers.pop_due(1.2).is_none(), "replaced timer fired early");
        assert_eq!(timers.pop_due(1.5), Some(key));
    }

    #[test]
    fn test_non_positive_delay_cancels() {
        let (a, _) = owners();
        let mut timers = Timers::new();
        let key = TimerKey::new(a, TimerKind::AutoFire);
        timers.arm_once(key, 0.3);
        timers.arm_once(key, 0.0);
        assert!(!timers.is_active(key));
    }

    #[test]
    fn test_pop_due_in_expiry_then_arm_order() {
        let (a, b) = owners();
        let mut timers = Timers::new();
        let late = TimerKey::new(a, TimerKind::Slide);
        let first = TimerKey::new(a, TimerKind::AutoFire);
        let tied = TimerKey::new(b, TimerKind::AutoFire);
        timers.arm_once(late, 0.5);
        timers.arm_once(first, 0.1);
        timers.arm_once(tied, 0.1);

        assert_eq!(timers.pop_due(1.0), Some(first));
        assert!((timers.now() - 0.1).abs() < 1e-12);
        assert_eq!(timers.pop_due(1.0), Some(tied));
        assert_eq!(timers.pop_due(1.0), Some(late));
        assert_eq!(timers.pop_due(1.0), None);
        timers.settle(1.0);
        assert_eq!(timers.now(), 1.0);
    }

    #[test]
    fn test_elapsed_and_remaining() {
        let (a, _) = owners();
        let mut timers = Timers::new();
        let key = TimerKey::new(a, TimerKind::ItemInterp);
        timers.arm_once(key, 0.7);
        timers.settle(0.25);
        assert!((timers.elapsed(key).unwrap() - 0.25).abs() < 1e-12);
        assert!((timers.remaining(key).unwrap() - 0.45).abs() < 1e-12);
        timers.cancel(key);
        assert_eq!(timers.elapsed(key), None);
    }

    #[test]
    fn test_cancel_owner() {
        let (a, b) = owners();
        let mut timers = Timers::new();
        timers.arm_once(TimerKey::new(a, TimerKind::Pulse), 1.0);
        timers.arm_once(TimerKey::new(a, TimerKind::HitNumber(3)), 1.0);
        timers.arm_once(TimerKey::new(b, TimerKind::Pulse), 1.0);
        timers.cancel_owner(a);
        assert_eq!(timers.len(), 1);
        assert!(timers.is_active(TimerKey::new(b, TimerKind::Pulse)));
    }
}
