//! Named-key store shared with the behavior tree.
//!
//! The gameplay layer only writes; every write is also queued so the
//! simulation can forward it to the host as an event.

use std::collections::BTreeMap;

use glam::Vec3;

use shooter_core::types::{BlackboardValue, EntityId};

/// Blackboard key names the behavior tree reads.
pub mod keys {
    pub const PATROL_POINT: &str = "PatrolPoint";
    pub const PATROL_POINT_2: &str = "PatrolPoint2";
    pub const CAN_ATTACK: &str = "CanAttack";
    pub const TARGET: &str = "Target";
    pub const STUNNED: &str = "Stunned";
    pub const IN_ATTACK_RANGE: &str = "InAttackRange";
    pub const DEAD: &str = "Dead";
}

#[derive(Debug, Clone, Default)]
pub struct Blackboard {
    values: BTreeMap<String, BlackboardValue>,
    pending: Vec<(String, BlackboardValue)>,
}

impl Blackboard {
    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, BlackboardValue::Bool(value));
    }

    pub fn set_vector(&mut self, key: &str, value: Vec3) {
        self.set(key, BlackboardValue::Vector(value));
    }

    pub fn set_object(&mut self, key: &str, value: Option<EntityId>) {
        self.set(key, BlackboardValue::Object(value));
    }

    pub fn get(&self, key: &str) -> Option<BlackboardValue> {
        self.values.get(key).copied()
    }

    /// Bool value of `key`; unset keys read as false.
    pub fn get_bool(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(BlackboardValue::Bool(true)))
    }

    pub fn get_object(&self, key: &str) -> Option<EntityId> {
        match self.values.get(key) {
            Some(BlackboardValue::Object(value)) => *value,
            _ => None,
        }
    }

    /// Writes since the last drain, in order.
    pub fn drain_writes(&mut self) -> Vec<(String, BlackboardValue)> {
        std::mem::take(&mut self.pending)
    }

    fn set(&mut self, key: &str, value: BlackboardValue) {
        self.values.insert(key.to_string(), value);
        self.pending.push((key.to_string(), value));
    }
}
