//! Enemy rules for the shooter gameplay layer.
//!
//! Implements the melee enemy's damage, stun and death rules, attack
//! section choice, archetype profiles and the blackboard the external
//! behavior tree reads.

pub mod blackboard;
pub mod profiles;
pub mod rules;

pub use shooter_core as core;
