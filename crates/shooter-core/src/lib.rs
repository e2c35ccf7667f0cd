//! Core types and definitions for the shooter gameplay layer.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, curves, data tables,
//! configuration and constants. It has no dependency on the ECS runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod curves;
pub mod data_table;
pub mod enums;
pub mod error;
pub mod events;
pub mod math;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
