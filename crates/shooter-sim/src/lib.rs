//! Headless gameplay simulation.
//!
//! Owns the hecs ECS world, the timer service and the player character,
//! runs systems in a fixed order each tick and produces GameStateSnapshots
//! for the host.

pub mod character;
pub mod context;
pub mod engine;
pub mod systems;
pub mod timers;
pub mod world_setup;

pub use engine::GameEngine;
pub use shooter_core as core;

#[cfg(test)]
mod tests;
