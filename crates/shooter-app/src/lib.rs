//! Headless host for the shooter simulation.
//!
//! Runs the engine on its own thread at the fixed tick rate, forwards host
//! commands to it and stands in for the animation layer by firing montage
//! notifies.

pub mod game_loop;
pub mod host;
pub mod montage_driver;
pub mod state;

pub use shooter_core as core;
