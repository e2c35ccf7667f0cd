//! Gameplay systems. Each module exposes free functions the engine calls
//! from input handlers, timer callbacks or the per-frame tick.

pub mod anim;
pub mod ballistics;
pub mod character_tick;
pub mod combat;
pub mod damage;
pub mod enemy;
pub mod inventory;
pub mod item;
pub mod item_interp;
pub mod item_trace;
pub mod movement;
pub mod overlap;
pub mod snapshot;
pub mod trace;
pub mod weapon_motion;
