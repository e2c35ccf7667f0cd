//! Mutable view of the engine handed to systems that need more than the world.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use shooter_core::config::GameConfig;
use shooter_core::events::GameEvent;
use shooter_core::types::EntityId;

use crate::timers::{TimerKey, TimerKind, Timers};

/// Borrowed engine state for one system call.
pub struct SimContext<'a> {
    pub world: &'a mut World,
    pub timers: &'a mut Timers,
    pub events: &'a mut Vec<GameEvent>,
    pub rng: &'a mut ChaCha8Rng,
    pub config: &'a GameConfig,
}

impl SimContext<'_> {
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn arm(&mut self, owner: Entity, kind: TimerKind, delay: f64) {
        self.timers.arm_once(TimerKey::new(owner, kind), delay);
    }

    pub fn cancel(&mut self, owner: Entity, kind: TimerKind) {
        self.timers.cancel(TimerKey::new(owner, kind));
    }

    pub fn elapsed(&self, owner: Entity, kind: TimerKind) -> Option<f64> {
        self.timers.elapsed(TimerKey::new(owner, kind))
    }

    /// Remove an actor and every timer it owns.
    pub fn destroy(&mut self, entity: Entity) {
        self.timers.cancel_owner(entity);
        if self.world.despawn(entity).is_ok() {
            self.events.push(GameEvent::ActorDestroyed {
                actor: entity_id(entity),
            });
        }
    }
}

/// Stable id of an entity for events and snapshots.
pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// Entity for an id received from the host.
pub fn entity_from_id(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
