//! Simulation engine: the core of the game.
//!
//! `GameEngine` owns the hecs world, the virtual-time timer service, the
//! seeded RNG and the player character. It processes queued commands,
//! dispatches due timers, runs all systems and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic
//! testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use shooter_core::commands::{EnemyAction, EnemyCommand, PlayerCommand};
use shooter_core::config::GameConfig;
use shooter_core::constants::{DT, STANDING_CAPSULE_HALF_HEIGHT};
use shooter_core::enums::{CombatState, SurfaceType};
use shooter_core::events::GameEvent;
use shooter_core::state::GameStateSnapshot;
use shooter_core::types::{SimTime, Transform};

use crate::character::Character;
use crate::context::{entity_id, SimContext};
use crate::systems::overlap::OverlapTracker;
use crate::systems::{
    anim, character_tick, combat, damage, enemy, inventory, item, item_interp, movement, overlap,
    snapshot, trace, weapon_motion,
};
use crate::timers::{TimerKey, TimerKind, Timers};
use crate::world_setup;

#[derive(Debug, Clone)]
enum QueuedCommand {
    Player(PlayerCommand),
    Enemy(EnemyCommand),
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct GameEngine {
    world: World,
    time: SimTime,
    timers: Timers,
    rng: ChaCha8Rng,
    config: GameConfig,
    character: Character,
    overlaps: OverlapTracker,
    command_queue: VecDeque<QueuedCommand>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Build the world from `config` and equip the default weapon.
    pub fn new(config: GameConfig) -> Self {
        let mut world = World::new();
        let body = world_setup::spawn_player(&mut world, &config);
        let floor_z = config.scenario.player_start.z - STANDING_CAPSULE_HALF_HEIGHT;
        let character = Character::new(
            body,
            &config.character,
            config.scenario.player_yaw,
            floor_z,
        );
        let pickups = world_setup::setup_scenario(&mut world, &config);

        let mut engine = Self {
            world,
            time: SimTime::default(),
            timers: Timers::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            character,
            overlaps: OverlapTracker::new(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        };

        engine.equip_default_weapon();
        let (_, _, mut cx) = engine.split();
        for pickup in pickups {
            item::start_pulse_timer(&mut cx, pickup);
        }
        info!(
            "Engine ready: {} entities, seed {}",
            engine.world.len(),
            engine.config.seed
        );
        engine
    }

    fn equip_default_weapon(&mut self) {
        let weapon_type = self.config.character.default_weapon;
        let hand = self.character.hand_socket_transform(&self.world);
        let weapon = world_setup::spawn_weapon(
            &mut self.world,
            &self.config,
            weapon_type,
            shooter_core::enums::ItemRarity::Common,
            hand,
        );
        let (ch, _, mut cx) = self.split();
        inventory::equip_weapon(ch, &mut cx, weapon, false);
        ch.inventory.push(weapon);
        if let Ok(mut it) = cx.world.get::<&mut shooter_core::components::Item>(weapon) {
            it.slot_index = 0;
            it.disable_custom_depth();
        }
        item::disable_glow_material(cx.world, weapon);
    }

    /// Disjoint borrows of the character, the overlap tracker and the rest.
    fn split(&mut self) -> (&mut Character, &mut OverlapTracker, SimContext<'_>) {
        (
            &mut self.character,
            &mut self.overlaps,
            SimContext {
                world: &mut self.world,
                timers: &mut self.timers,
                events: &mut self.events,
                rng: &mut self.rng,
                config: &self.config,
            },
        )
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(QueuedCommand::Player(command));
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue
            .extend(commands.into_iter().map(QueuedCommand::Player));
    }

    /// Queue an action for one enemy.
    pub fn queue_enemy_command(&mut self, command: EnemyCommand) {
        self.command_queue.push_back(QueuedCommand::Enemy(command));
    }

    /// Ask `enemy` to attack at the next tick boundary.
    pub fn enemy_attack(&mut self, enemy: Entity) {
        self.queue_enemy_command(EnemyCommand {
            enemy: entity_id(enemy),
            action: EnemyAction::Attack,
        });
    }

    /// Advance one fixed step of `DT` seconds.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.step(DT)
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn step(&mut self, dt: f64) -> GameStateSnapshot {
        let frame_dt = dt as f32;
        self.process_commands(frame_dt);

        {
            let (ch, overlaps, mut cx) = self.split();
            movement::run(ch, cx.world, frame_dt);
            overlap::run(ch, overlaps, &mut cx);
        }

        let until = self.timers.now() + dt.max(0.0);
        self.run_timers(until);

        {
            let (ch, _, mut cx) = self.split();
            character_tick::run(ch, &mut cx, frame_dt);
            item_interp::run(ch, &mut cx, frame_dt);
            item::run_pulse(cx.world, cx.timers, &cx.config.items);
            weapon_motion::run(ch, &mut cx);
            anim::update(ch, cx.world, frame_dt);
        }

        self.time.advance(dt);
        let events = std::mem::take(&mut self.events);
        snapshot::build_snapshot(&self.world, &self.time, &self.character, events)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Surface under the character's feet.
    pub fn surface_type(&self) -> SurfaceType {
        let from = self.character.location(&self.world);
        trace::surface_type(&self.config.scenario.geometry, from)
    }

    /// Apply damage to the character from an outside source.
    pub fn damage_character(&mut self, amount: f32) {
        let (ch, _, mut cx) = self.split();
        combat::take_damage(ch, &mut cx, amount);
    }

    /// Stagger the character from an outside source.
    pub fn stun_character(&mut self) {
        let (ch, _, mut cx) = self.split();
        combat::stun(ch, &mut cx);
    }

    /// Apply damage to an enemy from an outside source.
    pub fn damage_enemy(&mut self, target: Entity, amount: f32) {
        let (_, _, mut cx) = self.split();
        damage::damage_enemy(&mut cx, target, amount, None);
    }

    /// Move the character's body, e.g. for a teleport or a test setup.
    pub fn set_character_location(&mut self, location: glam::Vec3) {
        if let Ok(mut t) = self.world.get::<&mut Transform>(self.character.body) {
            t.location = location;
        }
    }

    #[cfg(test)]
    pub(crate) fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    /// Run `f` with the same borrows a system gets.
    #[cfg(test)]
    pub(crate) fn with_context<R>(
        &mut self,
        f: impl FnOnce(&mut Character, &mut SimContext<'_>) -> R,
    ) -> R {
        let (ch, _, mut cx) = self.split();
        f(ch, &mut cx)
    }

    /// Process all queued commands.
    fn process_commands(&mut self, dt: f32) {
        while let Some(command) = self.command_queue.pop_front() {
            match command {
                QueuedCommand::Player(command) => self.handle_command(command, dt),
                QueuedCommand::Enemy(command) => {
                    let (_, _, mut cx) = self.split();
                    enemy::handle_command(&mut cx, command);
                }
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand, dt: f32) {
        let (ch, _, mut cx) = self.split();
        let config = cx.config;
        let tuning = &config.character;
        match command {
            PlayerCommand::MoveForward { value } => movement::move_forward(ch, value),
            PlayerCommand::MoveRight { value } => movement::move_right(ch, value),
            PlayerCommand::Turn { value } => {
                movement::turn(ch, value, tuning.mouse_hip_scale, tuning.mouse_aiming_scale)
            }
            PlayerCommand::LookUp { value } => {
                movement::look_up(ch, value, tuning.mouse_hip_scale, tuning.mouse_aiming_scale)
            }
            PlayerCommand::TurnAtRate { rate } => movement::turn_at_rate(ch, rate, dt),
            PlayerCommand::LookUpAtRate { rate } => movement::look_up_at_rate(ch, rate, dt),
            PlayerCommand::Jump => combat::jump(ch, tuning),
            PlayerCommand::CrouchPressed => combat::crouch_button_pressed(ch, tuning),
            PlayerCommand::FirePressed => combat::fire_button_pressed(ch, &mut cx),
            PlayerCommand::FireReleased => combat::fire_button_released(ch),
            PlayerCommand::AimPressed => combat::aiming_button_pressed(ch, tuning),
            PlayerCommand::AimReleased => combat::aiming_button_released(ch, tuning),
            PlayerCommand::ReloadPressed => combat::reload_weapon(ch, &mut cx),
            PlayerCommand::SelectPressed => {
                if ch.combat_state != CombatState::Unoccupied {
                    return;
                }
                if let Some(target) = ch.trace_hit_item.take() {
                    item_interp::start_item_curve(ch, &mut cx, target, true);
                }
            }
            // Interaction happens on press only.
            PlayerCommand::SelectReleased => {}
            PlayerCommand::InventoryKey { slot } => inventory::inventory_key(ch, &mut cx, slot),
            PlayerCommand::GrabClip => combat::grab_clip(ch, &mut cx),
            PlayerCommand::ReleaseClip => combat::release_clip(ch, &mut cx),
            PlayerCommand::FinishReloading => combat::finish_reloading(ch, &mut cx),
            PlayerCommand::FinishEquipping => combat::finish_equipping(ch, tuning),
            PlayerCommand::EndStun => combat::end_stun(ch, tuning),
            PlayerCommand::AnimCurves { turning, rotation } => {
                ch.anim.turning_curve = turning;
                ch.anim.rotation_curve_input = rotation;
            }
        }
    }

    /// Dispatch every timer due by `until`, in expiry order.
    fn run_timers(&mut self, until: f64) {
        while let Some(key) = self.timers.pop_due(until) {
            let (ch, _, mut cx) = self.split();
            dispatch_timer(ch, &mut cx, key);
        }
        self.timers.settle(until);
    }
}

fn dispatch_timer(ch: &mut Character, cx: &mut SimContext, key: TimerKey) {
    debug!("Timer {:?} fired", key.kind);
    let owner = key.owner;
    match key.kind {
        TimerKind::AutoFire => combat::auto_fire_reset(ch, cx),
        TimerKind::CrosshairShoot => combat::finish_crosshair_bullet_fire(ch),
        TimerKind::PickupSound => ch.should_play_pickup_sound = true,
        TimerKind::EquipSound => ch.should_play_equip_sound = true,
        TimerKind::ItemInterp => item_interp::finish_interping(ch, cx, owner),
        TimerKind::Pulse => item::start_pulse_timer(cx, owner),
        TimerKind::ThrowWeapon => weapon_motion::stop_falling(cx, owner),
        TimerKind::Slide => weapon_motion::finish_moving_slide(cx, owner),
        TimerKind::HealthBar => enemy::hide_health_bar(cx, owner),
        TimerKind::HitReact => enemy::reset_hit_react(cx, owner),
        TimerKind::AttackWait => enemy::reset_can_attack(cx, owner),
        TimerKind::Death => enemy::destroy_enemy(cx, owner),
        TimerKind::HitNumber(id) => enemy::destroy_hit_number(cx, owner, id),
    }
}
