//! Game loop thread: runs the engine at the fixed tick rate.
//!
//! The engine is created inside this thread. Commands arrive via an `mpsc`
//! channel; the latest snapshot is stored in shared state for polling.
//! Montage notifies are fed back into the engine before each tick.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use shooter_core::config::GameConfig;
use shooter_core::constants::TICK_RATE;
use shooter_core::state::GameStateSnapshot;
use shooter_sim::GameEngine;

use crate::montage_driver::{MontageDriver, Notify};
use crate::state::GameLoopCommand;

/// Wall-clock duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: GameConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("shooter-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    config: GameConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = GameEngine::new(config);
    let mut montages = MontageDriver::new();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Pending host commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::EnemyCommand(cmd)) => engine.queue_enemy_command(cmd),
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Animation notifies that came due
        feed_notifies(&mut engine, &mut montages);

        // 3. Advance one tick
        let snapshot = engine.tick();
        montages.observe(snapshot.time.elapsed_secs, &snapshot.events);

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until the next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            log::warn!("Game loop fell behind by {:?}", now - next_tick_time);
            next_tick_time = now;
        }
    }
}

/// Queue every due montage notify on the engine.
pub fn feed_notifies(engine: &mut GameEngine, montages: &mut MontageDriver) {
    for notify in montages.due(engine.time().elapsed_secs) {
        match notify {
            Notify::Player(cmd) => engine.queue_command(cmd),
            Notify::Enemy(cmd) => engine.queue_enemy_command(cmd),
        }
    }
}
