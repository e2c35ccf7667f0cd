//! Host-facing operations on a running simulation.
//!
//! These bridge caller requests to the game loop thread via its channel.

use thiserror::Error;

use shooter_core::commands::{EnemyCommand, PlayerCommand};
use shooter_core::config::GameConfig;
use shooter_core::state::GameStateSnapshot;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Host operation errors.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Simulation already running")]
    AlreadyRunning,

    #[error("Simulation not started")]
    NotStarted,

    #[error("Failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Game loop has stopped")]
    Disconnected,

    #[error("Host state lock poisoned")]
    Poisoned,
}

/// Start the simulation thread if it is not already running.
pub fn start_simulation(state: &AppState, config: GameConfig) -> Result<(), HostError> {
    let mut running = state.running.lock().map_err(|_| HostError::Poisoned)?;
    if *running {
        return Err(HostError::AlreadyRunning);
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())?;

    *state.command_tx.lock().map_err(|_| HostError::Poisoned)? = Some(cmd_tx);
    *state.loop_thread.lock().map_err(|_| HostError::Poisoned)? = Some(handle);
    *running = true;
    log::info!("Simulation started");
    Ok(())
}

fn send(state: &AppState, command: GameLoopCommand) -> Result<(), HostError> {
    let tx_lock = state.command_tx.lock().map_err(|_| HostError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| HostError::Disconnected),
        None => Err(HostError::NotStarted),
    }
}

/// Send a player input to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), HostError> {
    send(state, GameLoopCommand::PlayerCommand(command))
}

/// Send an AI action for one enemy.
pub fn send_enemy_command(state: &AppState, command: EnemyCommand) -> Result<(), HostError> {
    send(state, GameLoopCommand::EnemyCommand(command))
}

/// Latest snapshot, if a tick has run.
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, HostError> {
    let lock = state.latest_snapshot.lock().map_err(|_| HostError::Poisoned)?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for its thread to exit.
pub fn shutdown(state: &AppState) -> Result<(), HostError> {
    let mut running = state.running.lock().map_err(|_| HostError::Poisoned)?;
    if !*running {
        return Err(HostError::NotStarted);
    }
    if let Some(tx) = state.command_tx.lock().map_err(|_| HostError::Poisoned)?.take() {
        // The loop may already have exited on its own.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    if let Some(handle) = state.loop_thread.lock().map_err(|_| HostError::Poisoned)?.take() {
        if handle.join().is_err() {
            log::error!("Game loop thread panicked");
        }
    }
    *running = false;
    log::info!("Simulation stopped");
    Ok(())
}
