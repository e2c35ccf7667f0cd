use std::time::Duration;

use log::{error, info};

use shooter_app::host;
use shooter_app::state::AppState;
use shooter_core::commands::PlayerCommand;
use shooter_core::config::GameConfig;

/// Scripted input: wait, then send.
const DEMO_SCRIPT: &[(u64, PlayerCommand)] = &[
    (200, PlayerCommand::AimPressed),
    (300, PlayerCommand::FirePressed),
    (1200, PlayerCommand::FireReleased),
    (100, PlayerCommand::AimReleased),
    (100, PlayerCommand::ReloadPressed),
    (1500, PlayerCommand::MoveForward { value: 1.0 }),
    (500, PlayerCommand::MoveForward { value: 0.0 }),
    (800, PlayerCommand::InventoryKey { slot: 0 }),
];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let state = AppState::new();
    if let Err(e) = host::start_simulation(&state, config) {
        error!("{}", e);
        std::process::exit(1);
    }

    for (wait_ms, command) in DEMO_SCRIPT {
        std::thread::sleep(Duration::from_millis(*wait_ms));
        info!("Input: {:?}", command);
        if let Err(e) = host::send_command(&state, command.clone()) {
            error!("{}", e);
            break;
        }
    }
    std::thread::sleep(Duration::from_millis(500));

    match host::get_snapshot(&state) {
        Ok(Some(snapshot)) => {
            let summary = serde_json::json!({
                "tick": snapshot.time.tick,
                "location": snapshot.character.location,
                "combat_state": snapshot.character.combat_state,
                "health": snapshot.character.health,
                "equipped_slot": snapshot.character.equipped_slot,
                "inventory": snapshot.inventory,
                "carried_ammo": snapshot.character.ammo,
                "enemies": snapshot.enemies,
            });
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{}", json),
                Err(e) => error!("Failed to serialize summary: {}", e),
            }
        }
        Ok(None) => error!("No snapshot produced"),
        Err(e) => error!("{}", e),
    }

    if let Err(e) = host::shutdown(&state) {
        error!("{}", e);
    }
}
