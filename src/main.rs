//! Platformer Sim entry point
//!
//! Runs the engine headless with a scripted player: hold right, jump over
//! enemies ahead, and log a HUD line every second until the run ends.
//!
//! Usage: `platformer-sim [settings.json]`

use std::sync::Arc;
use std::time::{Duration, Instant};

use platformer_sim::sim::{GameState, GameStatus};
use platformer_sim::{GameController, GameLoop, GameLoopHandle, Settings};

/// Give up after this long if the run has not ended
const RUN_TIME_LIMIT: Duration = Duration::from_secs(90);
/// How far ahead (world units) an enemy triggers a jump
const JUMP_LOOKAHEAD: f32 = 90.0;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Platformer Sim starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let level = settings.load_level()?;
    let controller = GameController::new(level, settings.level_number)?;

    let game_loop = GameLoop::spawn(controller, &settings)?;
    let handle = game_loop.handle();
    handle.move_right();

    let final_state = play(&handle, RUN_TIME_LIMIT);

    let ticks = game_loop.stop().map(|c| c.tick_count()).unwrap_or_default();
    log_hud(&final_state);
    println!(
        "{:?}: score {}, lives {}, coins left {}, ticks {}",
        final_state.game_status,
        final_state.player.score,
        final_state.player.lives,
        final_state.remaining_coins(),
        ticks
    );
    Ok(())
}

/// Drive the scripted player until the run ends or `limit` passes
fn play(handle: &GameLoopHandle, limit: Duration) -> Arc<GameState> {
    let started = Instant::now();
    let mut last_hud = Instant::now();
    let mut seen = 0;
    loop {
        if started.elapsed() > limit {
            log::warn!("Run time limit reached");
            return handle.latest();
        }
        let Some((version, state)) = handle
            .snapshots()
            .wait_newer(seen, Duration::from_millis(250))
        else {
            continue;
        };
        seen = version;

        if state.game_status != GameStatus::Playing {
            return state;
        }

        steer(handle, &state);

        if last_hud.elapsed() >= Duration::from_secs(1) {
            log_hud(&state);
            last_hud = Instant::now();
        }
    }
}

/// Jump when a live enemy is just ahead of the player
fn steer(handle: &GameLoopHandle, state: &GameState) {
    let player = &state.player;
    if player.is_jumping {
        return;
    }
    let front = player.position.x + player.size.width as f32;
    let enemy_ahead = state.alive_enemies().any(|enemy| {
        let gap = enemy.position.x - front;
        (0.0..JUMP_LOOKAHEAD).contains(&gap)
    });
    if enemy_ahead {
        handle.jump();
    }
}

fn log_hud(state: &GameState) {
    log::info!(
        "x={:.0} y={:.0} {:?} | score {} | lives {} | camera {:.0}",
        state.player.position.x,
        state.player.position.y,
        state.player.state,
        state.player.score,
        state.player.lives,
        state.camera_offset
    );
}
