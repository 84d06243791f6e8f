//! Authoritative game state owner
//!
//! The controller holds the current `GameState` and the two latched movement
//! intents. Input calls take effect immediately; `tick` consumes the intents
//! and swaps in the next state as a single replacement.

use std::sync::Arc;

use crate::error::LevelError;
use crate::level::LevelData;
use crate::sim::{GameEvent, GameState, GameStatus, TickInput, apply_jump, tick};

#[derive(Debug, Clone)]
pub struct GameController {
    level: LevelData,
    level_number: u32,
    state: Arc<GameState>,
    moving_left: bool,
    moving_right: bool,
    tick_count: u64,
}

impl GameController {
    /// Controller for a validated level layout
    pub fn new(level: LevelData, level_number: u32) -> Result<Self, LevelError> {
        level.validate()?;
        let state = Arc::new(level.build_state(level_number));
        Ok(Self {
            level,
            level_number,
            state,
            moving_left: false,
            moving_right: false,
            tick_count: 0,
        })
    }

    /// Controller for the built-in first level
    pub fn level_one() -> Self {
        let level = LevelData::level_one();
        let state = Arc::new(level.build_state(1));
        Self {
            level,
            level_number: 1,
            state,
            moving_left: false,
            moving_right: false,
            tick_count: 0,
        }
    }

    /// Run one tick if the game is active
    ///
    /// Left intent wins over right when both are held.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if !self.state.is_active() {
            return Vec::new();
        }

        let input = TickInput {
            move_left: self.moving_left,
            move_right: self.moving_right,
        };
        let outcome = tick(&self.state, &input);
        self.tick_count += 1;

        for event in &outcome.events {
            match event {
                GameEvent::StatusChanged { from, to } => {
                    log::info!(
                        "Status {:?} -> {:?} after {} ticks (score {}, lives {})",
                        from,
                        to,
                        self.tick_count,
                        outcome.state.player.score,
                        outcome.state.player.lives
                    );
                }
                GameEvent::Landed => log::trace!("Landed at tick {}", self.tick_count),
                other => log::debug!("Tick {}: {:?}", self.tick_count, other),
            }
        }

        self.state = Arc::new(outcome.state);
        outcome.events
    }

    pub fn move_left(&mut self) {
        self.moving_left = true;
    }

    pub fn stop_move_left(&mut self) {
        self.moving_left = false;
    }

    pub fn move_right(&mut self) {
        self.moving_right = true;
    }

    pub fn stop_move_right(&mut self) {
        self.moving_right = false;
    }

    /// Jump right away (not latched); no-op while airborne
    pub fn jump(&mut self) {
        let player = apply_jump(&self.state.player);
        if player != self.state.player {
            self.replace_state(|state| state.player = player);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.replace_state(|state| state.is_paused = !state.is_paused);
        log::debug!("Paused: {}", self.state.is_paused);
    }

    /// Back to the fresh level layout with both intents cleared
    pub fn restart_game(&mut self) {
        self.state = Arc::new(self.level.build_state(self.level_number));
        self.moving_left = false;
        self.moving_right = false;
        self.tick_count = 0;
        log::info!("Game restarted (level {})", self.level_number);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Shared handle to the current state; never changes after it is returned
    pub fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    pub fn status(&self) -> GameStatus {
        self.state.game_status
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Latched (left, right) intents
    pub fn intents(&self) -> (bool, bool) {
        (self.moving_left, self.moving_right)
    }

    fn replace_state(&mut self, update: impl FnOnce(&mut GameState)) {
        let mut next = (*self.state).clone();
        update(&mut next);
        self.state = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_intents_latch() {
        let mut controller = GameController::level_one();
        controller.move_right();
        controller.move_right();
        assert_eq!(controller.intents(), (false, true));
        controller.move_left();
        controller.stop_move_right();
        assert_eq!(controller.intents(), (true, false));
        controller.stop_move_left();
        assert_eq!(controller.intents(), (false, false));
    }

    #[test]
    fn test_move_right_over_ticks() {
        let mut controller = GameController::level_one();
        controller.move_right();
        for _ in 0..10 {
            controller.tick();
        }
        assert_eq!(controller.state().player.position.x, 100.0 + 10.0 * MOVE_SPEED);
        assert!(controller.state().player.is_facing_right);
        assert_eq!(controller.tick_count(), 10);
    }

    #[test]
    fn test_jump_applies_immediately() {
        let mut controller = GameController::level_one();
        controller.jump();
        assert_eq!(controller.state().player.velocity.y, JUMP_FORCE);
        assert!(controller.state().player.is_jumping);

        // Second jump while airborne does nothing
        let before = controller.snapshot();
        controller.jump();
        assert_eq!(*controller.snapshot(), *before);

        controller.tick();
        assert!((controller.state().player.velocity.y - (JUMP_FORCE + GRAVITY)).abs() < 1e-5);
    }

    #[test]
    fn test_pause_blocks_ticks() {
        let mut controller = GameController::level_one();
        controller.move_right();
        controller.toggle_pause();
        assert!(!controller.state().is_active());

        let before = controller.snapshot();
        assert!(controller.tick().is_empty());
        assert_eq!(*controller.snapshot(), *before);
        assert_eq!(controller.tick_count(), 0);

        controller.toggle_pause();
        controller.tick();
        assert_eq!(controller.state().player.position.x, 100.0 + MOVE_SPEED);
    }

    #[test]
    fn test_snapshot_is_stable() {
        let mut controller = GameController::level_one();
        let snapshot = controller.snapshot();
        controller.move_right();
        controller.tick();
        assert_eq!(snapshot.player.position.x, 100.0);
        assert_ne!(controller.state().player.position.x, 100.0);
    }

    #[test]
    fn test_restart_clears_intents() {
        let mut controller = GameController::level_one();
        controller.move_left();
        controller.move_right();
        controller.tick();
        controller.restart_game();
        assert_eq!(controller.intents(), (false, false));
        assert_eq!(controller.tick_count(), 0);
        assert_eq!(*controller.state(), LevelData::level_one().build_state(1));
    }

    #[test]
    fn test_invalid_level_rejected() {
        let mut level = LevelData::level_one();
        level.platforms[0].size.width = 0;
        assert!(GameController::new(level, 1).is_err());
    }
}
