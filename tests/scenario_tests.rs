//! End-to-end gameplay scenarios driven through the controller and the
//! pure tick function.

use glam::Vec2;
use platformer_sim::consts::*;
use platformer_sim::level::{CoinSpec, EnemySpec, LevelData, PlatformSpec};
use platformer_sim::sim::{
    Coin, CoinKind, Enemy, EnemyKind, GameEvent, GameState, GameStatus, Platform, PlatformKind,
    Player, Size, TickInput, tick,
};
use platformer_sim::GameController;

fn ground() -> PlatformSpec {
    PlatformSpec {
        position: Vec2::new(0.0, 700.0),
        size: Size::new(800, 50),
        kind: PlatformKind::Normal,
        breakable: false,
    }
}

fn flat_state(player: Player) -> GameState {
    let ground = Platform::new(Vec2::new(0.0, 700.0), Size::new(800, 50), PlatformKind::Normal);
    GameState::new(player, vec![ground], Vec::new(), Vec::new(), 1)
}

#[test]
fn resting_start_position_is_stable() {
    let mut controller = GameController::level_one();
    controller.tick();
    let player = controller.state().player;
    // Feet start exactly on the ground platform, so gravity is cancelled at once
    assert_eq!(player.position, Vec2::new(100.0, 630.0));
    assert_eq!(player.velocity.y, 0.0);
    assert!(!player.is_jumping);
}

#[test]
fn dropped_player_settles_on_ground_platform() {
    let level = LevelData {
        player_spawn: Vec2::new(100.0, 200.0),
        platforms: vec![ground()],
        enemies: Vec::new(),
        coins: Vec::new(),
    };
    let mut controller = GameController::new(level, 1).unwrap();

    controller.tick();
    let first = controller.state().player;
    assert!((first.velocity.y - GRAVITY).abs() < 1e-6);
    assert!((first.position.y - (200.0 + GRAVITY)).abs() < 1e-4);

    for _ in 0..200 {
        controller.tick();
        assert!(controller.state().player.bottom() <= 700.0);
    }
    let player = controller.state().player;
    assert_eq!(player.bottom(), 700.0);
    assert_eq!(player.velocity.y, 0.0);
    assert!(!player.is_jumping);
}

#[test]
fn jump_arc_returns_to_ground() {
    let mut controller = GameController::level_one();
    controller.jump();
    let mut peak = 630.0_f32;
    for _ in 0..120 {
        controller.tick();
        peak = peak.min(controller.state().player.position.y);
        // Jumping again mid-air never changes the velocity
        let before = controller.state().player.velocity;
        if controller.state().player.is_jumping {
            controller.jump();
            assert_eq!(controller.state().player.velocity, before);
        }
    }
    assert!(peak < 450.0);
    assert_eq!(controller.state().player.position.y, 630.0);
    assert!(!controller.state().player.is_jumping);
}

#[test]
fn walking_right_completes_level_one() {
    let mut controller = GameController::level_one();
    controller.move_right();
    let mut ticks = 0;
    while controller.status() == GameStatus::Playing && ticks < 1000 {
        controller.tick();
        ticks += 1;
    }
    let state = controller.state();
    assert_eq!(state.game_status, GameStatus::LevelComplete);
    assert!(state.player.position.x >= WORLD_WIDTH - LEVEL_COMPLETE_MARGIN);
    // The ground route passes under every enemy and coin of level one
    assert_eq!(state.player.lives, 3);
    assert_eq!(state.player.score, 0);
    assert_eq!(state.camera_offset, state.player.position.x - SCREEN_WIDTH / 2.0);

    // Finished games no longer tick
    let snapshot = controller.snapshot();
    controller.tick();
    assert_eq!(*controller.snapshot(), *snapshot);
}

#[test]
fn last_life_hit_is_game_over() {
    let mut player = Player::default();
    player.lives = 1;
    let mut state = flat_state(player);
    state.enemies.push(Enemy::new(Vec2::new(130.0, 660.0), EnemyKind::Goomba));
    state.coins.push(Coin::new(Vec2::new(2000.0, 650.0)));

    let outcome = tick(&state, &TickInput::default());
    assert_eq!(outcome.state.player.lives, 0);
    assert_eq!(outcome.state.game_status, GameStatus::GameOver);
    assert!(!outcome.state.is_active());
}

#[test]
fn game_over_takes_precedence_over_level_complete() {
    let mut player = Player::new(Vec2::new(WORLD_WIDTH - 100.0, 630.0));
    player.lives = 1;
    let mut state = flat_state(player);
    state.enemies.push(Enemy::new(Vec2::new(WORLD_WIDTH - 80.0, 660.0), EnemyKind::Koopa));

    let outcome = tick(&state, &TickInput::default());
    assert_eq!(outcome.state.game_status, GameStatus::GameOver);
}

#[test]
fn level_complete_ignores_lives_and_score() {
    let mut player = Player::new(Vec2::new(WORLD_WIDTH - LEVEL_COMPLETE_MARGIN, 630.0));
    player.lives = 1;
    player.score = 0;
    let outcome = tick(&flat_state(player), &TickInput::default());
    assert_eq!(outcome.state.game_status, GameStatus::LevelComplete);
}

#[test]
fn invulnerability_blocks_repeated_hits() {
    let mut state = flat_state(Player::default());
    state.enemies.push(Enemy::new(Vec2::new(130.0, 660.0), EnemyKind::Goomba));

    let outcome = tick(&state, &TickInput::default());
    assert_eq!(outcome.state.player.lives, 2);
    let mut state = outcome.state;

    // Keep an enemy glued to the player for the rest of the invulnerability window
    let window = (INVULNERABILITY_TIME_MS / FRAME_TIME_MS) as usize - 1;
    for _ in 0..window {
        let player = state.player;
        state.enemies[0].position = Vec2::new(player.position.x + 20.0, player.position.y + 30.0);
        state = tick(&state, &TickInput::default()).state;
        assert_eq!(state.player.lives, 2);
    }
    assert!(!state.player.is_invulnerable() || state.player.invulnerability_timer <= FRAME_TIME_MS);

    // Once the timer runs out the next contact hurts again
    for _ in 0..3 {
        let player = state.player;
        state.enemies[0].position = Vec2::new(player.position.x + 20.0, player.position.y + 30.0);
        state = tick(&state, &TickInput::default()).state;
    }
    assert_eq!(state.player.lives, 1);
}

#[test]
fn stomp_from_a_jump() {
    let level = LevelData {
        player_spawn: Vec2::new(100.0, 630.0),
        platforms: vec![ground()],
        enemies: vec![EnemySpec {
            position: Vec2::new(100.0, 660.0),
            kind: EnemyKind::Goomba,
        }],
        coins: Vec::new(),
    };
    let mut state = level.build_state(1);
    // Drop the player from above onto the enemy
    state.player.position.y = 540.0;
    state.player.velocity.y = 5.0;
    state.player.is_jumping = true;
    let lives = state.player.lives;

    let mut stomped = false;
    for _ in 0..10 {
        let outcome = tick(&state, &TickInput::default());
        stomped |= outcome
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyStomped { index: 0 }));
        state = outcome.state;
        if stomped {
            break;
        }
    }
    assert!(stomped);
    assert!(!state.enemies[0].is_alive);
    assert_eq!(state.player.lives, lives);
    assert_eq!(state.player.score, ENEMY_DEFEAT_POINTS);
    assert_eq!(state.player.velocity.y, STOMP_BOUNCE_VELOCITY);
    // Dead enemies stay in the list and stop moving
    let x = state.enemies[0].position.x;
    let state = tick(&state, &TickInput::default()).state;
    assert_eq!(state.enemies.len(), 1);
    assert_eq!(state.enemies[0].position.x, x);
}

#[test]
fn coins_score_once_each() {
    let level = LevelData {
        player_spawn: Vec2::new(100.0, 630.0),
        platforms: vec![ground()],
        enemies: Vec::new(),
        coins: vec![
            CoinSpec {
                position: Vec2::new(200.0, 660.0),
                value: 100,
                kind: CoinKind::Normal,
            },
            CoinSpec {
                position: Vec2::new(300.0, 660.0),
                value: 250,
                kind: CoinKind::Rainbow,
            },
        ],
    };
    let mut controller = GameController::new(level, 1).unwrap();
    controller.move_right();
    for _ in 0..60 {
        controller.tick();
    }
    // Walk back over both coins
    controller.stop_move_right();
    controller.move_left();
    for _ in 0..60 {
        controller.tick();
    }
    let state = controller.state();
    assert!(state.coins.iter().all(|c| c.is_collected));
    assert_eq!(state.player.score, 350);
    assert_eq!(state.remaining_coins(), 0);
}

#[test]
fn restart_matches_fresh_construction() {
    let fresh = GameController::level_one();
    let mut controller = GameController::level_one();
    controller.move_right();
    controller.jump();
    for _ in 0..300 {
        controller.tick();
    }
    controller.toggle_pause();
    assert_ne!(*controller.state(), *fresh.state());

    controller.restart_game();
    assert_eq!(*controller.state(), *fresh.state());
    assert_eq!(controller.intents(), (false, false));
}

#[test]
fn broken_platforms_do_not_support() {
    let mut state = flat_state(Player::new(Vec2::new(320.0, 400.0)));
    state.platforms.push(Platform {
        is_broken: true,
        is_breakable: true,
        ..Platform::new(Vec2::new(300.0, 500.0), Size::new(150, 30), PlatformKind::Breakable)
    });
    for _ in 0..100 {
        state = tick(&state, &TickInput::default()).state;
    }
    assert_eq!(state.player.position.y, 630.0);
}
