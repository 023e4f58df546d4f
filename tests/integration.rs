// Integration tests (native) for the `pixel-runner` crate.
// These tests avoid wasm-specific functionality and drive the game session
// through its public API so they run under `cargo test` on the host.

use pixel_runner::game::{
    GameConfig, GameEvent, GameSession, GameState, JumpPhase, LogicalKey, Rect, Viewport,
};

const VIEW: Viewport = Viewport { width: 800.0, height: 600.0 };
const SPRITE: (f64, f64) = (32.0, 48.0);

fn running(config: GameConfig, coins: Vec<Rect>) -> GameSession {
    let mut s = GameSession::new(config, VIEW, SPRITE, coins);
    assert_eq!(s.press(LogicalKey::Jump), Some(GameEvent::Started));
    s.release(LogicalKey::Jump);
    s
}

// Before anything is bound the accessors report a fresh game.
#[test]
fn accessors_report_fresh_game_before_binding() {
    assert_eq!(pixel_runner::game_score(), 0);
    assert_eq!(pixel_runner::game_level(), 1);
}

#[test]
fn holding_right_from_center_walks_then_stops_at_edge() {
    let mut s = running(GameConfig::default(), vec![]);
    s.press(LogicalKey::MoveRight);
    for frame in 0..20 {
        s.tick(frame as f64 * 16.0);
    }
    assert_eq!(s.character().x, 500.0);
    for frame in 20..200 {
        s.tick(frame as f64 * 16.0);
    }
    assert_eq!(s.character().x, 800.0);
}

#[test]
fn force_twenty_jump_is_airborne_for_ten_steps() {
    let config = GameConfig { jump_force: 20.0, ..GameConfig::default() };
    let mut s = running(config, vec![]);
    s.press(LogicalKey::Jump);
    s.tick(0.0);
    s.release(LogicalKey::Jump);

    let rest = s.resting_y();
    let mut t = 0.0;
    for step in 1..=10 {
        t += 20.0;
        s.tick(t);
        let phase = s.character().phase();
        if step < 10 {
            assert!(s.character().is_jumping(), "landed early at step {step}");
        }
        if step == 5 {
            assert_eq!(phase, JumpPhase::Falling);
            assert_eq!(s.character().y, rest + 100.0);
        }
    }
    assert_eq!(s.character().phase(), JumpPhase::Grounded);
    assert_eq!(s.character().y, rest);
}

#[test]
fn holding_jump_hops_again_after_landing() {
    let config = GameConfig { jump_force: 20.0, ..GameConfig::default() };
    let mut s = running(config, vec![]);
    s.press(LogicalKey::Jump);
    let mut t = 0.0;
    s.tick(t);
    for _ in 0..10 {
        t += 20.0;
        s.tick(t);
    }
    // Landing happens after the jump check, so the 10th tick ends grounded.
    assert!(!s.character().is_jumping());
    s.tick(t + 20.0);
    assert!(s.character().is_jumping());
}

#[test]
fn three_coins_in_sequence_level_up_once() {
    let reference = GameSession::new(GameConfig::default(), VIEW, SPRITE, Vec::new());
    let hero = reference.character_bounds();
    // Coins to the right of the spawn point, spaced 100px apart.
    let coins: Vec<Rect> = (1..=3)
        .map(|i| {
            let dx = 100.0 * i as f64;
            Rect::new(hero.left + dx, hero.top, hero.right + dx, hero.bottom)
        })
        .collect();
    let mut s = running(GameConfig::default(), coins);
    s.press(LogicalKey::MoveRight);

    let mut events = Vec::new();
    for frame in 0..70 {
        events.extend(s.tick(frame as f64 * 16.0));
    }
    let level_ups: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
        .collect();
    assert_eq!(level_ups, vec![&GameEvent::LevelUp { level: 2 }]);
    assert_eq!(s.score(), 30);
    assert_eq!(s.level(), 2);
    assert_eq!(s.character().speed, 6.0);
    assert!(s.collectibles().iter().all(|c| c.is_collected()));
}

#[test]
fn game_never_leaves_running() {
    let mut s = running(GameConfig::default(), vec![]);
    for frame in 0..100 {
        s.tick(frame as f64 * 16.0);
    }
    assert_eq!(s.state(), GameState::Running);
}

#[cfg(feature = "serde_json")]
mod config_overrides {
    use pixel_runner::{InitError, parse_config};

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = parse_config(r#"{ "jump_force": 20.0, "level_every": 50 }"#).unwrap();
        assert_eq!(cfg.jump_force, 20.0);
        assert_eq!(cfg.level_every, 50);
        assert_eq!(cfg.initial_speed, 5.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = parse_config(r#"{ "physics_step_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, InitError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(parse_config("{"), Err(InitError::ConfigParse(_))));
    }
}
