//! Lifecycle tests — the pending/active/paused/completed state machine.

use beergame_core::{
    config::GameConfig,
    demand::FixedDemand,
    engine::GameEngine,
    event::NullNotifier,
    store::GameStore,
    types::{GameStatus, Role},
    GameError,
};
use std::sync::Arc;

fn engine() -> GameEngine {
    engine_with(GameConfig::default())
}

fn engine_with(config: GameConfig) -> GameEngine {
    let store = GameStore::in_memory().unwrap();
    store.migrate().unwrap();
    GameEngine::new(
        store,
        config,
        Box::new(FixedDemand::constant(4)),
        Arc::new(NullNotifier),
    )
}

#[test]
fn game_starts_pending_at_round_one() {
    let mut engine = engine();
    let game = engine.create_or_get_game("ABC1").unwrap();
    assert_eq!(game.status, GameStatus::Pending);
    assert_eq!(game.current_round, 1);
    // round-1 snapshot exists from the start
    let history = engine.get_history(&game.game_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].stock.retailer, 10);
    assert_eq!(history[0].customer_order, None);
}

#[test]
fn create_is_idempotent_on_code() {
    let mut engine = engine();
    let first = engine.create_or_get_game("SAME").unwrap();
    let second = engine.create_or_get_game("SAME").unwrap();
    assert_eq!(first.game_id, second.game_id);
    assert_eq!(engine.get_history(&first.game_id).unwrap().len(), 1);
}

#[test]
fn start_requires_all_four_roles() {
    let mut engine = engine();
    let game = engine.create_or_get_game("ABCD").unwrap();

    for (joined, role) in [Role::Retailer, Role::Wholesaler, Role::Distributor]
        .into_iter()
        .enumerate()
    {
        engine.join_game("ABCD", role).unwrap();
        let err = engine.start_game(&game.game_id).unwrap_err();
        assert!(
            matches!(err, GameError::RolesIncomplete { bound } if bound == joined + 1),
            "unexpected error after {} joins: {err}",
            joined + 1
        );
    }

    engine.join_game("ABCD", Role::Factory).unwrap();
    let started = engine.start_game(&game.game_id).unwrap();
    assert_eq!(started.status, GameStatus::Active);
}

#[test]
fn rejoining_a_role_reuses_the_binding() {
    let mut engine = engine();
    engine.create_or_get_game("JOIN").unwrap();
    let (_, first) = engine.join_game("JOIN", Role::Retailer).unwrap();
    let (_, second) = engine.join_game("JOIN", Role::Retailer).unwrap();
    assert_eq!(first.player_id, second.player_id);
}

#[test]
fn join_unknown_code_fails() {
    let mut engine = engine();
    assert!(matches!(
        engine.join_game("NOPE", Role::Retailer),
        Err(GameError::GameNotFound(_))
    ));
}

#[test]
fn pause_blocks_orders_and_advances() {
    let mut engine = engine();
    let game = engine.create_or_get_game("PAUS").unwrap();
    for role in Role::ALL {
        engine.join_game("PAUS", role).unwrap();
    }
    engine.start_game(&game.game_id).unwrap();
    engine.pause_game(&game.game_id).unwrap();

    let before = engine.store().count_orders(&game.game_id).unwrap();
    let err = engine.place_order(&game.game_id, Role::Retailer, 5).unwrap_err();
    assert!(matches!(err, GameError::GameNotActive { .. }));
    // failed validation writes nothing
    assert_eq!(engine.store().count_orders(&game.game_id).unwrap(), before);

    assert!(matches!(
        engine.advance_round(&game.game_id),
        Err(GameError::GameNotActive { .. })
    ));

    let resumed = engine.resume_game(&game.game_id).unwrap();
    assert_eq!(resumed.status, GameStatus::Active);
    engine.place_order(&game.game_id, Role::Retailer, 5).unwrap();
}

#[test]
fn pending_game_rejects_mutation() {
    let mut engine = engine();
    let game = engine.create_or_get_game("PEND").unwrap();
    assert!(matches!(
        engine.place_order(&game.game_id, Role::Factory, 2),
        Err(GameError::GameNotActive { .. })
    ));
    assert!(matches!(
        engine.advance_round(&game.game_id),
        Err(GameError::GameNotActive { .. })
    ));
}

#[test]
fn game_completes_at_max_rounds() {
    let mut engine = engine_with(GameConfig {
        max_rounds: Some(3),
        ..GameConfig::default()
    });
    let game = engine.create_or_get_game("DONE").unwrap();
    for role in Role::ALL {
        engine.join_game("DONE", role).unwrap();
    }
    engine.start_game(&game.game_id).unwrap();

    let (game2, _) = engine.advance_round(&game.game_id).unwrap();
    assert_eq!(game2.status, GameStatus::Active);
    let (game3, _) = engine.advance_round(&game.game_id).unwrap();
    assert_eq!(game3.status, GameStatus::Completed);
    assert_eq!(game3.current_round, 3);

    assert!(matches!(
        engine.advance_round(&game.game_id),
        Err(GameError::GameNotActive { .. })
    ));
    assert!(matches!(
        engine.resume_game(&game.game_id),
        Err(GameError::GameNotActive { .. })
    ));
}

#[test]
fn unknown_game_id_is_reported_as_such() {
    let mut engine = engine();
    engine.create_or_get_game("REAL").unwrap();
    for op in [
        engine.start_game("missing").map(|_| ()),
        engine.place_order("missing", Role::Retailer, 1).map(|_| ()),
        engine.advance_round("missing").map(|_| ()),
        engine.get_history("missing").map(|_| ()),
    ] {
        assert!(matches!(op, Err(GameError::GameNotFound(_))));
    }
}
