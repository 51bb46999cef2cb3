//! game-runner: headless runner for the beer distribution game.
//!
//! Creates a game, binds all four roles, and plays a number of rounds
//! with a naive echo-the-demand ordering policy — enough to watch the
//! bullwhip build up without any UI attached.
//!
//! Usage:
//!   game-runner --seed 12345 --rounds 20 --db game.db --code DEMO

use anyhow::Result;
use beergame_core::{
    engine::GameEngine,
    store::GameStore,
    types::{Role, Units},
    GameConfig,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let rounds = parse_arg(&args, "--rounds", 20i64);
    let code = args
        .windows(2)
        .find(|w| w[0] == "--code")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "DEMO".to_string());
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");

    println!("Beer distribution game — game-runner");
    println!("  seed:   {seed}");
    println!("  rounds: {rounds}");
    println!("  code:   {code}");
    println!("  db:     {db}");
    println!();

    let store = if db == ":memory:" {
        GameStore::in_memory()?
    } else {
        GameStore::open(db)?
    };
    store.migrate()?;

    let config = GameConfig {
        max_rounds: Some(rounds),
        ..GameConfig::default()
    };
    let mut engine = GameEngine::build(store, config, seed);

    let game = engine.create_or_get_game(&code)?;
    for role in Role::ALL {
        engine.join_game(&code, role)?;
    }
    let game = engine.start_game(&game.game_id)?;
    let game_id = game.game_id.clone();

    loop {
        for role in Role::ALL {
            let quantity = order_quantity(&engine, &game_id, role)?;
            engine.place_order(&game_id, role, quantity)?;
        }
        let (game, snapshot) = engine.advance_round(&game_id)?;
        log::info!(
            "round {:>3}  stocks r/w/d/f: {}/{}/{}/{}",
            snapshot.round,
            snapshot.stock.retailer,
            snapshot.stock.wholesaler,
            snapshot.stock.distributor,
            snapshot.stock.factory,
        );
        if game.status == beergame_core::GameStatus::Completed {
            break;
        }
    }

    print_summary(&engine, &game_id)?;
    Ok(())
}

/// Echo the last demand seen from downstream; order a steady 4 until
/// any demand has been observed.
fn order_quantity(engine: &GameEngine, game_id: &str, role: Role) -> Result<Units> {
    let projection = engine.get_role_projection(game_id, role)?;
    Ok(projection.last_downstream_order.unwrap_or(4).max(1))
}

fn print_summary(engine: &GameEngine, game_id: &str) -> Result<()> {
    let history = engine.get_history(game_id)?;
    println!("round | retailer        | wholesaler      | distributor     | factory");
    println!("      | stock      cost | stock      cost | stock      cost | stock      cost");
    for snap in &history {
        println!(
            "{:>5} | {:>5} {:>10} | {:>5} {:>10} | {:>5} {:>10} | {:>5} {:>10}",
            snap.round,
            snap.stock.retailer,
            snap.cumulative_cost.retailer,
            snap.stock.wholesaler,
            snap.cumulative_cost.wholesaler,
            snap.stock.distributor,
            snap.cumulative_cost.distributor,
            snap.stock.factory,
            snap.cumulative_cost.factory,
        );
    }
    if let Some(last) = history.last() {
        let total = last.cumulative_cost.retailer
            + last.cumulative_cost.wholesaler
            + last.cumulative_cost.distributor
            + last.cumulative_cost.factory;
        println!();
        println!("total chain cost after {} rounds: {total}", last.round);
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
