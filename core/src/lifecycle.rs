//! Game lifecycle — the state machine gating every mutating operation.
//!
//! pending → active (start; needs all four roles bound)
//! active ⇄ paused (pause/resume)
//! active → completed (max rounds reached)
//!
//! Orders and round advances are legal only while active. Transition
//! checks are pure; the engine applies the resulting status change and
//! persists it.

use crate::{
    config::GameConfig,
    error::{GameError, GameResult},
    types::{Cost, GameId, GameStatus, Role, Round},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: GameId,
    pub game_code: String,
    pub status: GameStatus,
    pub current_round: Round,
    pub shortage_cost_per_unit: Cost,
    pub holding_cost_per_unit: Cost,
}

impl Game {
    pub fn new(game_code: &str, config: &GameConfig) -> Self {
        Self {
            game_id: uuid::Uuid::new_v4().to_string(),
            game_code: game_code.to_string(),
            status: GameStatus::Pending,
            current_round: 1,
            shortage_cost_per_unit: config.shortage_cost_per_unit,
            holding_cost_per_unit: config.holding_cost_per_unit,
        }
    }
}

/// A session's claim on a role within one game. Storage tolerates
/// multiple claims per role; ordering policy is enforced separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: String,
    pub game_id: GameId,
    pub role: Role,
}

/// Fail unless the game accepts orders and advances right now.
pub fn ensure_active(game: &Game) -> GameResult<()> {
    match game.status {
        GameStatus::Active => Ok(()),
        other => Err(GameError::GameNotActive {
            status: other.to_string(),
        }),
    }
}

/// pending → active. Requires all four supply-chain roles bound.
pub fn start(game: &Game, bound_roles: &[Role]) -> GameResult<GameStatus> {
    match game.status {
        GameStatus::Pending => {
            let distinct: HashSet<Role> = bound_roles.iter().copied().collect();
            if distinct.len() < Role::ALL.len() {
                return Err(GameError::RolesIncomplete {
                    bound: distinct.len(),
                });
            }
            Ok(GameStatus::Active)
        }
        other => Err(GameError::GameNotActive {
            status: other.to_string(),
        }),
    }
}

/// active → paused.
pub fn pause(game: &Game) -> GameResult<GameStatus> {
    match game.status {
        GameStatus::Active => Ok(GameStatus::Paused),
        other => Err(GameError::GameNotActive {
            status: other.to_string(),
        }),
    }
}

/// paused → active.
pub fn resume(game: &Game) -> GameResult<GameStatus> {
    match game.status {
        GameStatus::Paused => Ok(GameStatus::Active),
        other => Err(GameError::GameNotActive {
            status: other.to_string(),
        }),
    }
}

/// Whether an advance landing on `round` finishes the game.
pub fn completes_at(config: &GameConfig, round: Round) -> bool {
    matches!(config.max_rounds, Some(max) if round >= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with(status: GameStatus) -> Game {
        let mut game = Game::new("TEST", &GameConfig::default());
        game.status = status;
        game
    }

    #[test]
    fn start_needs_all_four_roles() {
        let game = game_with(GameStatus::Pending);
        let three = [Role::Retailer, Role::Wholesaler, Role::Distributor];
        assert!(matches!(
            start(&game, &three),
            Err(GameError::RolesIncomplete { bound: 3 })
        ));
        // duplicate claims on one role do not count twice
        let padded = [Role::Retailer, Role::Retailer, Role::Wholesaler, Role::Distributor];
        assert!(start(&game, &padded).is_err());
        assert_eq!(start(&game, &Role::ALL).unwrap(), GameStatus::Active);
    }

    #[test]
    fn pause_resume_round_trip() {
        assert_eq!(pause(&game_with(GameStatus::Active)).unwrap(), GameStatus::Paused);
        assert_eq!(resume(&game_with(GameStatus::Paused)).unwrap(), GameStatus::Active);
        assert!(pause(&game_with(GameStatus::Paused)).is_err());
        assert!(resume(&game_with(GameStatus::Active)).is_err());
    }

    #[test]
    fn completed_games_reject_everything() {
        let done = game_with(GameStatus::Completed);
        assert!(ensure_active(&done).is_err());
        assert!(start(&done, &Role::ALL).is_err());
        assert!(pause(&done).is_err());
        assert!(resume(&done).is_err());
    }
}
