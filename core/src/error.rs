use crate::types::{Round, Units};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Game not found: {0}")]
    GameNotFound(String),

    #[error("Game is {status}; operation requires an active game")]
    GameNotActive { status: String },

    #[error("Cannot start: only {bound} of 4 supply-chain roles are bound")]
    RolesIncomplete { bound: usize },

    #[error("Role '{role}' is not a supply-chain role")]
    InvalidRole { role: String },

    #[error("Invalid quantity {quantity}: must be positive")]
    InvalidQuantity { quantity: Units },

    #[error("Role '{role}' already placed an order in round {round}")]
    RoleAlreadyOrdered { role: String, round: Round },

    #[error("Round snapshot missing for round {round}; game state is corrupt")]
    RoundNotFound { round: Round },

    #[error("Concurrent advance detected at round {round}; re-read state and retry")]
    ConcurrentAdvanceConflict { round: Round },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GameResult<T> = Result<T, GameError>;
