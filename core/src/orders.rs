//! The order queue — replenishment orders in flight between echelons.
//!
//! Orders are placed against the round pointer at placement time and
//! mature exactly `DELIVERY_LAG` rounds later. Maturity processing is
//! deterministic: ascending placed round, then order id, so replays of
//! the same game produce the same stock movements.

use crate::{
    error::{GameError, GameResult},
    types::{GameId, OrderEndpoint, OrderStatus, Role, Round, Units, DELIVERY_LAG},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOrder {
    pub order_id: String,
    pub game_id: GameId,
    pub placed_round: Round,
    pub delivery_round: Round,
    pub quantity: Units,
    pub source: OrderEndpoint,
    pub destination: OrderEndpoint,
    pub status: OrderStatus,
}

impl PendingOrder {
    /// Build a replenishment order for `role` at the current round.
    /// Source resolution is fixed by the chain topology: each role draws
    /// from its upstream neighbour, the factory from production.
    pub fn replenishment(
        game_id: &str,
        role: Role,
        current_round: Round,
        quantity: Units,
    ) -> GameResult<Self> {
        if quantity <= 0 {
            return Err(GameError::InvalidQuantity { quantity });
        }
        let source = match role.upstream() {
            Some(upstream) => OrderEndpoint::Role(upstream),
            None => OrderEndpoint::Production,
        };
        Ok(Self {
            order_id: uuid::Uuid::new_v4().to_string(),
            game_id: game_id.to_string(),
            placed_round: current_round,
            delivery_round: current_round + DELIVERY_LAG,
            quantity,
            source,
            destination: OrderEndpoint::Role(role),
            status: OrderStatus::Pending,
        })
    }

    /// Tracking entry for an admin-injected customer sale. Takes effect
    /// immediately, so it is recorded already completed and never enters
    /// the maturity sweep.
    pub fn admin_injection(game_id: &str, current_round: Round, quantity: Units) -> GameResult<Self> {
        if quantity <= 0 {
            return Err(GameError::InvalidQuantity { quantity });
        }
        Ok(Self {
            order_id: uuid::Uuid::new_v4().to_string(),
            game_id: game_id.to_string(),
            placed_round: current_round,
            delivery_round: current_round,
            quantity,
            source: OrderEndpoint::Admin,
            destination: OrderEndpoint::Role(Role::Retailer),
            status: OrderStatus::Completed,
        })
    }
}
