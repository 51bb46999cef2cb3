//! Round snapshots — the per-round record of every role's stock and cost.
//!
//! A snapshot is created by the round advancer and is immutable once the
//! game moves past its round, with one exception: order placement accrues
//! handling cost into the still-open current round (see `ledger.rs`).

use crate::types::{Cost, GameId, Role, Round, Units};
use serde::{Deserialize, Serialize};

/// One value per supply-chain role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerRole<T> {
    pub retailer: T,
    pub wholesaler: T,
    pub distributor: T,
    pub factory: T,
}

impl<T> PerRole<T> {
    pub fn get(&self, role: Role) -> &T {
        match role {
            Role::Retailer => &self.retailer,
            Role::Wholesaler => &self.wholesaler,
            Role::Distributor => &self.distributor,
            Role::Factory => &self.factory,
        }
    }

    pub fn get_mut(&mut self, role: Role) -> &mut T {
        match role {
            Role::Retailer => &mut self.retailer,
            Role::Wholesaler => &mut self.wholesaler,
            Role::Distributor => &mut self.distributor,
            Role::Factory => &mut self.factory,
        }
    }
}

impl<T: Copy> PerRole<T> {
    pub fn filled(value: T) -> Self {
        Self {
            retailer: value,
            wholesaler: value,
            distributor: value,
            factory: value,
        }
    }
}

/// The recorded state of one `(game, round)` pair.
///
/// Invariant: `cumulative_cost(role, r) = cumulative_cost(role, r-1)
/// + round_cost(role, r)` — every mutation updates both fields together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub game_id: GameId,
    pub round: Round,
    pub stock: PerRole<Units>,
    pub cumulative_cost: PerRole<Cost>,
    pub round_cost: PerRole<Cost>,
    /// Customer demand generated when this round was entered.
    /// Round 1 is created at game setup and carries no demand.
    pub customer_order: Option<Units>,
}

impl RoundSnapshot {
    /// The opening snapshot created with the game itself.
    pub fn initial(game_id: &str, initial_stock: Units) -> Self {
        Self {
            game_id: game_id.to_string(),
            round: 1,
            stock: PerRole::filled(initial_stock),
            cumulative_cost: PerRole::filled(0),
            round_cost: PerRole::filled(0),
            customer_order: None,
        }
    }

    /// Seed the next round from this one: stocks and cumulative costs
    /// carry over, the round cost ledger starts fresh.
    pub fn carry_forward(&self, next_round: Round, customer_order: Units) -> Self {
        Self {
            game_id: self.game_id.clone(),
            round: next_round,
            stock: self.stock,
            cumulative_cost: self.cumulative_cost,
            round_cost: PerRole::filled(0),
            customer_order: Some(customer_order),
        }
    }

    /// Add `amount` to a role's cost for this round, keeping the
    /// cumulative ledger in step.
    pub fn add_cost(&mut self, role: Role, amount: Cost) {
        *self.round_cost.get_mut(role) += amount;
        *self.cumulative_cost.get_mut(role) += amount;
    }
}
