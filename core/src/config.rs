//! Game parameters. Defaults match the classic game setup:
//! every role starts with 10 units, shortage costs twice holding.

use crate::types::{Cost, Round, Units};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cost per unit of unmet demand (negative stock), per round.
    pub shortage_cost_per_unit: Cost,
    /// Cost per unit of on-hand stock, per round.
    pub holding_cost_per_unit: Cost,
    /// Stock each role starts with at round 1.
    pub initial_stock: Units,
    /// Inclusive range the customer order is drawn from.
    pub demand_min: Units,
    pub demand_max: Units,
    /// The game completes automatically when an advance reaches this round.
    /// `None` means the game runs until explicitly abandoned.
    pub max_rounds: Option<Round>,
    /// When set, a role may place at most one order per round.
    /// The storage layer tolerates duplicates either way; this is the
    /// policy hook, off by default pending a product decision.
    pub one_order_per_round: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            shortage_cost_per_unit: 10,
            holding_cost_per_unit: 5,
            initial_stock: 10,
            demand_min: 3,
            demand_max: 7,
            max_rounds: None,
            one_order_per_round: false,
        }
    }
}
