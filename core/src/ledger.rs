//! The cost ledger — holding, shortage, and order-handling charges.
//!
//! Two accrual paths, never mixed:
//!   - closure accrual: once per role per round, after stock mutation,
//!     holding cost on positive stock OR shortage cost on backorder.
//!   - placement accrual: at order-placement time, quantity times the
//!     role's handling multiplier, charged to the still-open round.

use crate::{
    config::GameConfig,
    snapshot::RoundSnapshot,
    types::{Cost, Role, Units},
};

/// Holding/shortage cost for one role given its post-maturity stock.
/// Exactly one of the two applies, selected by the sign of the stock.
pub fn closure_cost(stock: Units, config: &GameConfig) -> Cost {
    if stock >= 0 {
        stock * config.holding_cost_per_unit
    } else {
        -stock * config.shortage_cost_per_unit
    }
}

/// Accrue closure costs for all four roles into the round snapshot.
/// Runs once per round, after matured orders and customer demand have
/// been applied, before the round commits.
pub fn accrue_closure_costs(snapshot: &mut RoundSnapshot, config: &GameConfig) {
    for role in Role::ALL {
        let cost = closure_cost(*snapshot.stock.get(role), config);
        snapshot.add_cost(role, cost);
    }
}

/// Handling cost charged to `role` when it places an order.
pub fn placement_cost(role: Role, quantity: Units) -> Cost {
    quantity * role.order_cost_multiplier()
}
