//! Read-side projections over game history.
//!
//! Projections are pure views: they never mutate state, and calling one
//! twice without an intervening mutation yields identical results.

use crate::{
    snapshot::PerRole,
    types::{Cost, Round, Units},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostParams {
    pub shortage_cost_per_unit: Cost,
    pub holding_cost_per_unit: Cost,
}

/// The admin's whole-chain view for the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProjection {
    pub round: Round,
    pub stocks: PerRole<Units>,
    /// Units on order, keyed by the role the stock will leave.
    pub pending_by_role: PerRole<Units>,
    /// Units in flight, keyed by the role they will arrive at.
    pub incoming_by_role: PerRole<Units>,
    pub customer_order: Option<Units>,
    pub cost_params: CostParams,
}

/// Deliveries a role will receive over the next two rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingDeliveries {
    pub next_round: Units,
    pub future_round: Units,
}

/// One role's private view: own stock, own costs, own pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProjection {
    pub round: Round,
    pub stock: Units,
    pub cumulative_cost: Cost,
    pub round_cost: Cost,
    pub upcoming_deliveries: UpcomingDeliveries,
    /// Most recent demand seen from downstream: the last order placed on
    /// this role, or the current customer order for the retailer.
    pub last_downstream_order: Option<Units>,
}
