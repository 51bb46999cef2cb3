//! Shared primitive types used across the entire simulation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A round number. Rounds start at 1 and only ever increase.
pub type Round = i64;

/// Signed stock level. Negative stock is an open backorder.
pub type Units = i64;

/// Integer cost, in whole currency units.
pub type Cost = i64;

/// The canonical game identifier (UUID stored as TEXT).
pub type GameId = String;

/// Orders placed at round R are delivered at round R + DELIVERY_LAG.
pub const DELIVERY_LAG: Round = 2;

/// The four supply-chain echelons, ordered downstream → upstream.
///
/// The retailer's downstream counterpart is the external customer sink;
/// the factory's upstream counterpart is the unlimited production source.
/// Neither is a `Role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Retailer,
    Wholesaler,
    Distributor,
    Factory,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Retailer,
        Role::Wholesaler,
        Role::Distributor,
        Role::Factory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Retailer => "retailer",
            Role::Wholesaler => "wholesaler",
            Role::Distributor => "distributor",
            Role::Factory => "factory",
        }
    }

    /// Where this role's replenishment orders are sourced from.
    /// The factory draws from production, which is not a tracked role.
    pub fn upstream(&self) -> Option<Role> {
        match self {
            Role::Retailer => Some(Role::Wholesaler),
            Role::Wholesaler => Some(Role::Distributor),
            Role::Distributor => Some(Role::Factory),
            Role::Factory => None,
        }
    }

    /// The role that orders from this one, if any. The retailer's
    /// downstream is the customer sink.
    pub fn downstream(&self) -> Option<Role> {
        match self {
            Role::Retailer => None,
            Role::Wholesaler => Some(Role::Retailer),
            Role::Distributor => Some(Role::Wholesaler),
            Role::Factory => Some(Role::Distributor),
        }
    }

    /// Parse a transport-supplied role name. Rejects `admin`, `customer`,
    /// `production`, and anything unknown: only supply-chain roles may
    /// own stock and place replenishment orders.
    pub fn supply_chain(s: &str) -> Result<Role, crate::error::GameError> {
        s.parse().map_err(|_| crate::error::GameError::InvalidRole {
            role: s.to_string(),
        })
    }

    /// Per-unit handling cost charged when this role places an order.
    /// Increases monotonically moving downstream.
    pub fn order_cost_multiplier(&self) -> Cost {
        match self {
            Role::Factory => 2,
            Role::Distributor => 3,
            Role::Wholesaler => 4,
            Role::Retailer => 5,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retailer" => Ok(Role::Retailer),
            "wholesaler" => Ok(Role::Wholesaler),
            "distributor" => Ok(Role::Distributor),
            "factory" => Ok(Role::Factory),
            _ => Err(()),
        }
    }
}

/// One endpoint of an order: a supply-chain role, the production source,
/// the customer sink, or the admin (direct demand injection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderEndpoint {
    Role(Role),
    Production,
    Customer,
    Admin,
}

impl OrderEndpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderEndpoint::Role(r) => r.as_str(),
            OrderEndpoint::Production => "production",
            OrderEndpoint::Customer => "customer",
            OrderEndpoint::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "production" => Some(OrderEndpoint::Production),
            "customer" => Some(OrderEndpoint::Customer),
            "admin" => Some(OrderEndpoint::Admin),
            other => other.parse::<Role>().ok().map(OrderEndpoint::Role),
        }
    }
}

impl fmt::Display for OrderEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game lifecycle states. Transitions are enforced in `lifecycle.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Pending,
    Active,
    Paused,
    Completed,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Pending => "pending",
            GameStatus::Active => "active",
            GameStatus::Paused => "paused",
            GameStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(GameStatus::Pending),
            "active" => Some(GameStatus::Active),
            "paused" => Some(GameStatus::Paused),
            "completed" => Some(GameStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }
}
