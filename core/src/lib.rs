//! beergame-core — the multi-echelon beer distribution game.
//!
//! Four roles (factory, distributor, wholesaler, retailer) in a linear
//! supply chain, each ordering upstream under a fixed two-round delivery
//! lag while customer demand pulls from the retailer. This crate is the
//! simulation core: the round engine, the order queue, the cost ledger,
//! and the lifecycle state machine, persisted in SQLite. Presentation
//! and transport live elsewhere and attach through `ChangeNotifier`.

pub mod config;
pub mod demand;
pub mod engine;
pub mod error;
pub mod event;
pub mod ledger;
pub mod lifecycle;
pub mod orders;
pub mod projection;
pub mod snapshot;
pub mod store;
pub mod types;

pub use config::GameConfig;
pub use engine::GameEngine;
pub use error::{GameError, GameResult};
pub use store::GameStore;
pub use types::{GameStatus, Role, Round, Units};
