//! The game engine — the per-game aggregate every mutation funnels through.
//!
//! ROUND ADVANCE ORDER (fixed, documented, never reordered):
//!   1. read the round pointer R, compute next = R + 1
//!   2. carry forward round R's stocks and cumulative costs
//!   3. draw the customer order for the next round
//!   4. apply round R's recorded customer order to retailer stock
//!   5. deliver orders maturing at next (ascending placed round, id)
//!   6. accrue holding/shortage cost for all four roles
//!   7. persist the new snapshot, move the round pointer
//!
//! RULES:
//!   - One engine instance per game; `&mut self` on every mutating
//!     operation serializes writes within a game.
//!   - Steps 1–7 commit as one transaction. Readers never observe a
//!     moved pointer without its snapshot, or vice versa.
//!   - All randomness flows through the injected DemandGenerator.
//!   - Change events are published after commit, never inside it.

use crate::{
    config::GameConfig,
    demand::{DemandGenerator, UniformDemand},
    error::{GameError, GameResult},
    event::{ChangeEvent, ChangeNotifier, ChangedTable, NullNotifier},
    ledger,
    lifecycle::{self, Game, Player},
    orders::PendingOrder,
    projection::{AdminProjection, CostParams, RoleProjection, UpcomingDeliveries},
    snapshot::{PerRole, RoundSnapshot},
    store::GameStore,
    types::{GameStatus, OrderEndpoint, Role, Units},
};
use std::sync::Arc;

pub struct GameEngine {
    store: GameStore,
    config: GameConfig,
    demand: Box<dyn DemandGenerator>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl GameEngine {
    pub fn new(
        store: GameStore,
        config: GameConfig,
        demand: Box<dyn DemandGenerator>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            store,
            config,
            demand,
            notifier,
        }
    }

    /// Engine with production demand (uniform over the configured range,
    /// seeded) and no notification transport attached.
    pub fn build(store: GameStore, config: GameConfig, seed: u64) -> Self {
        let demand = UniformDemand::new(seed, config.demand_min, config.demand_max);
        Self::new(store, config, Box::new(demand), Arc::new(NullNotifier))
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    // ── Game setup ─────────────────────────────────────────────

    /// Find the game for `code`, or create it with a fresh round-1
    /// snapshot. Idempotent on the code: the admin re-entering the same
    /// code lands in the existing game.
    pub fn create_or_get_game(&mut self, code: &str) -> GameResult<Game> {
        if let Some(existing) = self.store.game_by_code(code)? {
            return Ok(existing);
        }
        let game = Game::new(code, &self.config);
        let opening = RoundSnapshot::initial(&game.game_id, self.config.initial_stock);
        self.store.with_tx(|store| {
            store.insert_game(&game)?;
            store.insert_round(&opening)
        })?;
        log::info!("Created game {} with code {code}", game.game_id);
        self.publish(ChangedTable::Games, &game.game_id);
        self.publish(ChangedTable::Rounds, &game.game_id);
        Ok(game)
    }

    /// Bind `role` in the game for `code`. Re-joining an already-bound
    /// role returns the existing binding instead of stacking a second
    /// claim on it.
    pub fn join_game(&mut self, code: &str, role: Role) -> GameResult<(Game, Player)> {
        let game = self
            .store
            .game_by_code(code)?
            .ok_or_else(|| GameError::GameNotFound(code.to_string()))?;
        if let Some(existing) = self.store.player_for_role(&game.game_id, role)? {
            return Ok((game, existing));
        }
        let player = Player {
            player_id: uuid::Uuid::new_v4().to_string(),
            game_id: game.game_id.clone(),
            role,
        };
        self.store.insert_player(&player)?;
        log::info!("Role {role} joined game {}", game.game_id);
        self.publish(ChangedTable::Players, &game.game_id);
        Ok((game, player))
    }

    // ── Lifecycle ──────────────────────────────────────────────

    pub fn start_game(&mut self, game_id: &str) -> GameResult<Game> {
        let game = self.load_game(game_id)?;
        let bound = self.store.roles_bound(game_id)?;
        let next_status = lifecycle::start(&game, &bound)?;
        self.set_status(game, next_status)
    }

    pub fn pause_game(&mut self, game_id: &str) -> GameResult<Game> {
        let game = self.load_game(game_id)?;
        let next_status = lifecycle::pause(&game)?;
        self.set_status(game, next_status)
    }

    pub fn resume_game(&mut self, game_id: &str) -> GameResult<Game> {
        let game = self.load_game(game_id)?;
        let next_status = lifecycle::resume(&game)?;
        self.set_status(game, next_status)
    }

    // ── Orders ─────────────────────────────────────────────────

    /// Place a replenishment order for `role` at the current round.
    /// Stock is untouched until the order matures two rounds later; the
    /// role's handling cost lands on the current round immediately.
    pub fn place_order(&mut self, game_id: &str, role: Role, quantity: Units) -> GameResult<PendingOrder> {
        let game = self.load_game(game_id)?;
        lifecycle::ensure_active(&game)?;
        if self.config.one_order_per_round
            && self
                .store
                .role_ordered_in_round(game_id, role, game.current_round)?
        {
            return Err(GameError::RoleAlreadyOrdered {
                role: role.to_string(),
                round: game.current_round,
            });
        }
        let order = PendingOrder::replenishment(game_id, role, game.current_round, quantity)?;
        let mut snapshot = self.current_snapshot(&game)?;
        snapshot.add_cost(role, ledger::placement_cost(role, quantity));
        self.store.with_tx(|store| {
            store.insert_order(&order)?;
            store.update_round(&snapshot)
        })?;
        log::debug!(
            "Game {game_id}: {role} ordered {quantity} for round {}",
            order.delivery_round
        );
        self.publish(ChangedTable::PendingOrders, game_id);
        self.publish(ChangedTable::Rounds, game_id);
        Ok(order)
    }

    /// Admin-injected customer sale: retailer stock drops now, in the
    /// current round, bypassing the two-round pipeline.
    pub fn admin_inject_demand(&mut self, game_id: &str, quantity: Units) -> GameResult<RoundSnapshot> {
        let game = self.load_game(game_id)?;
        lifecycle::ensure_active(&game)?;
        let tracking = PendingOrder::admin_injection(game_id, game.current_round, quantity)?;
        let mut snapshot = self.current_snapshot(&game)?;
        snapshot.stock.retailer -= quantity;
        self.store.with_tx(|store| {
            store.insert_order(&tracking)?;
            store.update_round(&snapshot)
        })?;
        log::info!("Game {game_id}: admin injected demand of {quantity}");
        self.publish(ChangedTable::PendingOrders, game_id);
        self.publish(ChangedTable::Rounds, game_id);
        Ok(snapshot)
    }

    // ── Round advance ──────────────────────────────────────────

    /// Advance the game one round. See the module header for the fixed
    /// step order. Returns the updated game and the new snapshot.
    pub fn advance_round(&mut self, game_id: &str) -> GameResult<(Game, RoundSnapshot)> {
        let mut game = self.load_game(game_id)?;
        lifecycle::ensure_active(&game)?;

        let current = self.current_snapshot(&game)?;
        let next_round = game.current_round + 1;
        let customer_order = self.demand.next_customer_order();
        let mut snapshot = current.carry_forward(next_round, customer_order);

        // Demand recorded for the round now closing hits retailer stock
        // as the chain enters the next round — the exogenous sink lags
        // one advance, mirroring the order pipeline. Round 1 is created
        // at setup and carries no demand.
        if let Some(realized) = current.customer_order {
            snapshot.stock.retailer -= realized;
        }

        let cost_config = self.cost_config(&game);
        let completes = lifecycle::completes_at(&self.config, next_round);

        self.store.with_tx(|store| {
            // Claim the round pointer first: a racing advance on a stale
            // pointer stops here instead of double-applying maturity.
            if !store.advance_round_pointer(game_id, game.current_round, next_round)? {
                return Err(GameError::ConcurrentAdvanceConflict { round: next_round });
            }
            for order in store.orders_maturing(game_id, next_round)? {
                if let OrderEndpoint::Role(src) = order.source {
                    *snapshot.stock.get_mut(src) -= order.quantity;
                }
                if let OrderEndpoint::Role(dst) = order.destination {
                    *snapshot.stock.get_mut(dst) += order.quantity;
                }
                store.mark_order_completed(&order.order_id)?;
            }
            ledger::accrue_closure_costs(&mut snapshot, &cost_config);
            store.insert_round(&snapshot)?;
            if completes {
                store.set_game_status(game_id, GameStatus::Completed)?;
            }
            Ok(())
        })?;

        game.current_round = next_round;
        if completes {
            game.status = GameStatus::Completed;
            log::info!("Game {game_id} completed at round {next_round}");
        }
        log::debug!("Game {game_id} advanced to round {next_round}");
        self.publish(ChangedTable::Games, game_id);
        self.publish(ChangedTable::Rounds, game_id);
        self.publish(ChangedTable::PendingOrders, game_id);
        Ok((game, snapshot))
    }

    // ── Projections ────────────────────────────────────────────

    pub fn get_history(&self, game_id: &str) -> GameResult<Vec<RoundSnapshot>> {
        self.load_game(game_id)?;
        self.store.round_history(game_id)
    }

    /// The admin's whole-chain view: all stocks, orders in flight by
    /// source and destination, the current customer order.
    pub fn get_admin_projection(&self, game_id: &str) -> GameResult<AdminProjection> {
        let game = self.load_game(game_id)?;
        let snapshot = self.current_snapshot(&game)?;

        let mut pending_by_role = PerRole::filled(0);
        let mut incoming_by_role = PerRole::filled(0);
        for order in self.store.open_orders(game_id)? {
            if let OrderEndpoint::Role(src) = order.source {
                *pending_by_role.get_mut(src) += order.quantity;
            }
            if let OrderEndpoint::Role(dst) = order.destination {
                *incoming_by_role.get_mut(dst) += order.quantity;
            }
        }

        Ok(AdminProjection {
            round: game.current_round,
            stocks: snapshot.stock,
            pending_by_role,
            incoming_by_role,
            customer_order: snapshot.customer_order,
            cost_params: CostParams {
                shortage_cost_per_unit: game.shortage_cost_per_unit,
                holding_cost_per_unit: game.holding_cost_per_unit,
            },
        })
    }

    /// One role's private view: own stock and costs, the deliveries due
    /// over the next two rounds, and the latest demand from downstream.
    pub fn get_role_projection(&self, game_id: &str, role: Role) -> GameResult<RoleProjection> {
        let game = self.load_game(game_id)?;
        let snapshot = self.current_snapshot(&game)?;

        let mut next_round = 0;
        let mut future_round = 0;
        for order in self.store.open_orders(game_id)? {
            if order.destination != OrderEndpoint::Role(role) {
                continue;
            }
            if order.delivery_round == game.current_round + 1 {
                next_round += order.quantity;
            } else if order.delivery_round == game.current_round + 2 {
                future_round += order.quantity;
            }
        }

        let last_downstream_order = match role {
            Role::Retailer => snapshot.customer_order,
            _ => self
                .store
                .last_order_from(game_id, role)?
                .map(|order| order.quantity),
        };

        Ok(RoleProjection {
            round: game.current_round,
            stock: *snapshot.stock.get(role),
            cumulative_cost: *snapshot.cumulative_cost.get(role),
            round_cost: *snapshot.round_cost.get(role),
            upcoming_deliveries: UpcomingDeliveries {
                next_round,
                future_round,
            },
            last_downstream_order,
        })
    }

    // ── Internals ──────────────────────────────────────────────

    fn load_game(&self, game_id: &str) -> GameResult<Game> {
        self.store
            .game_by_id(game_id)?
            .ok_or_else(|| GameError::GameNotFound(game_id.to_string()))
    }

    /// The snapshot for the game's current round. A missing snapshot is
    /// an internal consistency failure: surfaced as fatal, not retried.
    fn current_snapshot(&self, game: &Game) -> GameResult<RoundSnapshot> {
        match self.store.round(&game.game_id, game.current_round)? {
            Some(snapshot) => Ok(snapshot),
            None => {
                log::error!(
                    "Game {} has no snapshot for its current round {}",
                    game.game_id,
                    game.current_round
                );
                Err(GameError::RoundNotFound {
                    round: game.current_round,
                })
            }
        }
    }

    /// Cost parameters come from the game row, not the engine config:
    /// a game keeps the economics it was created with.
    fn cost_config(&self, game: &Game) -> GameConfig {
        GameConfig {
            shortage_cost_per_unit: game.shortage_cost_per_unit,
            holding_cost_per_unit: game.holding_cost_per_unit,
            ..self.config.clone()
        }
    }

    fn set_status(&mut self, mut game: Game, status: GameStatus) -> GameResult<Game> {
        self.store.set_game_status(&game.game_id, status)?;
        game.status = status;
        log::info!("Game {} is now {status}", game.game_id);
        self.publish(ChangedTable::Games, &game.game_id);
        Ok(game)
    }

    fn publish(&self, table: ChangedTable, game_id: &str) {
        self.notifier.publish(&ChangeEvent {
            table,
            game_id: game_id.to_string(),
        });
    }
}
