use super::GameStore;
use crate::{
    error::GameResult,
    snapshot::{PerRole, RoundSnapshot},
    types::Round,
};
use rusqlite::{params, OptionalExtension};

const ROUND_COLUMNS: &str = "game_id, round,
    factory_stock, distributor_stock, wholesaler_stock, retailer_stock,
    factory_cost, distributor_cost, wholesaler_cost, retailer_cost,
    factory_round_cost, distributor_round_cost, wholesaler_round_cost, retailer_round_cost,
    customer_order";

fn round_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<RoundSnapshot> {
    Ok(RoundSnapshot {
        game_id: row.get(0)?,
        round: row.get(1)?,
        stock: PerRole {
            factory: row.get(2)?,
            distributor: row.get(3)?,
            wholesaler: row.get(4)?,
            retailer: row.get(5)?,
        },
        cumulative_cost: PerRole {
            factory: row.get(6)?,
            distributor: row.get(7)?,
            wholesaler: row.get(8)?,
            retailer: row.get(9)?,
        },
        round_cost: PerRole {
            factory: row.get(10)?,
            distributor: row.get(11)?,
            wholesaler: row.get(12)?,
            retailer: row.get(13)?,
        },
        customer_order: row.get(14)?,
    })
}

impl GameStore {
    // ── Rounds ─────────────────────────────────────────────────

    pub fn insert_round(&self, snap: &RoundSnapshot) -> GameResult<()> {
        self.conn().execute(
            "INSERT INTO game_round (game_id, round,
                factory_stock, distributor_stock, wholesaler_stock, retailer_stock,
                factory_cost, distributor_cost, wholesaler_cost, retailer_cost,
                factory_round_cost, distributor_round_cost, wholesaler_round_cost, retailer_round_cost,
                customer_order)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                snap.game_id,
                snap.round,
                snap.stock.factory,
                snap.stock.distributor,
                snap.stock.wholesaler,
                snap.stock.retailer,
                snap.cumulative_cost.factory,
                snap.cumulative_cost.distributor,
                snap.cumulative_cost.wholesaler,
                snap.cumulative_cost.retailer,
                snap.round_cost.factory,
                snap.round_cost.distributor,
                snap.round_cost.wholesaler,
                snap.round_cost.retailer,
                snap.customer_order,
            ],
        )?;
        Ok(())
    }

    /// Overwrite the stored row for `(game_id, round)` with `snap`.
    /// Only the still-open current round is ever updated (placement
    /// cost accrual and admin demand injection).
    pub fn update_round(&self, snap: &RoundSnapshot) -> GameResult<()> {
        self.conn().execute(
            "UPDATE game_round SET
                factory_stock = ?3, distributor_stock = ?4,
                wholesaler_stock = ?5, retailer_stock = ?6,
                factory_cost = ?7, distributor_cost = ?8,
                wholesaler_cost = ?9, retailer_cost = ?10,
                factory_round_cost = ?11, distributor_round_cost = ?12,
                wholesaler_round_cost = ?13, retailer_round_cost = ?14,
                customer_order = ?15
             WHERE game_id = ?1 AND round = ?2",
            params![
                snap.game_id,
                snap.round,
                snap.stock.factory,
                snap.stock.distributor,
                snap.stock.wholesaler,
                snap.stock.retailer,
                snap.cumulative_cost.factory,
                snap.cumulative_cost.distributor,
                snap.cumulative_cost.wholesaler,
                snap.cumulative_cost.retailer,
                snap.round_cost.factory,
                snap.round_cost.distributor,
                snap.round_cost.wholesaler,
                snap.round_cost.retailer,
                snap.customer_order,
            ],
        )?;
        Ok(())
    }

    pub fn round(&self, game_id: &str, round: Round) -> GameResult<Option<RoundSnapshot>> {
        self.conn()
            .query_row(
                &format!("SELECT {ROUND_COLUMNS} FROM game_round WHERE game_id = ?1 AND round = ?2"),
                params![game_id, round],
                round_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn round_history(&self, game_id: &str) -> GameResult<Vec<RoundSnapshot>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {ROUND_COLUMNS} FROM game_round WHERE game_id = ?1 ORDER BY round ASC"
        ))?;
        let rows = stmt.query_map(params![game_id], round_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
