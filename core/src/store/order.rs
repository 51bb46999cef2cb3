use super::GameStore;
use crate::{
    error::GameResult,
    orders::PendingOrder,
    types::{OrderEndpoint, OrderStatus, Role, Round},
};
use rusqlite::{params, OptionalExtension};

const ORDER_COLUMNS: &str =
    "order_id, game_id, placed_round, delivery_round, quantity, source, destination, status";

fn order_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<PendingOrder> {
    let endpoint = |idx: usize, text: String| {
        OrderEndpoint::parse(&text).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                format!("unknown order endpoint '{text}'").into(),
            )
        })
    };
    let status_text: String = row.get(7)?;
    let status = OrderStatus::parse(&status_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            7,
            rusqlite::types::Type::Text,
            format!("unknown order status '{status_text}'").into(),
        )
    })?;
    Ok(PendingOrder {
        order_id: row.get(0)?,
        game_id: row.get(1)?,
        placed_round: row.get(2)?,
        delivery_round: row.get(3)?,
        quantity: row.get(4)?,
        source: endpoint(5, row.get(5)?)?,
        destination: endpoint(6, row.get(6)?)?,
        status,
    })
}

impl GameStore {
    // ── Pending orders ─────────────────────────────────────────

    pub fn insert_order(&self, order: &PendingOrder) -> GameResult<()> {
        self.conn().execute(
            "INSERT INTO pending_order (order_id, game_id, placed_round, delivery_round,
                                        quantity, source, destination, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                order.order_id,
                order.game_id,
                order.placed_round,
                order.delivery_round,
                order.quantity,
                order.source.as_str(),
                order.destination.as_str(),
                order.status.as_str(),
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// All pending orders maturing at `round`, in deterministic
    /// processing order: ascending placed round, order id as tiebreak.
    pub fn orders_maturing(&self, game_id: &str, round: Round) -> GameResult<Vec<PendingOrder>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {ORDER_COLUMNS} FROM pending_order
             WHERE game_id = ?1 AND delivery_round = ?2 AND status = 'pending'
             ORDER BY placed_round ASC, order_id ASC"
        ))?;
        let rows = stmt.query_map(params![game_id, round], order_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn mark_order_completed(&self, order_id: &str) -> GameResult<()> {
        self.conn().execute(
            "UPDATE pending_order SET status = 'completed' WHERE order_id = ?1",
            params![order_id],
        )?;
        Ok(())
    }

    /// All not-yet-delivered orders for a game, oldest first.
    pub fn open_orders(&self, game_id: &str) -> GameResult<Vec<PendingOrder>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {ORDER_COLUMNS} FROM pending_order
             WHERE game_id = ?1 AND status = 'pending'
             ORDER BY placed_round ASC, order_id ASC"
        ))?;
        let rows = stmt.query_map(params![game_id], order_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn count_orders(&self, game_id: &str) -> GameResult<i64> {
        self.conn()
            .query_row(
                "SELECT COUNT(*) FROM pending_order WHERE game_id = ?1",
                params![game_id],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    /// Has `role` already placed a replenishment order this round?
    pub fn role_ordered_in_round(&self, game_id: &str, role: Role, round: Round) -> GameResult<bool> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM pending_order
             WHERE game_id = ?1 AND placed_round = ?2 AND destination = ?3 AND source != 'admin'",
            params![game_id, round, role.as_str()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// The most recent order drawing stock from `role` — what the role's
    /// downstream neighbour last asked for.
    pub fn last_order_from(&self, game_id: &str, role: Role) -> GameResult<Option<PendingOrder>> {
        self.conn()
            .query_row(
                &format!(
                    "SELECT {ORDER_COLUMNS} FROM pending_order
                     WHERE game_id = ?1 AND source = ?2
                     ORDER BY placed_round DESC, created_at DESC LIMIT 1"
                ),
                params![game_id, role.as_str()],
                order_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }
}
