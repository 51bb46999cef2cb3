//! SQLite persistence layer.
//!
//! RULE: Only the store modules talk to the database.
//! The engine calls store methods — it never executes SQL directly.

mod order;
mod player;
mod round;

use crate::{
    error::GameResult,
    lifecycle::Game,
    types::{GameStatus, Round},
};
use rusqlite::{params, Connection, OptionalExtension};

pub struct GameStore {
    conn: Connection,
}

impl GameStore {
    pub fn open(path: &str) -> GameResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GameResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> GameResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    /// Run `f` inside one write transaction. Everything the closure
    /// writes commits as a unit, or rolls back on the first error —
    /// readers never observe a partially applied mutation.
    pub fn with_tx<T>(&self, f: impl FnOnce(&Self) -> GameResult<T>) -> GameResult<T> {
        self.conn.execute_batch("BEGIN IMMEDIATE;")?;
        match f(self) {
            Ok(value) => {
                self.conn.execute_batch("COMMIT;")?;
                Ok(value)
            }
            Err(err) => {
                let _ = self.conn.execute_batch("ROLLBACK;");
                Err(err)
            }
        }
    }

    // ── Game ───────────────────────────────────────────────────

    pub fn insert_game(&self, game: &Game) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO game (game_id, game_code, status, current_round,
                               shortage_cost, holding_cost, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                game.game_id,
                game.game_code,
                game.status.as_str(),
                game.current_round,
                game.shortage_cost_per_unit,
                game.holding_cost_per_unit,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn game_by_id(&self, game_id: &str) -> GameResult<Option<Game>> {
        self.conn
            .query_row(
                "SELECT game_id, game_code, status, current_round, shortage_cost, holding_cost
                 FROM game WHERE game_id = ?1",
                params![game_id],
                game_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn game_by_code(&self, code: &str) -> GameResult<Option<Game>> {
        self.conn
            .query_row(
                "SELECT game_id, game_code, status, current_round, shortage_cost, holding_cost
                 FROM game WHERE game_code = ?1",
                params![code],
                game_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn set_game_status(&self, game_id: &str, status: GameStatus) -> GameResult<()> {
        self.conn.execute(
            "UPDATE game SET status = ?1 WHERE game_id = ?2",
            params![status.as_str(), game_id],
        )?;
        Ok(())
    }

    /// Compare-and-swap on the round pointer. Returns false if another
    /// advance already moved it past `from`.
    pub fn advance_round_pointer(&self, game_id: &str, from: Round, to: Round) -> GameResult<bool> {
        let updated = self.conn.execute(
            "UPDATE game SET current_round = ?1 WHERE game_id = ?2 AND current_round = ?3",
            params![to, game_id, from],
        )?;
        Ok(updated == 1)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

fn game_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<Game> {
    let status_text: String = row.get(2)?;
    let status = GameStatus::parse(&status_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("unknown game status '{status_text}'").into(),
        )
    })?;
    Ok(Game {
        game_id: row.get(0)?,
        game_code: row.get(1)?,
        status,
        current_round: row.get(3)?,
        shortage_cost_per_unit: row.get(4)?,
        holding_cost_per_unit: row.get(5)?,
    })
}
