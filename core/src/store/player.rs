use super::GameStore;
use crate::{error::GameResult, lifecycle::Player, types::Role};
use rusqlite::{params, OptionalExtension};

fn player_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<Player> {
    let role_text: String = row.get(2)?;
    let role = role_text.parse::<Role>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("unknown role '{role_text}'").into(),
        )
    })?;
    Ok(Player {
        player_id: row.get(0)?,
        game_id: row.get(1)?,
        role,
    })
}

impl GameStore {
    // ── Players ────────────────────────────────────────────────

    pub fn insert_player(&self, player: &Player) -> GameResult<()> {
        self.conn().execute(
            "INSERT INTO player (player_id, game_id, role, joined_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                player.player_id,
                player.game_id,
                player.role.as_str(),
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// The earliest claim on a role, if any. Storage tolerates multiple
    /// claims; the first one wins for re-join purposes.
    pub fn player_for_role(&self, game_id: &str, role: Role) -> GameResult<Option<Player>> {
        self.conn()
            .query_row(
                "SELECT player_id, game_id, role FROM player
                 WHERE game_id = ?1 AND role = ?2
                 ORDER BY joined_at ASC LIMIT 1",
                params![game_id, role.as_str()],
                player_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn roles_bound(&self, game_id: &str) -> GameResult<Vec<Role>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT DISTINCT role FROM player WHERE game_id = ?1")?;
        let rows = stmt.query_map(params![game_id], |row| row.get::<_, String>(0))?;
        let mut roles = Vec::new();
        for text in rows {
            let text = text?;
            if let Ok(role) = text.parse::<Role>() {
                roles.push(role);
            }
        }
        Ok(roles)
    }
}
