use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

/// Add players not seen before; known players keep their first-seen time.
pub fn register_players<'a, I>(conn: &Connection, names: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let sql = "INSERT OR IGNORE INTO players (player_id, first_seen) VALUES (?1, ?2)";
    let first_seen = Utc::now().naive_utc();

    let mut stmt = conn.prepare_cached(sql)?;
    let mut inserted = 0;
    for name in names {
        inserted += stmt
            .execute(params![name, first_seen])
            .with_context(|| format!("Failed to register player {name}"))?;
    }

    Ok(inserted)
}

pub fn list_all(conn: &Connection) -> Result<Vec<(String, NaiveDateTime)>> {
    let sql = "SELECT player_id, first_seen FROM players ORDER BY player_id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))
        .context("Failed to count players")
}
