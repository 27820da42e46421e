use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::domain::{PrecedencePair, StoredPair};

/// Count one more observation of each pair. A pair listed twice is counted twice.
pub fn increment_pairs(conn: &Connection, pairs: &[PrecedencePair]) -> Result<()> {
    let sql = "INSERT INTO sequence_pairs (predecessor_id, successor_id, frequency) VALUES (?1, ?2, 1) ON CONFLICT (predecessor_id, successor_id) DO UPDATE SET frequency = frequency + 1";

    let mut stmt = conn.prepare_cached(sql)?;
    for pair in pairs {
        stmt.execute(params![pair.predecessor, pair.successor])
            .with_context(|| {
                format!(
                    "Failed to record pair {} -> {}",
                    pair.predecessor, pair.successor
                )
            })?;
    }

    Ok(())
}

/// Take back one observation of each pair; pairs no longer observed are removed.
pub fn decrement_pairs(conn: &Connection, pairs: &[PrecedencePair]) -> Result<()> {
    let sql = "UPDATE sequence_pairs SET frequency = frequency - 1 WHERE predecessor_id = ?1 AND successor_id = ?2";

    let mut stmt = conn.prepare_cached(sql)?;
    for pair in pairs {
        stmt.execute(params![pair.predecessor, pair.successor])
            .context("Failed to decrement pair frequency")?;
    }

    conn.execute("DELETE FROM sequence_pairs WHERE frequency <= 0", [])
        .context("Failed to remove unobserved pairs")?;
    Ok(())
}

fn parse_stored_pair_row(row: &rusqlite::Row) -> rusqlite::Result<StoredPair> {
    Ok(StoredPair {
        predecessor: row.get(0)?,
        successor: row.get(1)?,
        frequency: row.get(2)?,
    })
}

/// Every stored pair with its frequency, in the order pairs were first recorded
pub fn list_with_frequency(conn: &Connection) -> Result<Vec<StoredPair>> {
    let sql = "SELECT predecessor_id, successor_id, frequency FROM sequence_pairs ORDER BY rowid";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_stored_pair_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Every stored pair, in the order pairs were first recorded
pub fn list_all(conn: &Connection) -> Result<Vec<PrecedencePair>> {
    let rows = list_with_frequency(conn)?;
    Ok(rows.into_iter().map(PrecedencePair::from).collect())
}

pub fn count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM sequence_pairs", [], |row| row.get(0))
        .context("Failed to count pairs")
}
