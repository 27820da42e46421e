use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::Observation;

pub fn insert_observation(
    conn: &Connection,
    ordered_list: &str,
    observed_at: NaiveDateTime,
) -> Result<Observation> {
    let sql = "INSERT INTO observations (ordered_list, observed_at) VALUES (?1, ?2) RETURNING id, ordered_list, observed_at";

    conn.query_row(sql, params![ordered_list, observed_at], parse_observation_row)
        .context("Failed to insert observation")
}

fn parse_observation_row(row: &rusqlite::Row) -> rusqlite::Result<Observation> {
    Ok(Observation {
        id: row.get(0)?,
        ordered_list: row.get(1)?,
        observed_at: row.get(2)?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Observation>> {
    let sql = "SELECT id, ordered_list, observed_at FROM observations WHERE id = ?1";

    conn.query_row(sql, params![id], parse_observation_row)
        .optional()
        .context("Failed to query observation by id")
}

/// Newest first
pub fn list_recent(conn: &Connection, limit: usize) -> Result<Vec<Observation>> {
    let sql = "SELECT id, ordered_list, observed_at FROM observations ORDER BY id DESC LIMIT ?1";
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![limit], parse_observation_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn delete_observation(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM observations WHERE id = ?1", params![id])
        .context("Failed to delete observation")?;
    Ok(deleted > 0)
}

pub fn count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))
        .context("Failed to count observations")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::get_connection;
    use crate::database::test_support::memory_pool;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 20)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_insert_and_find() {
        let pool = memory_pool();
        let conn = get_connection(&pool).unwrap();

        let stored = insert_observation(&conn, "A, B, C", at(10)).unwrap();
        let found = find_by_id(&conn, stored.id).unwrap();

        assert_eq!(found, Some(stored));
        assert_eq!(find_by_id(&conn, 999).unwrap(), None);
    }

    #[test]
    fn test_list_recent_is_newest_first_and_limited() {
        let pool = memory_pool();
        let conn = get_connection(&pool).unwrap();
        for (hour, list) in [(9, "A, B"), (10, "B, C"), (11, "C, D")] {
            insert_observation(&conn, list, at(hour)).unwrap();
        }

        let recent = list_recent(&conn, 2).unwrap();

        let lists: Vec<&str> = recent.iter().map(|o| o.ordered_list.as_str()).collect();
        assert_eq!(lists, vec!["C, D", "B, C"]);
    }

    #[test]
    fn test_delete() {
        let pool = memory_pool();
        let conn = get_connection(&pool).unwrap();
        let stored = insert_observation(&conn, "A, B", at(9)).unwrap();

        assert!(delete_observation(&conn, stored.id).unwrap());
        assert!(!delete_observation(&conn, stored.id).unwrap());
        assert_eq!(count(&conn).unwrap(), 0);
    }
}
