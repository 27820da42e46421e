use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, ErrorCode};
use serde::Serialize;

use crate::domain::AliasTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alias {
    pub alias: String,
    pub target: String,
}

/// Register `alias` as another spelling of `target`. Aliases are unique
/// regardless of case.
pub fn add_alias(conn: &Connection, alias: &str, target: &str) -> Result<()> {
    let sql = "INSERT INTO aliases (alias_name, target_player_id) VALUES (?1, ?2)";

    match conn.execute(sql, params![alias, target]) {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
            bail!("Alias '{}' is already registered", alias)
        }
        Err(e) => Err(e).context("Failed to add alias"),
    }
}

pub fn remove_alias(conn: &Connection, alias: &str) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM aliases WHERE alias_name = ?1", params![alias])
        .context("Failed to remove alias")?;
    Ok(deleted > 0)
}

fn parse_alias_row(row: &rusqlite::Row) -> rusqlite::Result<Alias> {
    Ok(Alias {
        alias: row.get(0)?,
        target: row.get(1)?,
    })
}

pub fn list_all(conn: &Connection) -> Result<Vec<Alias>> {
    let sql = "SELECT alias_name, target_player_id FROM aliases ORDER BY target_player_id, alias_name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_alias_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_target(conn: &Connection, target: &str) -> Result<Vec<String>> {
    let sql = "SELECT alias_name FROM aliases WHERE target_player_id = ?1 ORDER BY alias_name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![target], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn load_alias_table(conn: &Connection) -> Result<AliasTable> {
    let aliases = list_all(conn)?;
    Ok(aliases
        .iter()
        .map(|a| (a.alias.as_str(), a.target.as_str()))
        .collect())
}
