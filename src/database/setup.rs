use anyhow::{Context, Result};
use rusqlite::Connection;

const TABLES: [&str; 4] = ["sequence_pairs", "observations", "aliases", "players"];

/// Create any missing tables; existing data is left alone.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    log::debug!("Database schema ensured");
    Ok(())
}

/// Drop every table and recreate the schema
pub fn reset_database(conn: &Connection) -> Result<()> {
    for table in TABLES {
        execute_sql(conn, &format!("DROP TABLE IF EXISTS {table}"))
            .with_context(|| format!("Failed to drop table {table}"))?;
    }
    ensure_schema(conn)?;

    log::info!("Database schema reset successfully");
    Ok(())
}

/// Delete all rows, keeping the schema
pub fn clear_all(conn: &Connection) -> Result<()> {
    for table in TABLES {
        execute_sql(conn, &format!("DELETE FROM {table}"))
            .with_context(|| format!("Failed to clear table {table}"))?;
    }

    log::info!("All observations, pairs, aliases and players removed");
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &Connection, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_pool;
    use crate::database::{get_connection, pairs, players};
    use crate::domain::PrecedencePair;

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let pool = memory_pool();
        let conn = get_connection(&pool).unwrap();

        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();
    }

    #[test]
    fn test_clear_all_and_reset_empty_the_store() {
        let pool = memory_pool();
        let conn = get_connection(&pool).unwrap();
        pairs::increment_pairs(&conn, &[PrecedencePair::new("A", "B")]).unwrap();
        players::register_players(&conn, ["A", "B"]).unwrap();

        clear_all(&conn).unwrap();
        assert_eq!(pairs::count(&conn).unwrap(), 0);
        assert_eq!(players::count(&conn).unwrap(), 0);

        pairs::increment_pairs(&conn, &[PrecedencePair::new("A", "B")]).unwrap();
        reset_database(&conn).unwrap();
        assert_eq!(pairs::count(&conn).unwrap(), 0);
    }
}
