//! Schema versioning
//!
//! There is no row migration: a version bump drops the `webshare` table and
//! recreates it empty.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

use crate::error::StorageError;
use crate::Result;

pub const SCHEMA_VERSION: u32 = 2;

/// Bring the schema to `requested`.
///
/// Returns `true` when the table was (re)created.
pub fn run_migrations(conn: &mut Connection, requested: u32) -> Result<bool> {
    if requested == 0 {
        return Err(StorageError::InvalidVersion(requested));
    }

    // Take the write lock before reading the version so concurrent openers
    // wait on the busy timeout instead of racing the compare and the drop.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL,
            upgraded_at TEXT NOT NULL
        )",
        [],
    )?;

    let stored = get_schema_version(&tx)?;

    if requested < stored {
        return Err(StorageError::VersionDowngrade { requested, stored });
    }

    if requested == stored {
        tx.commit()?;
        return Ok(false);
    }

    tracing::info!(from = stored, to = requested, "Upgrading schema, recreating table");

    recreate_table(&tx)?;
    set_schema_version(&tx, requested)?;
    tx.commit()?;

    Ok(true)
}

fn get_schema_version(conn: &Connection) -> Result<u32> {
    let version = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .optional()?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: u32) -> Result<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version, upgraded_at) VALUES (?1, ?2)",
        rusqlite::params![version, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

fn recreate_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS webshare;

        CREATE TABLE webshare (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            url TEXT NOT NULL,
            label TEXT NOT NULL
        );
    "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM webshare", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_fresh_database_is_created() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert!(run_migrations(&mut conn, SCHEMA_VERSION).unwrap());
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        assert_eq!(count(&conn), 0);
    }

    #[test]
    fn test_same_version_keeps_rows() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn, 1).unwrap();
        conn.execute(
            "INSERT INTO webshare (url, label) VALUES ('https://a', 'a')",
            [],
        )
        .unwrap();

        assert!(!run_migrations(&mut conn, 1).unwrap());
        assert_eq!(count(&conn), 1);
    }

    #[test]
    fn test_version_bump_drops_rows() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn, 1).unwrap();
        conn.execute(
            "INSERT INTO webshare (url, label) VALUES ('https://a', 'a')",
            [],
        )
        .unwrap();

        assert!(run_migrations(&mut conn, 2).unwrap());
        assert_eq!(count(&conn), 0);
    }

    #[test]
    fn test_downgrade_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn, 2).unwrap();
        let err = run_migrations(&mut conn, 1).unwrap_err();
        assert!(matches!(
            err,
            StorageError::VersionDowngrade {
                requested: 1,
                stored: 2
            }
        ));
    }

    #[test]
    fn test_zero_version_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert!(matches!(
            run_migrations(&mut conn, 0),
            Err(StorageError::InvalidVersion(0))
        ));
    }
}
