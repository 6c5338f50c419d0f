//! Database connection and operations

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::link::SharedLink;
use crate::migrations::run_migrations;
use crate::Result;

// Other processes may hold the same file open; wait for their locks instead
// of failing straight away.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P, version: u32) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        // WAL mode for better concurrent performance
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&mut conn, version)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory(version: u32) -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        run_migrations(&mut conn, version)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Run `f` in a read-write transaction, taking the write lock up front.
    /// Rolled back unless `f` succeeds.
    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    /// Insert or overwrite each link, returning the ids in input order.
    pub fn put_links(&self, links: &[SharedLink]) -> Result<Vec<i64>> {
        self.transaction(|conn| {
            let mut ids = Vec::with_capacity(links.len());
            for link in links {
                let id = match link.id {
                    Some(id) => {
                        conn.execute(
                            "INSERT OR REPLACE INTO webshare (id, url, label) VALUES (?1, ?2, ?3)",
                            rusqlite::params![id, link.url, link.label],
                        )?;
                        id
                    }
                    None => {
                        conn.execute(
                            "INSERT INTO webshare (url, label) VALUES (?1, ?2)",
                            rusqlite::params![link.url, link.label],
                        )?;
                        conn.last_insert_rowid()
                    }
                };
                ids.push(id);
            }
            Ok(ids)
        })
    }

    pub fn get_link(&self, id: i64) -> Result<Option<SharedLink>> {
        self.with_connection(|conn| {
            let link = conn
                .query_row(
                    "SELECT id, url, label FROM webshare WHERE id = ?1",
                    [id],
                    SharedLink::from_row,
                )
                .optional()?;
            Ok(link)
        })
    }

    /// Most recent links first, at most `limit` of them.
    pub fn recent_links(&self, limit: usize) -> Result<Vec<SharedLink>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, url, label FROM webshare
                 ORDER BY id DESC
                 LIMIT ?1",
            )?;

            let links = stmt
                .query_map([limit as i64], SharedLink::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(links)
        })
    }

    /// Returns whether a row was removed.
    pub fn delete_link(&self, id: i64) -> Result<bool> {
        self.transaction(|conn| {
            let removed = conn.execute("DELETE FROM webshare WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
