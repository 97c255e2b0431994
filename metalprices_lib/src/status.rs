//! SQLite storage for client status checks.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on rows returned by [`StatusStore::list`].
pub const MAX_LIST: usize = 1000;

#[derive(thiserror::Error, Debug)]
pub enum StatusError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("date parse error: {0}")]
    Date(#[from] chrono::ParseError),
}

/// A record that a client checked in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Status-check table behind a mutex-guarded connection.
pub struct StatusStore {
    conn: Mutex<Connection>,
}

impl StatusStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StatusError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database. Contents are lost on drop.
    pub fn open_in_memory() -> Result<Self, StatusError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn init(&self) -> Result<(), StatusError> {
        let schema = include_str!("../../schema/sqlite.sql");
        self.conn().execute_batch(schema)?;
        Ok(())
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert a new status check stamped with the current time.
    ///
    /// `client_name` is stored as given; callers sanitize it first.
    pub fn insert(&self, client_name: &str) -> Result<StatusCheck, StatusError> {
        let check = StatusCheck {
            id: Uuid::new_v4().to_string(),
            client_name: client_name.to_string(),
            timestamp: Utc::now(),
        };
        self.conn().execute(
            "INSERT INTO status_checks (id, client_name, timestamp) VALUES (?1, ?2, ?3)",
            params![check.id, check.client_name, check.timestamp.to_rfc3339()],
        )?;
        Ok(check)
    }

    /// Status checks in insertion order, at most `limit` (capped at [`MAX_LIST`]).
    pub fn list(&self, limit: usize) -> Result<Vec<StatusCheck>, StatusError> {
        let limit = limit.min(MAX_LIST) as i64;
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, client_name, timestamp FROM status_checks ORDER BY rowid LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut checks = Vec::new();
        for row in rows {
            let (id, client_name, ts) = row?;
            let timestamp = DateTime::parse_from_rfc3339(&ts)?.with_timezone(&Utc);
            checks.push(StatusCheck {
                id,
                client_name,
                timestamp,
            });
        }
        Ok(checks)
    }
}
