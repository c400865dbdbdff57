//! Opening SQLite connections.
//!
//! Every connection returned from here has its foreign-key pragma set according to the
//! [`ReferencePolicy`] and all migrations applied.

pub mod migrations;

use crate::error::Result;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use log::{error, info};
use std::time::Instant;

/// The SQLite path used for throwaway databases.
pub const IN_MEMORY_URL: &str = ":memory:";

/// Whether writes that reference other rows are checked before they are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferencePolicy {
    /// Reject writes that reference a missing teacher, subject, or student.
    #[default]
    Enforce,
    /// Accept dangling references.
    Lenient,
}

impl ReferencePolicy {
    pub fn enforces(self) -> bool {
        self == Self::Enforce
    }
}

impl From<bool> for ReferencePolicy {
    fn from(enforce: bool) -> Self {
        if enforce { Self::Enforce } else { Self::Lenient }
    }
}

/// Turns a `sqlite:///relative.db` or `sqlite:////absolute.db` URL into a plain path. Plain paths
/// and `:memory:` pass through untouched.
pub fn normalize_url(url: &str) -> &str {
    url.strip_prefix("sqlite:///")
        .or_else(|| url.strip_prefix("sqlite://"))
        .unwrap_or(url)
}

/// Opens (creating if needed) the database at `url` and brings its schema up to date.
pub fn open_db(url: &str, policy: ReferencePolicy) -> Result<SqliteConnection> {
    let started_at = Instant::now();
    let path = normalize_url(url);
    info!("event=db_open module=db status=start path={path}");

    let mut conn = match SqliteConnection::establish(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    if let Err(err) = bootstrap_connection(&mut conn, policy) {
        error!(
            "event=db_open module=db status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        );
        return Err(err);
    }

    info!(
        "event=db_open module=db status=ok duration_ms={} policy={:?}",
        started_at.elapsed().as_millis(),
        policy
    );
    Ok(conn)
}

/// Opens a private in-memory database.
pub fn open_db_in_memory(policy: ReferencePolicy) -> Result<SqliteConnection> {
    open_db(IN_MEMORY_URL, policy)
}

fn bootstrap_connection(conn: &mut SqliteConnection, policy: ReferencePolicy) -> Result<()> {
    let foreign_keys = if policy.enforces() { "ON" } else { "OFF" };
    conn.batch_execute(&format!("PRAGMA foreign_keys = {foreign_keys};"))?;
    migrations::apply_migrations(conn)
}
