//! Versioned schema migrations.
//!
//! Each migration is plain SQL embedded in the binary. The version of the last applied migration
//! is stored in `PRAGMA user_version`, so reopening a database only runs what is pending.

use crate::error::{AttendanceError, Result};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use log::info;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: i32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

#[derive(QueryableByName)]
struct UserVersion {
    #[diesel(sql_type = Integer)]
    user_version: i32,
}

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> i32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Returns the schema version recorded in the database.
pub fn current_version(conn: &mut SqliteConnection) -> Result<i32> {
    let row = diesel::sql_query("PRAGMA user_version").get_result::<UserVersion>(conn)?;
    Ok(row.user_version)
}

/// Applies every pending migration in a single transaction.
///
/// Fails with [`AttendanceError::UnsupportedSchemaVersion`] when the database was written by a
/// newer build.
pub fn apply_migrations(conn: &mut SqliteConnection) -> Result<()> {
    let current = current_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(AttendanceError::UnsupportedSchemaVersion {
            found: current,
            supported: latest,
        });
    }

    if current == latest {
        return Ok(());
    }

    conn.transaction::<_, AttendanceError, _>(|conn| {
        for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
            conn.batch_execute(migration.sql)?;
            conn.batch_execute(&format!("PRAGMA user_version = {};", migration.version))?;
            info!(
                "event=db_migrate module=db status=ok version={}",
                migration.version
            );
        }

        Ok(())
    })
}
