use anyhow::Context;

pub mod cli;
pub mod db;
pub mod display;
pub mod error;
pub mod manager;
pub mod models;
pub mod roster;
pub mod schema;
pub mod settings;
pub mod store;

pub use crate::db::ReferencePolicy;
pub use crate::error::AttendanceError;
pub use crate::manager::AttendanceManager;
pub use crate::settings::Settings;
pub use crate::store::{SqliteStore, Store};

/// Creates an [`AttendanceManager`] from `config.toml` and the environment, optionally pointed at
/// a different database.
pub fn create_default_manager(database_url: Option<&str>) -> anyhow::Result<AttendanceManager> {
    let mut settings = Settings::load().context("failed to load configuration")?;

    if let Some(url) = database_url {
        settings.database.url = url.to_string();
    }

    AttendanceManager::connect(&settings)
        .with_context(|| format!("failed to open database {}", settings.database.url))
}
