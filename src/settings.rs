//! Runtime configuration.
//!
//! Values come from, in increasing priority: built-in defaults, an optional `config.toml` in the
//! working directory, `ATTENDANCE__`-prefixed environment variables (for example
//! `ATTENDANCE__DATABASE__URL`), and finally `DATABASE_URL` (also read from a `.env` file).

use crate::db::ReferencePolicy;
use crate::error::{AttendanceError, Result};
use config::{Config, Environment, File, Source};
use serde::Deserialize;
use std::env;
use std::path::Path;

const CONFIG_FILE: &str = "config";
const ENV_PREFIX: &str = "ATTENDANCE";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Path of the SQLite database file, or `:memory:`.
    pub url: String,
    /// Reject writes that reference missing rows.
    pub enforce_references: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "attendance_management.db".to_string(),
            enforce_references: true,
        }
    }
}

impl Settings {
    /// Loads settings from `config.toml`, the environment, and `.env`.
    pub fn load() -> Result<Self> {
        load_dotenv();

        let mut settings = Self::build(File::with_name(CONFIG_FILE).required(false))?;

        if let Ok(url) = env::var("DATABASE_URL") {
            settings.database.url = url;
        }

        Ok(settings)
    }

    /// Loads settings from the given file, with `ATTENDANCE__`-prefixed environment variables
    /// applied on top. Neither `.env` nor `DATABASE_URL` is consulted.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(File::from(path.as_ref()))
    }

    pub fn reference_policy(&self) -> ReferencePolicy {
        ReferencePolicy::from(self.database.enforce_references)
    }

    fn build<F>(file: F) -> Result<Self>
    where
        F: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Copies variables from a `.env` file in the working directory (or a parent) into the process
/// environment. Variables that are already set keep their values.
///
/// Call this before the logger starts so `RUST_LOG` from `.env` takes effect.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Like [`load_dotenv`], but reads the given file.
pub fn load_dotenv_from(path: impl AsRef<Path>) -> Result<()> {
    match dotenvy::from_path(path.as_ref()) {
        Ok(()) => Ok(()),
        Err(dotenvy::Error::Io(err)) => Err(err.into()),
        Err(err) => Err(AttendanceError::Validation(format!(
            "invalid env file {}: {err}",
            path.as_ref().display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_local_database() {
        let settings = Settings::default();

        assert_eq!(settings.database.url, "attendance_management.db");
        assert!(settings.database.enforce_references);
        assert_eq!(settings.reference_policy(), ReferencePolicy::Enforce);
    }

    #[test]
    fn reads_values_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[database]\nurl = \"school.db\"\nenforce_references = false"
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();

        assert_eq!(settings.database.url, "school.db");
        assert_eq!(settings.reference_policy(), ReferencePolicy::Lenient);
    }

    #[test]
    fn dotenv_values_reach_the_process_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SCHOOL_ATTENDANCE_DOTENV_LOG=school_attendance=info").unwrap();

        load_dotenv_from(file.path()).unwrap();

        assert_eq!(
            env::var("SCHOOL_ATTENDANCE_DOTENV_LOG").unwrap(),
            "school_attendance=info"
        );
    }

    #[test]
    fn missing_env_file_is_an_io_error() {
        let err = load_dotenv_from("does/not/exist.env").unwrap_err();

        assert!(matches!(err, AttendanceError::Io(_)));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[database]\nurl = \"other.db\"").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();

        assert_eq!(settings.database.url, "other.db");
        assert!(settings.database.enforce_references);
    }
}
