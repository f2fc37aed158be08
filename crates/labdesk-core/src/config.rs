//! Store configuration.
//!
//! Resolved once by the host at startup and handed to [`crate::LabStore`].
//! The store never reads environment variables itself.

use std::path::{Path, PathBuf};

use crate::store::{StoreError, StoreResult};

/// Application name used in export file names when none is configured.
pub const DEFAULT_APP_NAME: &str = "labdesk";

/// Default database file name inside a data directory.
pub const DATABASE_FILE_NAME: &str = "labdesk.db";

/// Where the document lives and how a fresh store starts.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// `None` keeps the store in memory only
    database_path: Option<PathBuf>,
    app_name: String,
    seed_demo_data: bool,
}

impl StoreConfig {
    /// File-backed store at `database_path`, seeded with demo data on first run.
    pub fn new(database_path: impl Into<PathBuf>, app_name: impl Into<String>) -> StoreResult<Self> {
        let app_name = app_name.into();
        validate_app_name(&app_name)?;

        Ok(Self {
            database_path: Some(database_path.into()),
            app_name,
            seed_demo_data: true,
        })
    }

    /// File-backed store using [`DATABASE_FILE_NAME`] inside `data_dir`.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self {
            database_path: Some(data_dir.join(DATABASE_FILE_NAME)),
            app_name: DEFAULT_APP_NAME.to_string(),
            seed_demo_data: true,
        }
    }

    /// In-memory store that starts empty.
    pub fn in_memory() -> Self {
        Self {
            database_path: None,
            app_name: DEFAULT_APP_NAME.to_string(),
            seed_demo_data: false,
        }
    }

    pub fn with_seed_demo_data(mut self, seed: bool) -> Self {
        self.seed_demo_data = seed;
        self
    }

    pub fn database_path(&self) -> Option<&Path> {
        self.database_path.as_deref()
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn seed_demo_data(&self) -> bool {
        self.seed_demo_data
    }
}

/// App names end up in file names, so keep them to a safe character set.
fn validate_app_name(app_name: &str) -> StoreResult<()> {
    if app_name.trim().is_empty() {
        return Err(StoreError::Validation("app_name cannot be empty".into()));
    }
    if !app_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StoreError::Validation(format!(
            "app_name may only contain letters, digits, '-' and '_': {}",
            app_name
        )));
    }
    Ok(())
}
