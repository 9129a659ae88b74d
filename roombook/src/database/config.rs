//! Where the reservation database lives and how it is opened.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Name of the data directory under the user's home directory.
pub const DATA_DIR_NAME: &str = ".roombook";

/// File name of the reservation database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "roombook.db";

/// How long a connection waits for another writer before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Parameters for [`Database::open`](super::Database::open).
///
/// ```
/// use roombook::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::in_data_dir("/srv/rooms")
///     .with_busy_timeout(Duration::from_millis(250))
///     .read_only();
/// assert!(config.path.ends_with("roombook.db"));
/// assert!(config.read_only);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long to wait on a locked database.
    pub busy_timeout: Duration,
    /// Open without write access; the file must already exist.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// A writable configuration for the database file at `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            read_only: false,
        }
    }

    /// A writable configuration for the database inside `data_dir`.
    #[must_use]
    pub fn in_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(DATABASE_FILE_NAME))
    }

    /// Sets how long to wait on a locked database before failing.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Opens for queries only. Schema setup is skipped and writes fail.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

/// Returns `~/.roombook`.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "cannot determine home directory".into(),
    })?;
    Ok(home.join(DATA_DIR_NAME))
}
