//! Data directory initialization.
//!
//! Creates the data directory and database explicitly, with optional
//! creation of a default configuration file.

use std::fs;
use std::path::PathBuf;

use crate::config::loader::USER_CONFIG_FILE;
use crate::config::Config;
use crate::database::DATABASE_FILE_NAME;
use crate::error::{Error, Result};
use crate::{Database, DatabaseConfig};

/// Options for data directory initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a default configuration file.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates initialization options for `data_dir`.
    #[must_use]
    pub const fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether to replace an existing database.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write a default configuration file.
    #[must_use]
    pub const fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// What initialization did.
#[derive(Debug)]
pub struct InitResult {
    /// The data directory was created.
    pub data_dir_created: bool,
    /// The database was created or recreated.
    pub database_created: bool,
    /// A configuration file was written.
    pub config_created: bool,
    /// Path to the data directory.
    pub data_dir: PathBuf,
}

const CONFIG_HEADER: &str = "# roombook configuration\n\
# Project files (roombook.yaml, roombook.local.yaml) and ROOMBOOK_* variables\n\
# override these values.\n\n";

/// Renders the default configuration file.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if serialization fails.
pub fn default_config_contents() -> Result<String> {
    let body = serde_yaml::to_string(&Config::with_defaults())?;
    Ok(format!("{CONFIG_HEADER}{body}"))
}

/// Initializes the data directory and database.
///
/// # Errors
///
/// Returns an error if:
/// - The data directory cannot be created
/// - The database already exists and `overwrite` is false
/// - The database cannot be initialized
/// - The configuration file cannot be written
///
/// # Examples
///
/// ```no_run
/// use roombook::init::{init_data_dir, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/roombook-test")).with_create_config(true);
/// let result = init_data_dir(&options).unwrap();
/// assert!(result.database_created);
/// ```
pub fn init_data_dir(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::Validation {
                field: "database".into(),
                message: format!(
                    "database already exists at {} (use --overwrite to replace it)",
                    db_path.display()
                ),
            });
        }
        log::info!("removing existing database {}", db_path.display());
        fs::remove_file(&db_path)?;

        // Stale WAL frames would be replayed into the new database
        for suffix in ["-wal", "-shm"] {
            let mut sidecar = db_path.clone().into_os_string();
            sidecar.push(suffix);
            let sidecar = PathBuf::from(sidecar);
            if sidecar.exists() {
                fs::remove_file(&sidecar)?;
            }
        }
    }

    Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = true;

    if options.create_config {
        let config_path = options.data_dir.join(USER_CONFIG_FILE);
        if !config_path.exists() {
            fs::write(&config_path, default_config_contents()?)?;
            result.config_created = true;
        }
    }

    Ok(result)
}
