//! Configuration file discovery and loading.
//!
//! This module handles discovering and loading roombook configuration files
//! from the data directory and from the project directory tree.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the user configuration inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";
/// File name of the shared project configuration.
pub const PROJECT_CONFIG_FILE: &str = "roombook.yaml";
/// File name of the private project configuration.
pub const LOCAL_CONFIG_FILE: &str = "roombook.local.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from various sources.
///
/// # Examples
///
/// ```no_run
/// use roombook::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files.
    ///
    /// Searches for:
    /// 1. User config at `<data_dir>/config.yaml` (precedence 1)
    /// 2. `roombook.yaml` walking up from `working_dir` (precedence 2)
    /// 3. `roombook.local.yaml` next to it (precedence 3)
    ///
    /// Without `data_dir` the default data directory is used.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(data_dir)? {
            sources.push(user_config);
        }

        sources.extend(Self::discover_project_configs(working_dir)?);
        sources.sort_by_key(|s| s.precedence);

        Ok(sources)
    }

    fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match data_dir {
            Some(dir) => dir.join(USER_CONFIG_FILE),
            None => crate::database::default_data_dir()?.join(USER_CONFIG_FILE),
        };

        if !config_path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Discover project configurations by walking up directories.
    ///
    /// Stops at the first directory containing either project file.
    ///
    /// # Errors
    ///
    /// Returns an error if any discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut configs = Vec::new();
        let mut current = start_dir.to_path_buf();

        loop {
            for (name, precedence) in [(PROJECT_CONFIG_FILE, 2), (LOCAL_CONFIG_FILE, 3)] {
                let path = current.join(name);
                if path.exists() {
                    let config = Self::load_file(&path)?;
                    configs.push(ConfigSource {
                        path,
                        precedence,
                        config,
                    });
                }
            }

            if !configs.is_empty() || !current.pop() {
                break;
            }
        }

        Ok(configs)
    }

    /// Load and parse a YAML configuration file.
    ///
    /// An empty file yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("failed to read configuration file: {e}"),
        })?;

        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        log::debug!("loading configuration from {}", path.display());
        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("invalid YAML: {e}"),
        })
    }
}
