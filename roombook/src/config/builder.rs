//! Builder that assembles the effective configuration.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`Config`] from defaults, files, environment and overrides.
///
/// # Examples
///
/// ```
/// use roombook::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { require_ordered_dates: Some(false), ..Default::default() })
///     .build()
///     .unwrap();
///
/// assert!(!config.manager_policy().require_ordered_dates);
/// assert_eq!(config.maximum_lock_wait_seconds, Some(5));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory project files are discovered from.
    ///
    /// Defaults to the current working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Sets the data directory holding the user config.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Ignores configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `ROOMBOOK_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies programmatic overrides with the highest precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Merges all sources and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be loaded, an
    /// environment variable is malformed, or the merged result is invalid.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::with_defaults();

        if !self.skip_files {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            for source in &sources {
                ConfigValidator::validate(&source.config)?;
            }
            ConfigMerger::merge_into(&mut config, &ConfigMerger::merge(sources));
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
