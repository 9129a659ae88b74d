//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered on top of
//! each other; [`Config::with_defaults`] supplies the built-in values.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::manager::ManagerPolicy;

/// Default maximum wait for the database write lock.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use roombook::config::{Config, OutputFormat};
///
/// let yaml = "require_ordered_dates: false\noutput_format: json\n";
/// let config: Config = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(config.require_ordered_dates, Some(false));
/// assert_eq!(config.output_format, Some(OutputFormat::Json));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum time to wait for database lock acquisition (seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Reject reservations whose end date is not after their start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_ordered_dates: Option<bool>,

    /// Allow deleting reservations that are already approved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_delete_approved: Option<bool>,

    /// Output format for list commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,

    /// Disable automatic database initialization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_autoinit: Option<bool>,
}

impl Config {
    /// Returns the built-in defaults with every field set.
    #[must_use]
    pub fn with_defaults() -> Self {
        let policy = ManagerPolicy::default();
        Self {
            maximum_lock_wait_seconds: Some(DEFAULT_LOCK_WAIT_SECONDS),
            require_ordered_dates: Some(policy.require_ordered_dates),
            allow_delete_approved: Some(policy.allow_delete_approved),
            output_format: Some(OutputFormat::Table),
            disable_autoinit: Some(false),
        }
    }

    /// Derives the manager policy, falling back to defaults for unset fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use roombook::config::Config;
    ///
    /// let config = Config { allow_delete_approved: Some(false), ..Default::default() };
    /// let policy = config.manager_policy();
    /// assert!(!policy.allow_delete_approved);
    /// assert!(policy.require_ordered_dates);
    /// ```
    #[must_use]
    pub fn manager_policy(&self) -> ManagerPolicy {
        let defaults = ManagerPolicy::default();
        ManagerPolicy {
            require_ordered_dates: self
                .require_ordered_dates
                .unwrap_or(defaults.require_ordered_dates),
            allow_delete_approved: self
                .allow_delete_approved
                .unwrap_or(defaults.allow_delete_approved),
        }
    }

    /// Returns the configured lock wait as a duration.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use roombook::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "table" => Ok(Self::Table),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}
