//! Environment variable handling for configuration overrides.
//!
//! `ROOMBOOK_*` variables override values from configuration files.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use roombook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric timeout, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(seconds) = env::var("ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: "ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS".into(),
                    message: "must be a positive integer".into(),
                })?);
        }

        if let Ok(val) = env::var("ROOMBOOK_REQUIRE_ORDERED_DATES") {
            config.require_ordered_dates =
                Some(Self::parse_bool("ROOMBOOK_REQUIRE_ORDERED_DATES", &val)?);
        }

        if let Ok(val) = env::var("ROOMBOOK_ALLOW_DELETE_APPROVED") {
            config.allow_delete_approved =
                Some(Self::parse_bool("ROOMBOOK_ALLOW_DELETE_APPROVED", &val)?);
        }

        if let Ok(val) = env::var("ROOMBOOK_OUTPUT_FORMAT") {
            config.output_format = Some(val.parse().map_err(|message| Error::Validation {
                field: "ROOMBOOK_OUTPUT_FORMAT".into(),
                message,
            })?);
        }

        if let Ok(val) = env::var("ROOMBOOK_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("ROOMBOOK_DISABLE_AUTOINIT", &val)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
