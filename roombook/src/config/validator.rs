//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Upper bound on the lock wait, in seconds.
pub const MAX_LOCK_WAIT_SECONDS: u64 = 3600;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use roombook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::with_defaults()).unwrap();
///
/// let zero = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&zero).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(timeout) = config.maximum_lock_wait_seconds {
            Self::validate_lock_wait(timeout)?;
        }

        Ok(())
    }

    fn validate_lock_wait(seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "timeout must be greater than 0".into(),
            });
        }
        if seconds > MAX_LOCK_WAIT_SECONDS {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: format!("timeout must be at most {MAX_LOCK_WAIT_SECONDS} seconds"),
            });
        }
        Ok(())
    }
}
