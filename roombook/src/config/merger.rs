//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use roombook::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(30), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(30));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Every field is scalar: a `Some` in `source` replaces the target value,
    /// a `None` leaves it untouched.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.require_ordered_dates.is_some() {
            target.require_ordered_dates = source.require_ordered_dates;
        }

        if source.allow_delete_approved.is_some() {
            target.allow_delete_approved = source.allow_delete_approved;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }
    }
}
