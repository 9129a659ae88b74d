//! Configuration system for roombook.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`ROOMBOOK_*`)
//! 3. Private project config (`roombook.local.yaml`)
//! 4. Project config (`roombook.yaml`)
//! 5. User config (`~/.roombook/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use roombook::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//!
//! println!("delete approved: {}", config.manager_policy().allow_delete_approved);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, DEFAULT_LOCK_WAIT_SECONDS};
pub use validator::ConfigValidator;
