//! # Configuration Crate
//!
//! Layered settings for the application: built-in defaults, then an optional
//! TOML file, then `TRADETRACK__`-prefixed environment variables.
//!
//! ## Public API
//!
//! - `load_config`: Reads and validates the layered `Settings`.
//! - `Settings`: The root settings struct and its sections.

use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalysisSettings, DatabaseSettings, LoggingSettings, ReportSettings, Settings};

/// File looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tradetrack.toml";

/// Prefix of environment overrides, e.g. `TRADETRACK__ANALYSIS__TOP_N=10`.
pub const ENV_PREFIX: &str = "TRADETRACK";

/// Loads the application configuration.
///
/// An explicit `path` must exist; the default `tradetrack.toml` is optional.
/// Every key has a default, so an empty environment yields `Settings::default()`.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(p) => config::File::from(p).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(?settings, "Configuration loaded");
    Ok(settings)
}
