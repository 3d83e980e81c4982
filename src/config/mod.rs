//! Configuration module for aimon
//!
//! Configuration hierarchy:
//! 1. CLI flags (presentation only: `--color`)
//! 2. Environment variables (`AIMON_*`, then `AWS_PROFILE`)
//! 3. Project config (`./aimon.toml`)
//! 4. Built-in defaults
//!
//! Deployment parameters (email, key, region) are never read from here; the
//! collector asks for them on every run.

mod env_validator;
mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{
    load_or_default, load_with_warnings, with_env_overrides, with_env_overrides_from,
    ConfigWarning, CONFIG_FILE,
};
pub use types::{AwsConfig, ColorMode, Config, ConfigError, DeployConfig, OutputConfig};
