//! Configuration system for MipForge.
//!
//! Load solver configuration from TOML or YAML to control search limits,
//! presolve, progress output and the callback failure policy without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use mipforge_config::{CallbackFailurePolicy, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     presolve = false
//!     log_output = true
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!     node_count_limit = 100000
//!
//!     [callback]
//!     failure_policy = "stop_search"
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert!(!config.presolve);
//! assert_eq!(config.callback.failure_policy, CallbackFailurePolicy::StopSearch);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use mipforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! assert!(config.presolve);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn default_presolve() -> bool {
    true
}

/// Main solver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Whether the backend runs presolve before the tree search.
    #[serde(default = "default_presolve")]
    pub presolve: bool,

    /// Log search progress at INFO level.
    #[serde(default)]
    pub log_output: bool,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Callback bridge configuration.
    #[serde(default)]
    pub callback: CallbackConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            presolve: true,
            log_output: false,
            termination: None,
            callback: CallbackConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, YAML for `.yaml`/`.yml`, TOML
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects limits that would stop the solve before it starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(termination) = &self.termination {
            if termination.solution_count_limit == Some(0) {
                return Err(ConfigError::Invalid(
                    "solution_count_limit must be at least 1".to_string(),
                ));
            }
            if termination.node_count_limit == Some(0) {
                return Err(ConfigError::Invalid(
                    "node_count_limit must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Sets the termination time limit in seconds.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the maximum number of explored nodes.
    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.termination = Some(TerminationConfig {
            node_count_limit: Some(nodes),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the maximum number of incumbent solutions.
    pub fn with_solution_limit(mut self, solutions: u64) -> Self {
        self.termination = Some(TerminationConfig {
            solution_count_limit: Some(solutions),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    pub fn with_presolve(mut self, presolve: bool) -> Self {
        self.presolve = presolve;
        self
    }

    pub fn with_log_output(mut self, log_output: bool) -> Self {
        self.log_output = log_output;
        self
    }

    pub fn with_callback_failure_policy(mut self, policy: CallbackFailurePolicy) -> Self {
        self.callback.failure_policy = policy;
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    pub fn node_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.node_count_limit)
    }

    pub fn solution_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.solution_count_limit)
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the seconds limit.
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of branch-and-bound nodes to explore.
    pub node_count_limit: Option<u64>,

    /// Stop after this many incumbent solutions.
    pub solution_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self
            .seconds_spent_limit
            .unwrap_or(0)
            .saturating_mul(1000)
            .saturating_add(self.millis_spent_limit.unwrap_or(0));
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

/// What the search does after a callback invocation fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackFailurePolicy {
    /// Record the failure and keep searching as if the callback had returned.
    #[default]
    Continue,

    /// Record the failure and stop the search at the next safe point.
    StopSearch,
}

/// Callback bridge configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CallbackConfig {
    #[serde(default)]
    pub failure_policy: CallbackFailurePolicy,
}

#[cfg(test)]
mod tests;
