//! Solver-specific parameter strings.
//!
//! A parameter string is a whitespace-separated sequence of `KEY value`
//! pairs, for example `"PRESOLVE 0 MAXTIME 30"`. Keys are matched ignoring
//! ASCII case. Recognised keys:
//!
//! | Key         | Value                         | Effect                         |
//! |-------------|-------------------------------|--------------------------------|
//! | `PRESOLVE`  | `0`/`1`, `false`/`true`       | enables or disables presolve   |
//! | `MAXTIME`   | seconds, fractional allowed   | time limit; `<= 0` removes it  |
//! | `MAXNODE`   | positive integer              | node limit                     |
//! | `MAXSOL`    | positive integer              | incumbent limit                |
//! | `OUTPUTLOG` | `0`/`1`, `false`/`true`       | progress logging at INFO       |
//!
//! Unknown keys are logged and ignored.

use std::time::Duration;

use mipforge_core::MipError;
use tracing::{debug, warn};

use crate::settings::SolveSettings;

/// Splits `parameters` into `(key, value)` pairs.
///
/// # Errors
///
/// Returns [`MipError::Config`] if a key has no value.
pub fn parse_parameters(parameters: &str) -> Result<Vec<(&str, &str)>, MipError> {
    let mut tokens = parameters.split_whitespace();
    let mut pairs = Vec::new();
    while let Some(key) = tokens.next() {
        let value = tokens.next().ok_or_else(|| {
            MipError::Config(format!("parameter '{}' is missing a value", key))
        })?;
        pairs.push((key, value));
    }
    Ok(pairs)
}

/// Parses `parameters` and applies every recognised key to `settings`.
///
/// Nothing is applied unless the whole string is valid.
pub fn apply_parameters(parameters: &str, settings: &mut SolveSettings) -> Result<(), MipError> {
    let mut updated = settings.clone();
    for (key, value) in parse_parameters(parameters)? {
        match key.to_ascii_uppercase().as_str() {
            "PRESOLVE" => updated.presolve = parse_flag(key, value)?,
            "OUTPUTLOG" => updated.log_output = parse_flag(key, value)?,
            "MAXTIME" => {
                let seconds: f64 = value.parse().map_err(|_| invalid(key, value))?;
                updated.time_limit = if seconds > 0.0 && seconds.is_finite() {
                    let limit =
                        Duration::try_from_secs_f64(seconds).map_err(|_| invalid(key, value))?;
                    Some(limit)
                } else {
                    None
                };
            }
            "MAXNODE" => updated.node_limit = Some(parse_positive(key, value)?),
            "MAXSOL" => updated.solution_limit = Some(parse_positive(key, value)?),
            _ => {
                warn!("Ignoring unknown solver parameter {} = {}", key, value);
                continue;
            }
        }
        debug!("Applied solver parameter {} = {}", key, value);
    }
    *settings = updated;
    Ok(())
}

fn parse_flag(key: &str, value: &str) -> Result<bool, MipError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u64, MipError> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> MipError {
    MipError::Config(format!("invalid value '{}' for parameter '{}'", value, key))
}
