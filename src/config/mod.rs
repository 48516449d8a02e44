//! Session configuration.
//!
//! Values come from [`GameConfig::default`], a JSON document, or
//! `MAZERUN_*` environment variables layered over the defaults. Every
//! source goes through [`GameConfig::validate`].

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const ENV_BASE_URL: &str = "MAZERUN_BASE_URL";
pub const ENV_MAZE_WIDTH: &str = "MAZERUN_MAZE_WIDTH";
pub const ENV_MAZE_HEIGHT: &str = "MAZERUN_MAZE_HEIGHT";
pub const ENV_TICK_MS: &str = "MAZERUN_TICK_MS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "MAZERUN_REQUEST_TIMEOUT_MS";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Environment variable {name} has invalid value '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Backend root, without a trailing route.
    pub base_url: String,
    /// Logical maze width requested from the generator.
    pub maze_width: u32,
    /// Logical maze height requested from the generator.
    pub maze_height: u32,
    pub tick_interval_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8069".to_string(),
            maze_width: 15,
            maze_height: 15,
            tick_interval_ms: 1000,
            request_timeout_ms: 10_000,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by any `MAZERUN_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            base_url: lookup(ENV_BASE_URL).unwrap_or(defaults.base_url),
            maze_width: parse_var(&lookup, ENV_MAZE_WIDTH)?.unwrap_or(defaults.maze_width),
            maze_height: parse_var(&lookup, ENV_MAZE_HEIGHT)?.unwrap_or(defaults.maze_height),
            tick_interval_ms: parse_var(&lookup, ENV_TICK_MS)?
                .unwrap_or(defaults.tick_interval_ms),
            request_timeout_ms: parse_var(&lookup, ENV_REQUEST_TIMEOUT_MS)?
                .unwrap_or(defaults.request_timeout_ms),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
        }
        if self.maze_width == 0 || self.maze_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "maze dimensions must be at least 1x1, got {}x{}",
                self.maze_width, self.maze_height
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { name, value }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_backend_expectations() {
        let config = GameConfig::default();
        assert_eq!(config.maze_width, 15);
        assert_eq!(config.maze_height, 15);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = GameConfig::from_json(r#"{ "maze_width": 20 }"#).unwrap();
        assert_eq!(config.maze_width, 20);
        assert_eq!(config.maze_height, 15);
        assert_eq!(config.base_url, "http://localhost:8069");
    }

    #[test]
    fn json_parse_errors_are_reported() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn zero_dimensions_are_invalid() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "maze_height": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn env_overrides_defaults() {
        let config = GameConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://odoo.example.com"),
            (ENV_MAZE_WIDTH, "8"),
            (ENV_TICK_MS, " 250 "),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://odoo.example.com");
        assert_eq!(config.maze_width, 8);
        assert_eq!(config.maze_height, 15);
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn unparsable_env_value_is_rejected() {
        let result = GameConfig::from_lookup(lookup(&[(ENV_MAZE_HEIGHT, "tall")]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidEnv {
                name: ENV_MAZE_HEIGHT,
                value: "tall".to_string(),
            })
        );
    }

    #[test]
    fn zero_timeout_from_env_is_invalid() {
        let result = GameConfig::from_lookup(lookup(&[(ENV_REQUEST_TIMEOUT_MS, "0")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
