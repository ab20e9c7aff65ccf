use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::domain::solve::SolveSettings;
use crate::domain::solver_factory::{SolverOptions, DEFAULT_SOLVER_NAME};

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_JSON_LIMIT: usize = 2 * 1024 * 1024; // 2 MB

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("PROTECT is enabled but API_KEY is not set")]
    MissingApiKey,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub json_limit: usize,
    pub workers: Option<usize>,
    pub api_key: Option<String>,
    pub sentry_dsn: Option<String>,
    pub solve: SolveSettings,
}

impl Config {
    /// Read configuration from the process environment (after `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let protect = match get("PROTECT") {
            Some(value) => parse_bool("PROTECT", &value)?,
            None => false,
        };
        let api_key = if protect {
            Some(get("API_KEY").ok_or(ConfigError::MissingApiKey)?)
        } else {
            None
        };

        let time_limit = parse_opt::<f64>("SOLVER_TIME_LIMIT_SECS", get("SOLVER_TIME_LIMIT_SECS"))?
            .map(|secs| {
                Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidValue {
                    key: "SOLVER_TIME_LIMIT_SECS",
                    value: secs.to_string(),
                })
            })
            .transpose()?;

        Ok(Config {
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port: parse_opt("PORT", get("PORT"))?.unwrap_or(DEFAULT_PORT),
            json_limit: parse_opt("JSON_PAYLOAD_LIMIT", get("JSON_PAYLOAD_LIMIT"))?
                .unwrap_or(DEFAULT_JSON_LIMIT),
            workers: parse_opt("WORKERS", get("WORKERS"))?,
            api_key,
            sentry_dsn: get("SENTRY_DSN"),
            solve: SolveSettings {
                default_solver: get("DEFAULT_SOLVER")
                    .unwrap_or_else(|| DEFAULT_SOLVER_NAME.to_string()),
                options: SolverOptions {
                    time_limit,
                    max_iterations: parse_opt("SOLVER_MAX_ITERATIONS", get("SOLVER_MAX_ITERATIONS"))?,
                },
            },
        })
    }

    pub fn is_protected(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_opt<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidValue { key, value: v })
        })
        .transpose()
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_given_empty_environment_should_use_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.json_limit, 2 * 1024 * 1024);
        assert_eq!(config.workers, None);
        assert!(!config.is_protected());
        assert_eq!(config.solve, SolveSettings::default());
    }

    #[test]
    fn test_config_should_read_solver_settings() {
        let config = config_from(&[
            ("DEFAULT_SOLVER", "clarabel"),
            ("SOLVER_TIME_LIMIT_SECS", "2.5"),
            ("SOLVER_MAX_ITERATIONS", "500"),
            ("PORT", "9100"),
        ])
        .unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(config.solve.default_solver, "clarabel");
        assert_eq!(
            config.solve.options.time_limit,
            Some(Duration::from_millis(2500))
        );
        assert_eq!(config.solve.options.max_iterations, Some(500));
    }

    #[test]
    fn test_config_given_bad_number_should_return_error() {
        let error = config_from(&[("PORT", "ninety")]).unwrap_err();
        assert_eq!(
            error,
            ConfigError::InvalidValue {
                key: "PORT",
                value: "ninety".to_string()
            }
        );
        assert!(config_from(&[("SOLVER_TIME_LIMIT_SECS", "-1")]).is_err());
    }

    #[test]
    fn test_config_protect_requires_api_key() {
        assert_eq!(
            config_from(&[("PROTECT", "true")]).unwrap_err(),
            ConfigError::MissingApiKey
        );

        let config = config_from(&[("PROTECT", "true"), ("API_KEY", "secret")]).unwrap();
        assert!(config.is_protected());
        assert_eq!(config.api_key.as_deref(), Some("secret"));

        let open = config_from(&[("PROTECT", "false"), ("API_KEY", "secret")]).unwrap();
        assert!(!open.is_protected());
    }
}
