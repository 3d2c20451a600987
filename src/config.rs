//! Process configuration
//!
//! Read once at startup from the environment. `main` loads an optional
//! `.env` file first.

use crate::claude::{ClaudeClient, ClaudeError, Model, DEFAULT_API_URL};
use crate::export::DEFAULT_ARTIFACT_PATH;
use crate::orchestrator::{AcceptancePolicy, DEFAULT_MAX_ITERATIONS};
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: Model,
    pub max_tokens: u32,
    pub max_iterations: u32,
    pub output_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. Unset or blank keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = match get("BA_TESTGEN_ADDR") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "BA_TESTGEN_ADDR",
                value,
                reason: "expected host:port",
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 5000)),
        };

        let model = match get("BA_TESTGEN_MODEL") {
            Some(value) => Model::from_string(&value).ok_or(ConfigError::Invalid {
                key: "BA_TESTGEN_MODEL",
                value,
                reason: "expected opus, sonnet or haiku",
            })?,
            None => Model::default(),
        };

        let max_iterations = match get("BA_TESTGEN_MAX_ITERATIONS") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "BA_TESTGEN_MAX_ITERATIONS",
                        value,
                        reason: "expected a positive integer",
                    })
                }
            },
            None => DEFAULT_MAX_ITERATIONS,
        };

        let max_tokens = match get("BA_TESTGEN_MAX_TOKENS") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "BA_TESTGEN_MAX_TOKENS",
                        value,
                        reason: "expected a positive integer",
                    })
                }
            },
            None => DEFAULT_MAX_TOKENS,
        };

        Ok(Self {
            addr,
            api_key: get("ANTHROPIC_API_KEY"),
            api_url: get("ANTHROPIC_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model,
            max_tokens,
            max_iterations,
            output_path: get("BA_TESTGEN_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT_PATH)),
        })
    }

    pub fn policy(&self) -> AcceptancePolicy {
        AcceptancePolicy::new(self.max_iterations)
    }

    pub fn claude_client(&self) -> Result<ClaudeClient, ClaudeError> {
        let api_key = self.api_key.clone().ok_or(ClaudeError::MissingApiKey)?;
        Ok(ClaudeClient::new(api_key)?
            .with_api_url(self.api_url.clone())
            .with_model(self.model)
            .with_max_tokens(self.max_tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.addr.to_string(), "127.0.0.1:5000");
        assert_eq!(config.model, Model::Sonnet);
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.output_path, PathBuf::from("test_cases.csv"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.api_key.is_none());
        assert_eq!(config.policy(), AcceptancePolicy::new(3));
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("BA_TESTGEN_ADDR", "0.0.0.0:8080"),
            ("BA_TESTGEN_MODEL", "haiku"),
            ("BA_TESTGEN_MAX_ITERATIONS", "5"),
            ("BA_TESTGEN_OUTPUT", "/tmp/out.csv"),
            ("ANTHROPIC_API_KEY", "sk-test"),
        ])
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.model, Model::Haiku);
        assert_eq!(config.policy().max_iterations(), 5);
        assert_eq!(config.output_path, PathBuf::from("/tmp/out.csv"));
        assert_eq!(config.claude_client().unwrap().model(), Model::Haiku);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = config(&[("BA_TESTGEN_MAX_ITERATIONS", "0")]).unwrap_err();
        assert!(err.to_string().contains("BA_TESTGEN_MAX_ITERATIONS"));
    }

    #[test]
    fn test_unknown_model_rejected() {
        assert!(config(&[("BA_TESTGEN_MODEL", "gpt-4o")]).is_err());
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config(&[("BA_TESTGEN_ADDR", "  "), ("ANTHROPIC_API_KEY", "")]).unwrap();
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
        assert!(matches!(
            config.claude_client(),
            Err(ClaudeError::MissingApiKey)
        ));
    }
}
