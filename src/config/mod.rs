//! Configuration loading for the fixture tool and mock provider.
//!
//! Loads layered `.env` files and environment variables prefixed with
//! `SSO_`, producing a typed [`AppConfig`]. Generation parameters live in
//! [`generation`].

pub mod generation;

use std::{collections::BTreeMap, env, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use generation::{GenerationConfig, MAX_ORG_DEPTH, MAX_ORGANIZATIONS, expected_org_count};

const ENV_PREFIX: &str = "SSO_";

/// Application configuration derived from `SSO_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppConfig {
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// Name of the provider the host should route SSO calls to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sso_provider: Option<String>,
    /// Dataset consumed by the mock provider.
    #[serde(default = "default_test_data_file")]
    pub test_data_file: PathBuf,
    /// Username the mock provider should always log in as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_user_username: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            sso_provider: None,
            test_data_file: default_test_data_file(),
            test_user_username: None,
        }
    }
}

impl AppConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.log_format.as_str(), "compact" | "pretty" | "json") {
            return Err(ConfigError::InvalidLogFormat {
                value: self.log_format.clone(),
            });
        }
        Ok(())
    }
}

fn default_profile() -> String {
    "local".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_test_data_file() -> PathBuf {
    PathBuf::from("./test-data.json")
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error("log format must be one of compact, pretty, json; got '{value}'")]
    InvalidLogFormat { value: String },
    #[error("invalid config document {path}: {source}")]
    InvalidDocument {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{field} must be an integer, got {value}")]
    NotAnInteger {
        field: &'static str,
        value: String,
    },
    #[error("{field} must be greater than 0, got {value}")]
    NonPositive { field: &'static str, value: i64 },
    #[error("{field} is too large: {value}")]
    OutOfRange { field: &'static str, value: i64 },
    #[error(
        "org depth {depth} with {branches} branches exceeds the limit of {limit} organizations",
        limit = MAX_ORGANIZATIONS
    )]
    TooManyOrganizations { depth: u32, branches: u32 },
    #[error("orgDepth {depth} exceeds the limit of {limit} levels", limit = MAX_ORG_DEPTH)]
    DepthTooLarge { depth: u32 },
    #[error("output directory does not exist: {}", dir.display())]
    OutputDirMissing { dir: PathBuf },
}

/// Loads configuration using layered `.env` files and `SSO_*` env vars.
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new loader rooted at the current working directory.
    pub fn new() -> Self {
        Self {
            base_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a loader rooted at the provided directory (useful for tests).
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let (mut layered, profile_hint) = self.collect_layered_env()?;

        // Process environment wins over every file.
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                layered.insert(stripped.to_string(), value);
            }
        }

        let profile = layered
            .remove("PROFILE")
            .filter(|v| !v.is_empty())
            .unwrap_or(profile_hint);
        let log_level = layered
            .remove("LOG_LEVEL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_level);
        let log_format = layered
            .remove("LOG_FORMAT")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_format);
        let sso_provider = non_empty(layered.remove("PROVIDER"));

        // Unprefixed names are still honoured for older setups.
        let test_data_file = non_empty(layered.remove("TEST_DATA_FILE"))
            .or_else(|| non_empty(env::var("TEST_DATA_FILE").ok()))
            .map(PathBuf::from)
            .unwrap_or_else(default_test_data_file);
        let test_user_username = non_empty(layered.remove("TEST_USER_USERNAME"))
            .or_else(|| non_empty(env::var("TEST_USER_USERNAME").ok()));

        let config = AppConfig {
            profile,
            log_level,
            log_format,
            sso_provider,
            test_data_file,
            test_user_username,
        };

        config.validate()?;
        Ok(config)
    }

    fn collect_layered_env(&self) -> Result<(BTreeMap<String, String>, String), ConfigError> {
        let mut values = BTreeMap::new();

        self.merge_dotenv(self.base_dir.join(".env"), &mut values)?;
        self.merge_dotenv(self.base_dir.join(".env.local"), &mut values)?;

        let profile = env::var("SSO_PROFILE")
            .ok()
            .or_else(|| values.get("PROFILE").cloned())
            .unwrap_or_else(default_profile);

        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}", &profile)),
            &mut values,
        )?;
        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}.local", &profile)),
            &mut values,
        )?;

        Ok((values, profile))
    }

    fn merge_dotenv(
        &self,
        path: PathBuf,
        values: &mut BTreeMap<String, String>,
    ) -> Result<(), ConfigError> {
        match dotenvy::from_path_iter(&path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                        path: path.clone(),
                        source,
                    })?;
                    if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                        values.insert(stripped.to_string(), value);
                    }
                }
                Ok(())
            }
            Err(dotenvy::Error::Io(ref io_err))
                if io_err.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(())
            }
            Err(err) => Err(ConfigError::EnvFile { path, source: err }),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.test_data_file, PathBuf::from("./test-data.json"));
        assert!(config.sso_provider.is_none());
    }

    #[test]
    fn rejects_unknown_log_format() {
        let config = AppConfig {
            log_format: "xml".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogFormat { .. })
        ));
    }

    #[test]
    fn non_empty_trims_and_drops_blanks() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some(" a ".to_string())), Some("a".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
