//! Generation parameters
//!
//! The three knobs that shape a dataset, read either from CLI flags or from
//! a JSON document such as:
//!
//! ```json
//! { "userCount": 100, "orgDepth": 4, "orgBranches": 3 }
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ConfigError;
use crate::error::FixtureError;

/// Largest organization tree the generator will build.
pub const MAX_ORGANIZATIONS: u64 = 1_000_000;

/// Deepest organization tree the generator will build. Child names embed
/// the whole ancestor path, so name length grows with depth.
pub const MAX_ORG_DEPTH: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub user_count: u32,
    pub org_depth: u32,
    pub org_branches: u32,
}

impl GenerationConfig {
    pub fn new(user_count: u32, org_depth: u32, org_branches: u32) -> Self {
        Self {
            user_count,
            org_depth,
            org_branches,
        }
    }

    /// Build a config from signed values as typed on the command line.
    pub fn from_values(user_count: i64, org_depth: i64, org_branches: i64) -> Result<Self, ConfigError> {
        let config = Self {
            user_count: positive("userCount", user_count)?,
            org_depth: positive("orgDepth", org_depth)?,
            org_branches: positive("orgBranches", org_branches)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config document.
    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        if !path.exists() {
            return Err(FixtureError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Map<String, Value> =
            serde_json::from_str(&content).map_err(|source| ConfigError::InvalidDocument {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self {
            user_count: required(&document, "userCount")?,
            org_depth: required(&document, "orgDepth")?,
            org_branches: required(&document, "orgBranches")?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("userCount", self.user_count),
            ("orgDepth", self.org_depth),
            ("orgBranches", self.org_branches),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive { field, value: 0 });
            }
        }

        if self.org_depth > MAX_ORG_DEPTH {
            return Err(ConfigError::DepthTooLarge {
                depth: self.org_depth,
            });
        }

        match expected_org_count(self.org_depth, self.org_branches) {
            Some(count) if count <= MAX_ORGANIZATIONS => Ok(()),
            _ => Err(ConfigError::TooManyOrganizations {
                depth: self.org_depth,
                branches: self.org_branches,
            }),
        }
    }

    /// Number of organizations this config produces.
    pub fn org_count(&self) -> Option<u64> {
        expected_org_count(self.org_depth, self.org_branches)
    }
}

/// Size of a tree with `depth` levels of `branches` children under a root:
/// `branches^0 + branches^1 + ... + branches^depth`. `None` on overflow.
pub fn expected_org_count(depth: u32, branches: u32) -> Option<u64> {
    let branches = u64::from(branches);
    let mut level = 1u64;
    let mut total = 1u64;
    for _ in 0..depth {
        level = level.checked_mul(branches)?;
        total = total.checked_add(level)?;
    }
    Some(total)
}

fn required(document: &Map<String, Value>, field: &'static str) -> Result<u32, ConfigError> {
    let value = document
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or(ConfigError::MissingField { field })?;
    let number = value.as_i64().ok_or_else(|| ConfigError::NotAnInteger {
        field,
        value: value.to_string(),
    })?;
    positive(field, number)
}

fn positive(field: &'static str, value: i64) -> Result<u32, ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    u32::try_from(value).map_err(|_| ConfigError::OutOfRange { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn closed_form_org_count() {
        assert_eq!(expected_org_count(1, 1), Some(2));
        assert_eq!(expected_org_count(2, 2), Some(7));
        assert_eq!(expected_org_count(2, 3), Some(13));
        assert_eq!(expected_org_count(3, 2), Some(15));
        assert_eq!(expected_org_count(64, u32::MAX), None);
    }

    #[test]
    fn from_values_rejects_non_positive() {
        assert!(matches!(
            GenerationConfig::from_values(0, 2, 2),
            Err(ConfigError::NonPositive { field: "userCount", value: 0 })
        ));
        assert!(matches!(
            GenerationConfig::from_values(5, -1, 2),
            Err(ConfigError::NonPositive { field: "orgDepth", value: -1 })
        ));
        assert!(matches!(
            GenerationConfig::from_values(5, 2, i64::MAX),
            Err(ConfigError::OutOfRange { field: "orgBranches", .. })
        ));
    }

    #[test]
    fn rejects_oversized_tree() {
        assert!(matches!(
            GenerationConfig::from_values(1, 30, 10),
            Err(ConfigError::TooManyOrganizations { depth: 30, branches: 10 })
        ));
    }

    #[test]
    fn rejects_deep_single_branch_chain() {
        assert!(matches!(
            GenerationConfig::from_values(1, 300_000, 1),
            Err(ConfigError::DepthTooLarge { depth: 300_000 })
        ));
        assert!(GenerationConfig::from_values(1, i64::from(MAX_ORG_DEPTH), 1).is_ok());

        let file = write_config(r#"{"userCount": 1, "orgDepth": 101, "orgBranches": 1}"#);
        assert!(matches!(
            GenerationConfig::from_file(file.path()),
            Err(FixtureError::Config(ConfigError::DepthTooLarge { depth: 101 }))
        ));
    }

    #[test]
    fn reads_config_file() {
        let file = write_config(r#"{"userCount": 100, "orgDepth": 4, "orgBranches": 3}"#);
        let config = GenerationConfig::from_file(file.path()).unwrap();

        assert_eq!(config, GenerationConfig::new(100, 4, 3));
        assert_eq!(config.org_count(), Some(121));
    }

    #[test]
    fn config_file_field_errors() {
        let file = write_config(r#"{"userCount": 100, "orgDepth": 4}"#);
        assert!(matches!(
            GenerationConfig::from_file(file.path()),
            Err(FixtureError::Config(ConfigError::MissingField { field: "orgBranches" }))
        ));

        let file = write_config(r#"{"userCount": "100", "orgDepth": 4, "orgBranches": 3}"#);
        assert!(matches!(
            GenerationConfig::from_file(file.path()),
            Err(FixtureError::Config(ConfigError::NotAnInteger { field: "userCount", .. }))
        ));

        let file = write_config(r#"{"userCount": 10, "orgDepth": 0, "orgBranches": 3}"#);
        assert!(matches!(
            GenerationConfig::from_file(file.path()),
            Err(FixtureError::Config(ConfigError::NonPositive { field: "orgDepth", .. }))
        ));

        let file = write_config("[1, 2, 3]");
        assert!(matches!(
            GenerationConfig::from_file(file.path()),
            Err(FixtureError::Config(ConfigError::InvalidDocument { .. }))
        ));
    }

    #[test]
    fn missing_config_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        assert!(matches!(
            GenerationConfig::from_file(&path),
            Err(FixtureError::NotFound { .. })
        ));
    }
}
