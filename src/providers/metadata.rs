//! Provider metadata types

use serde::{Deserialize, Serialize};

/// Metadata about a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    /// Unique identifier for the provider
    pub name: String,
    /// Whether the provider can list users
    pub user_list: bool,
    /// Whether the provider can list organizations
    pub org_list: bool,
}

impl ProviderMetadata {
    pub fn new(name: String, user_list: bool, org_list: bool) -> Self {
        Self {
            name,
            user_list,
            org_list,
        }
    }

    /// Metadata for a provider that only supports login.
    pub fn minimal(name: String) -> Self {
        Self::new(name, false, false)
    }
}
