//! Organization entity
//!
//! Organizations form a rooted tree that is stored flat, in creation order,
//! with each node pointing at its parent through `parent_id`.

use serde::{Deserialize, Serialize};

/// Parent id carried by the root organization.
pub const ROOT_PARENT_ID: &str = "0";

/// Fixed name of the generated root organization.
pub const ROOT_ORG_NAME: &str = "总公司";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub parent_id: String,
}

impl Organization {
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: parent_id.into(),
        }
    }

    /// Whether this organization sits at the top of the tree.
    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_PARENT_ID
    }
}
