//! Dataset snapshot
//!
//! The persisted artifact: every organization, every user, and the
//! generation parameters that produced them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GenerationConfig;
use crate::models::{MAX_MEMBERSHIPS, Organization, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub users: Vec<User>,
    pub orgs: Vec<Organization>,
    pub config: GenerationConfig,
}

/// Structural problems found in a dataset that parsed as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetViolation {
    #[error("no root organization")]
    MissingRoot,
    #[error("expected exactly one root organization, found {count}")]
    MultipleRoots { count: usize },
    #[error("duplicate organization id '{id}'")]
    DuplicateOrgId { id: String },
    #[error("organization '{id}' references unknown or later parent '{parent_id}'")]
    UnknownParent { id: String, parent_id: String },
    #[error("duplicate username '{username}'")]
    DuplicateUsername { username: String },
    #[error(
        "user '{username}' belongs to {count} organizations, expected 1 to {max}",
        max = MAX_MEMBERSHIPS
    )]
    MembershipCount { username: String, count: usize },
    #[error("user '{username}' lists organization '{org_id}' more than once")]
    DuplicateMembership { username: String, org_id: String },
    #[error("user '{username}' references unknown organization '{org_id}'")]
    UnknownMembership { username: String, org_id: String },
}

impl Dataset {
    /// Check the tree and membership invariants.
    ///
    /// Organizations must be listed parent-first, so a parent id is only
    /// accepted once the parent itself has been seen.
    pub fn validate(&self) -> Result<(), DatasetViolation> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.orgs.len());
        let mut roots = 0usize;

        for org in &self.orgs {
            if org.is_root() {
                roots += 1;
            } else if !seen.contains(org.parent_id.as_str()) {
                return Err(DatasetViolation::UnknownParent {
                    id: org.id.clone(),
                    parent_id: org.parent_id.clone(),
                });
            }
            if !seen.insert(org.id.as_str()) {
                return Err(DatasetViolation::DuplicateOrgId { id: org.id.clone() });
            }
        }

        match roots {
            0 => return Err(DatasetViolation::MissingRoot),
            1 => {}
            count => return Err(DatasetViolation::MultipleRoots { count }),
        }

        let mut usernames: HashSet<&str> = HashSet::with_capacity(self.users.len());
        for user in &self.users {
            if !usernames.insert(user.username.as_str()) {
                return Err(DatasetViolation::DuplicateUsername {
                    username: user.username.clone(),
                });
            }

            let count = user.orgs.len();
            if count == 0 || count > MAX_MEMBERSHIPS {
                return Err(DatasetViolation::MembershipCount {
                    username: user.username.clone(),
                    count,
                });
            }

            let mut memberships: HashSet<&str> = HashSet::with_capacity(count);
            for org_id in &user.orgs {
                if !seen.contains(org_id.as_str()) {
                    return Err(DatasetViolation::UnknownMembership {
                        username: user.username.clone(),
                        org_id: org_id.clone(),
                    });
                }
                if !memberships.insert(org_id.as_str()) {
                    return Err(DatasetViolation::DuplicateMembership {
                        username: user.username.clone(),
                        org_id: org_id.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
