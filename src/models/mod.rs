//! Data models for generated fixtures

pub mod dataset;
pub mod organization;
pub mod user;

pub use dataset::{Dataset, DatasetViolation};
pub use organization::{Organization, ROOT_ORG_NAME, ROOT_PARENT_ID};
pub use user::{MAX_MEMBERSHIPS, User, UserIdentity};
