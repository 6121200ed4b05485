//! Synthetic dataset generation
//!
//! The organization tree shape is fully determined by the config; names,
//! phone numbers and memberships are random.

pub mod orgs;
pub mod users;

pub use orgs::generate_organizations;
pub use users::{avatar_for, generate_users, username_for};

use rand::Rng;
use tracing::info;

use crate::config::GenerationConfig;
use crate::models::Dataset;

/// Generate a dataset using the supplied random source.
pub fn generate_dataset<R: Rng + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Dataset {
    let orgs = generate_organizations(config.org_depth, config.org_branches);
    let users = generate_users(config.user_count, &orgs, rng);

    info!(
        users = users.len(),
        orgs = orgs.len(),
        "Generated dataset"
    );

    Dataset {
        users,
        orgs,
        config: *config,
    }
}

/// Generate a dataset from the thread-local RNG.
pub fn generate(config: &GenerationConfig) -> Dataset {
    generate_dataset(config, &mut rand::thread_rng())
}
