//! User roster generation

use rand::{Rng, seq::SliceRandom};
use tracing::debug;

use crate::models::{MAX_MEMBERSHIPS, Organization, User};

const SURNAMES: [&str; 10] = ["张", "李", "王", "刘", "陈", "杨", "赵", "黄", "周", "吴"];
const GIVEN_NAMES: [&str; 10] = ["伟", "芳", "娜", "敏", "静", "丽", "强", "磊", "军", "洋"];
const PHONE_PREFIXES: [&str; 10] = [
    "138", "139", "150", "151", "152", "158", "159", "186", "187", "188",
];

const USERNAME_PREFIX: &str = "test-user";
const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avatars/svg?seed=";

/// Generate `count` users with memberships drawn from `orgs`.
///
/// Each user joins between one and three distinct organizations, never more
/// than `orgs.len()`. An empty `orgs` slice yields users with no
/// memberships.
pub fn generate_users<R: Rng + ?Sized>(count: u32, orgs: &[Organization], rng: &mut R) -> Vec<User> {
    let users: Vec<User> = (1..=count)
        .map(|sequence| {
            let username = username_for(sequence);
            User {
                member_name: random_name(rng),
                avatar: avatar_for(&username),
                contact: random_phone(rng),
                orgs: random_memberships(orgs, rng),
                username,
            }
        })
        .collect();

    debug!(count = users.len(), "Generated users");
    users
}

pub fn username_for(sequence: u32) -> String {
    format!("{USERNAME_PREFIX}{sequence:04}")
}

pub fn avatar_for(username: &str) -> String {
    format!("{AVATAR_BASE}{username}")
}

fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let surname = SURNAMES[rng.gen_range(0..SURNAMES.len())];
    let given = GIVEN_NAMES[rng.gen_range(0..GIVEN_NAMES.len())];
    format!("{surname}{given}")
}

fn random_phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = PHONE_PREFIXES[rng.gen_range(0..PHONE_PREFIXES.len())];
    let suffix: u32 = rng.gen_range(0..100_000_000);
    format!("{prefix}{suffix:08}")
}

fn random_memberships<R: Rng + ?Sized>(orgs: &[Organization], rng: &mut R) -> Vec<String> {
    let wanted = rng.gen_range(1..=MAX_MEMBERSHIPS).min(orgs.len());
    orgs.choose_multiple(rng, wanted)
        .map(|org| org.id.clone())
        .collect()
}
