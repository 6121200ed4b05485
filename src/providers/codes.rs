//! One-time authorization codes

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard};

use rand::Rng;

use crate::models::UserIdentity;

const CODE_BYTES: usize = 32;

/// Table of outstanding codes and the identities they resolve to.
#[derive(Debug, Default)]
pub struct CodeStore {
    codes: Mutex<HashMap<String, UserIdentity>>,
}

impl CodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `identity` under a fresh code and return the code.
    pub fn issue(&self, identity: UserIdentity) -> String {
        let mut codes = self.lock();
        loop {
            if let Entry::Vacant(slot) = codes.entry(generate_code()) {
                let code = slot.key().clone();
                slot.insert(identity);
                return code;
            }
        }
    }

    /// Remove and return the identity for `code`.
    ///
    /// Lookup and removal share one lock acquisition, so a code redeems at
    /// most once even under concurrent callers.
    pub fn redeem(&self, code: &str) -> Option<UserIdentity> {
        self.lock().remove(code)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, UserIdentity>> {
        self.codes
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

/// 32 random bytes, base64url encoded.
fn generate_code() -> String {
    let mut bytes = [0u8; CODE_BYTES];
    rand::thread_rng().fill(&mut bytes);
    base64_url::encode(&bytes)
}
