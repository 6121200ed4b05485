//! User entity and the identity handed out after a code exchange

use serde::{Deserialize, Serialize};

/// Upper bound on the organizations a single user belongs to.
pub const MAX_MEMBERSHIPS: usize = 3;

/// A generated user together with its organization memberships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub member_name: String,
    pub avatar: String,
    pub contact: String,
    pub orgs: Vec<String>,
}

/// Identity returned by an authorization code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub username: String,
    pub avatar: String,
    pub contact: String,
    pub member_name: String,
}

impl From<&User> for UserIdentity {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            contact: user.contact.clone(),
            member_name: user.member_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_drops_memberships() {
        let user = User {
            username: "test-user0001".to_string(),
            member_name: "张伟".to_string(),
            avatar: "https://example.com/a.svg".to_string(),
            contact: "13800000000".to_string(),
            orgs: vec!["1".to_string()],
        };

        let identity = UserIdentity::from(&user);
        let json = serde_json::to_value(&identity).unwrap();

        assert_eq!(identity.username, "test-user0001");
        assert_eq!(json["memberName"], "张伟");
        assert!(json.get("orgs").is_none());
    }
}
