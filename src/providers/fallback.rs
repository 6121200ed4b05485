//! Built-in data served when no dataset is available

use crate::models::{Organization, ROOT_PARENT_ID, User, UserIdentity};

const FALLBACK_AVATAR: &str = "https://example.com/avatar.jpg";
const FALLBACK_CONTACT: &str = "15677751111";

/// Identity used for logins when no users are loaded.
pub fn identity() -> UserIdentity {
    UserIdentity {
        username: "testuser1234".to_string(),
        avatar: FALLBACK_AVATAR.to_string(),
        contact: FALLBACK_CONTACT.to_string(),
        member_name: "测试用户".to_string(),
    }
}

pub fn users() -> Vec<User> {
    vec![
        user("test-1", "testuser1234", &["1", "2"]),
        user("test-2", "testuser5678", &["3", "4"]),
    ]
}

pub fn organizations() -> Vec<Organization> {
    vec![
        Organization::new("1", "社区管理", ROOT_PARENT_ID),
        Organization::new("2", "1-2", "1"),
        Organization::new("3", "1-2-3", "2"),
        Organization::new("4", "4", ROOT_PARENT_ID),
    ]
}

fn user(username: &str, member_name: &str, orgs: &[&str]) -> User {
    User {
        username: username.to_string(),
        member_name: member_name.to_string(),
        avatar: FALLBACK_AVATAR.to_string(),
        contact: FALLBACK_CONTACT.to_string(),
        orgs: orgs.iter().map(|id| id.to_string()).collect(),
    }
}
