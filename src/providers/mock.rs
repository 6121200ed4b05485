//! Mock SSO provider
//!
//! Serves a generated dataset through the provider interface so a host can
//! be exercised without a real identity provider. The dataset is read on
//! first use and kept for the provider's lifetime; when it is missing or
//! unreadable the provider answers with built-in fallback data instead.

use std::path::PathBuf;
use std::sync::OnceLock;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::models::{Dataset, Organization, User, UserIdentity};
use crate::providers::{
    CodeStore, LoginParams, ProviderError, ProviderMetadata, SsoProvider, fallback,
};
use crate::storage;

/// Registry name of the mock provider.
pub const MOCK_PROVIDER_NAME: &str = "test";

/// Explicit settings for [`MockProvider`].
#[derive(Debug, Clone)]
pub struct MockProviderConfig {
    pub dataset_path: PathBuf,
    /// Log in as this user whenever it exists in the dataset.
    pub forced_username: Option<String>,
}

impl MockProviderConfig {
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            forced_username: None,
        }
    }

    pub fn with_forced_username(mut self, username: impl Into<String>) -> Self {
        self.forced_username = Some(username.into());
        self
    }
}

impl From<&AppConfig> for MockProviderConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            dataset_path: config.test_data_file.clone(),
            forced_username: config.test_user_username.clone(),
        }
    }
}

pub struct MockProvider {
    config: MockProviderConfig,
    dataset: OnceLock<Option<Dataset>>,
    codes: CodeStore,
}

impl MockProvider {
    pub fn new(config: MockProviderConfig) -> Self {
        Self {
            config,
            dataset: OnceLock::new(),
            codes: CodeStore::new(),
        }
    }

    /// Build a provider around an already loaded dataset.
    pub fn with_dataset(config: MockProviderConfig, dataset: Dataset) -> Self {
        Self {
            config,
            dataset: OnceLock::from(Some(dataset)),
            codes: CodeStore::new(),
        }
    }

    pub fn metadata() -> ProviderMetadata {
        ProviderMetadata::new(MOCK_PROVIDER_NAME.to_string(), true, true)
    }

    /// The loaded dataset, reading it on the first call.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset
            .get_or_init(|| load_dataset(&self.config))
            .as_ref()
    }

    /// Codes issued but not yet exchanged.
    pub fn pending_codes(&self) -> usize {
        self.codes.len()
    }

    fn select_identity(&self) -> UserIdentity {
        let Some(users) = self
            .dataset()
            .map(|dataset| dataset.users.as_slice())
            .filter(|users| !users.is_empty())
        else {
            return fallback::identity();
        };

        if let Some(username) = &self.config.forced_username {
            if let Some(user) = users.iter().find(|user| &user.username == username) {
                info!(username = %username, "Using forced user");
                return UserIdentity::from(user);
            }
            warn!(username = %username, "Forced user not found, selecting a random user");
        }

        match users.choose(&mut rand::thread_rng()) {
            Some(user) => {
                info!(username = %user.username, "Selected random user");
                UserIdentity::from(user)
            }
            None => fallback::identity(),
        }
    }
}

#[async_trait]
impl SsoProvider for MockProvider {
    fn name(&self) -> &str {
        MOCK_PROVIDER_NAME
    }

    async fn initiate_login(&self, params: LoginParams) -> Result<String, ProviderError> {
        check_redirect_uri(&params.redirect_uri)?;

        let identity = self.select_identity();
        let code = self.codes.issue(identity);
        let state = params.state.as_deref().filter(|s| !s.is_empty());
        let redirect = redirect_with_code(&params.redirect_uri, &code, state);

        info!(redirect_uri = %params.redirect_uri, "Issued authorization code");
        Ok(redirect)
    }

    async fn exchange_code(&self, code: &str) -> Result<UserIdentity, ProviderError> {
        match self.codes.redeem(code) {
            Some(identity) => {
                info!(username = %identity.username, "Exchanged authorization code");
                Ok(identity)
            }
            None => {
                warn!("Rejected unknown or reused authorization code");
                Err(ProviderError::InvalidCode)
            }
        }
    }

    async fn list_users(&self) -> Result<Vec<User>, ProviderError> {
        match self.dataset().filter(|dataset| !dataset.users.is_empty()) {
            Some(dataset) => {
                info!(count = dataset.users.len(), "Listing dataset users");
                Ok(dataset.users.clone())
            }
            None => {
                info!("Listing fallback users");
                Ok(fallback::users())
            }
        }
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>, ProviderError> {
        match self.dataset().filter(|dataset| !dataset.orgs.is_empty()) {
            Some(dataset) => {
                info!(count = dataset.orgs.len(), "Listing dataset organizations");
                Ok(dataset.orgs.clone())
            }
            None => {
                info!("Listing fallback organizations");
                Ok(fallback::organizations())
            }
        }
    }
}

/// Absolute URLs and host-relative paths are both accepted. Only values that
/// cannot be placed in a `Location` header are rejected.
fn check_redirect_uri(redirect_uri: &str) -> Result<(), ProviderError> {
    let reason = if redirect_uri.is_empty() {
        "empty"
    } else if redirect_uri.chars().any(|c| c.is_whitespace() || c.is_control()) {
        "contains whitespace or control characters"
    } else {
        return Ok(());
    };
    Err(ProviderError::InvalidRedirectUri {
        value: redirect_uri.to_string(),
        reason: reason.to_string(),
    })
}

/// `<redirect_uri>?code=<code>[&state=<state>]`, joining onto an existing
/// query with `&` and keeping any fragment last.
fn redirect_with_code(redirect_uri: &str, code: &str, state: Option<&str>) -> String {
    let (base, fragment) = match redirect_uri.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (redirect_uri, None),
    };

    let separator = match base.find('?') {
        None => "?",
        Some(_) if base.ends_with('?') || base.ends_with('&') => "",
        Some(_) => "&",
    };
    let mut redirect = format!("{base}{separator}code={}", urlencoding::encode(code));
    if let Some(state) = state {
        redirect.push_str("&state=");
        redirect.push_str(&urlencoding::encode(state));
    }
    if let Some(fragment) = fragment {
        redirect.push('#');
        redirect.push_str(fragment);
    }
    redirect
}

fn load_dataset(config: &MockProviderConfig) -> Option<Dataset> {
    let path = &config.dataset_path;
    match storage::load(path) {
        Ok(dataset) => {
            info!(
                path = %path.display(),
                users = dataset.users.len(),
                orgs = dataset.orgs.len(),
                "Loaded dataset"
            );
            Some(dataset)
        }
        Err(err) if err.is_not_found() => {
            info!(path = %path.display(), "Dataset file not found, using fallback data");
            None
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Failed to load dataset, using fallback data");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::config::GenerationConfig;
    use crate::generator::generate_dataset;

    fn dataset() -> Dataset {
        generate_dataset(&GenerationConfig::new(5, 2, 2), &mut StdRng::seed_from_u64(5))
    }

    fn code_of(redirect: &str) -> String {
        let (_, query) = redirect.split_once('?').unwrap();
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "code")
            .map(|(_, value)| value.into_owned())
            .unwrap()
    }

    #[tokio::test]
    async fn redirect_carries_code_and_optional_state() {
        let provider = MockProvider::with_dataset(MockProviderConfig::new("unused.json"), dataset());

        let url = provider
            .initiate_login(LoginParams::new("https://host.example/callback"))
            .await
            .unwrap();
        assert!(url.starts_with("https://host.example/callback?code="));
        assert!(!url.contains("state="));

        let url = provider
            .initiate_login(LoginParams::new("https://host.example/callback").with_state("xyz"))
            .await
            .unwrap();
        assert!(url.ends_with("&state=xyz"));
        assert_eq!(provider.pending_codes(), 2);
    }

    #[tokio::test]
    async fn relative_redirect_is_kept_as_a_path() {
        let provider = MockProvider::with_dataset(MockProviderConfig::new("unused.json"), dataset());

        let url = provider
            .initiate_login(
                LoginParams::new("/api/support/user/account/sso/callback").with_state("a b&c"),
            )
            .await
            .unwrap();
        assert!(url.starts_with("/api/support/user/account/sso/callback?code="));
        assert!(url.ends_with("&state=a%20b%26c"), "{url}");

        let identity = provider.exchange_code(&code_of(&url)).await.unwrap();
        assert!(identity.username.starts_with("test-user"));
    }

    #[test]
    fn code_joins_existing_query_and_precedes_fragment() {
        assert_eq!(
            redirect_with_code("https://h.example/cb?lang=zh#top", "abc", Some("s")),
            "https://h.example/cb?lang=zh&code=abc&state=s#top"
        );
        assert_eq!(redirect_with_code("/cb?", "abc", None), "/cb?code=abc");
    }

    #[tokio::test]
    async fn random_selection_comes_from_roster() {
        let data = dataset();
        let usernames: HashSet<String> = data.users.iter().map(|u| u.username.clone()).collect();
        let provider = MockProvider::with_dataset(MockProviderConfig::new("unused.json"), data);

        for _ in 0..20 {
            let url = provider
                .initiate_login(LoginParams::new("https://host.example/cb"))
                .await
                .unwrap();
            let identity = provider.exchange_code(&code_of(&url)).await.unwrap();
            assert!(usernames.contains(&identity.username));
        }
        assert_eq!(provider.pending_codes(), 0);
    }

    #[tokio::test]
    async fn unknown_forced_user_falls_back_to_random() {
        let config = MockProviderConfig::new("unused.json").with_forced_username("nobody");
        let provider = MockProvider::with_dataset(config, dataset());

        let url = provider
            .initiate_login(LoginParams::new("https://host.example/cb"))
            .await
            .unwrap();
        let identity = provider.exchange_code(&code_of(&url)).await.unwrap();
        assert!(identity.username.starts_with("test-user"));
    }

    #[tokio::test]
    async fn bad_redirect_uri_issues_no_code() {
        let provider = MockProvider::with_dataset(MockProviderConfig::new("unused.json"), dataset());

        let err = provider
            .initiate_login(LoginParams::new("not a url"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidRedirectUri { .. }));

        let err = provider.initiate_login(LoginParams::new("")).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidRedirectUri { .. }));
        assert_eq!(provider.pending_codes(), 0);
    }

    #[test]
    fn config_comes_from_app_config() {
        let app = AppConfig {
            test_data_file: PathBuf::from("/tmp/data.json"),
            test_user_username: Some("test-user0002".to_string()),
            ..AppConfig::default()
        };
        let config = MockProviderConfig::from(&app);

        assert_eq!(config.dataset_path, PathBuf::from("/tmp/data.json"));
        assert_eq!(config.forced_username.as_deref(), Some("test-user0002"));
    }
}
