//! Provider trait definition
//!
//! The interface an authentication host calls to drive an SSO provider.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Organization, User, UserIdentity};

/// Errors returned by provider operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The code was never issued or has already been exchanged.
    #[error("invalid code")]
    InvalidCode,
    #[error("invalid redirect uri '{value}': {reason}")]
    InvalidRedirectUri { value: String, reason: String },
    #[error("provider '{provider}' does not support {operation}")]
    Unsupported {
        provider: String,
        operation: &'static str,
    },
}

/// Parameters for starting a login.
#[derive(Debug, Clone)]
pub struct LoginParams {
    pub redirect_uri: String,
    pub state: Option<String>,
}

impl LoginParams {
    pub fn new(redirect_uri: impl Into<String>) -> Self {
        Self {
            redirect_uri: redirect_uri.into(),
            state: None,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

#[async_trait]
pub trait SsoProvider: Send + Sync {
    /// Provider name used for registry lookup.
    fn name(&self) -> &str;

    /// Begin a login. Returns the redirect target for the user agent: the
    /// caller's `redirect_uri`, absolute or relative, carrying the code.
    async fn initiate_login(&self, params: LoginParams) -> Result<String, ProviderError>;

    /// Exchange a one-time code for the identity it was issued for.
    async fn exchange_code(&self, code: &str) -> Result<UserIdentity, ProviderError>;

    /// List every user known to the provider.
    async fn list_users(&self) -> Result<Vec<User>, ProviderError> {
        Err(ProviderError::Unsupported {
            provider: self.name().to_string(),
            operation: "user listing",
        })
    }

    /// List every organization known to the provider.
    async fn list_organizations(&self) -> Result<Vec<Organization>, ProviderError> {
        Err(ProviderError::Unsupported {
            provider: self.name().to_string(),
            operation: "organization listing",
        })
    }
}
