//! SSO providers
//!
//! - The `SsoProvider` trait a host calls to drive a login
//! - Provider metadata and registry for lookup by configured name
//! - The mock provider backed by a generated dataset

pub mod codes;
pub mod fallback;
pub mod metadata;
pub mod mock;
pub mod registry;
pub mod trait_;

pub use codes::CodeStore;
pub use metadata::ProviderMetadata;
pub use mock::{MOCK_PROVIDER_NAME, MockProvider, MockProviderConfig};
pub use registry::{ProviderRegistry, RegistryError, active_provider};
pub use trait_::{LoginParams, ProviderError, SsoProvider};
