//! Keystead Identity Directory Service
//!
//! The identity provider's administrative interface, as seen by this
//! service: read a user record, write its role claims, and page through
//! every identity. Supports:
//! - HTTP client against the hosted provider's admin API for production
//! - Mock in-memory directory for testing and development
//! - Configurable provider, base URL, service key, and page size
//!
//! Custom claims written here are embedded (signed) into tokens the
//! provider issues afterwards; they are the sole persisted authorization
//! state of the role subsystem.

pub mod client;
pub mod mock;

use keystead_common::{Role, RoleClaims};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Directory configuration error: {0}")]
    Configuration(String),

    #[error("Directory user not found: {0}")]
    UserNotFound(String),

    #[error("Directory request error: {0}")]
    Request(String),

    #[error("Directory response error: {0}")]
    Response(String),
}

/// One identity as stored by the provider.
///
/// Timestamps are provider-formatted date strings and pass through
/// uninterpreted. `app_metadata` is the custom-claims bag; read it through
/// [`IdentityRecord::role`] so unknown values normalize at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    #[serde(rename = "id")]
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub last_sign_in_at: String,
    #[serde(default)]
    pub app_metadata: serde_json::Map<String, serde_json::Value>,
}

impl IdentityRecord {
    /// The identity's role claim, decoded leniently: an absent or
    /// unrecognizable claim reads as `Role::None`.
    pub fn role(&self) -> Role {
        Role::from_claim_value(self.app_metadata.get("role"))
    }
}

/// One bounded page of identities plus the continuation token, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityPage {
    pub users: Vec<IdentityRecord>,
    pub next_page_token: Option<String>,
}

/// Directory service configuration.
#[derive(Clone)]
pub struct DirectoryConfig {
    /// Directory provider (http, mock)
    pub provider: String,
    /// Base URL of the provider's admin API
    pub base_url: String,
    /// Service-role key for authenticating admin API calls
    pub service_key: String,
    /// Page size for user listing
    pub page_size: usize,
}

impl std::fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("service_key", &"[REDACTED]")
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Default page size for user listing, matching the provider's bound.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

impl DirectoryConfig {
    /// Create directory config from environment variables.
    pub fn from_env() -> Result<Self, DirectoryError> {
        let provider = std::env::var("DIRECTORY_PROVIDER").unwrap_or_else(|_| "mock".to_string());

        let base_url = std::env::var("DIRECTORY_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:9999".to_string());

        let service_key = std::env::var("DIRECTORY_SERVICE_KEY").unwrap_or_default();

        let page_size = std::env::var("DIRECTORY_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);

        if provider != "mock" && service_key.is_empty() {
            return Err(DirectoryError::Configuration(
                "DIRECTORY_SERVICE_KEY is required for the http provider".to_string(),
            ));
        }

        Ok(Self {
            provider,
            base_url,
            service_key,
            page_size,
        })
    }
}

/// Directory service trait for different implementations.
///
/// Every operation is a network call against the provider and may fail;
/// callers propagate provider timeouts and errors rather than retry here.
#[async_trait::async_trait]
pub trait DirectoryService: Send + Sync {
    /// Fetch a single identity by uid.
    async fn get_user(&self, uid: &str) -> Result<IdentityRecord, DirectoryError>;

    /// Write the identity's role claims. Both the role and its admin
    /// mirror land in the provider in this single update call; unrelated
    /// metadata keys are left untouched.
    async fn set_role_claims(&self, uid: &str, claims: RoleClaims) -> Result<(), DirectoryError>;

    /// Fetch one bounded page of identities. Pass the previous page's
    /// `next_page_token` to continue; `None` starts from the beginning.
    async fn list_users(&self, page_token: Option<&str>) -> Result<IdentityPage, DirectoryError>;
}

/// Factory for creating DirectoryService implementations.
pub struct DirectoryServiceFactory;

impl DirectoryServiceFactory {
    /// Create a DirectoryService based on configuration.
    pub fn create(config: DirectoryConfig) -> Result<Box<dyn DirectoryService>, DirectoryError> {
        match config.provider.as_str() {
            "http" => {
                tracing::info!("Creating HTTP directory service");
                if config.service_key.is_empty() {
                    return Err(DirectoryError::Configuration(
                        "DIRECTORY_SERVICE_KEY is required for the http provider".to_string(),
                    ));
                }
                Ok(Box::new(client::HttpDirectoryService::new(config)))
            }
            "mock" => {
                tracing::info!("Creating mock directory service");
                Ok(Box::new(mock::MockDirectoryService::with_page_size(
                    config.page_size,
                )))
            }
            provider => Err(DirectoryError::Configuration(format!(
                "Unknown directory provider: {}. Supported providers: http, mock",
                provider
            ))),
        }
    }
}
