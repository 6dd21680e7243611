//! HTTP directory client
//!
//! Real client against the hosted identity provider's admin API at
//! `{base_url}/admin/users`. Every call authenticates with the
//! service-role key; that key never appears in logs.

use serde::Deserialize;

use keystead_common::RoleClaims;

use crate::{DirectoryConfig, DirectoryError, DirectoryService, IdentityPage, IdentityRecord};

/// Real directory client for the provider admin API.
pub struct HttpDirectoryService {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
    page_size: usize,
}

/// Wire shape of the provider's paged listing response.
#[derive(Deserialize)]
struct ListUsersResponse {
    users: Vec<IdentityRecord>,
    next_page_token: Option<String>,
}

impl HttpDirectoryService {
    /// Create a new directory client from configuration.
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key: config.service_key,
            page_size: config.page_size,
        }
    }

    fn user_url(&self, uid: &str) -> String {
        format!("{}/admin/users/{}", self.base_url, uid)
    }
}

#[async_trait::async_trait]
impl DirectoryService for HttpDirectoryService {
    async fn get_user(&self, uid: &str) -> Result<IdentityRecord, DirectoryError> {
        let response = self
            .http
            .get(self.user_url(uid))
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DirectoryError::UserNotFound(uid.to_string()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(DirectoryError::Response(format!(
                "Admin API returned {}: {}",
                status, body
            )));
        }

        response
            .json::<IdentityRecord>()
            .await
            .map_err(|e| DirectoryError::Response(e.to_string()))
    }

    async fn set_role_claims(&self, uid: &str, claims: RoleClaims) -> Result<(), DirectoryError> {
        // One update call carrying both claim fields. The provider merges
        // app_metadata at the key level, so unrelated keys survive.
        let body = serde_json::json!({ "app_metadata": claims });

        let response = self
            .http
            .put(self.user_url(uid))
            .bearer_auth(&self.service_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DirectoryError::UserNotFound(uid.to_string()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(DirectoryError::Response(format!(
                "Admin API returned {}: {}",
                status, body
            )));
        }

        tracing::debug!(uid = %uid, role = %claims.role(), "Directory role claims updated");
        Ok(())
    }

    async fn list_users(&self, page_token: Option<&str>) -> Result<IdentityPage, DirectoryError> {
        let mut request = self
            .http
            .get(format!("{}/admin/users", self.base_url))
            .bearer_auth(&self.service_key)
            .query(&[("per_page", self.page_size.to_string())]);

        if let Some(token) = page_token {
            request = request.query(&[("page_token", token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(DirectoryError::Response(format!(
                "Admin API returned {}: {}",
                status, body
            )));
        }

        let page: ListUsersResponse = response
            .json()
            .await
            .map_err(|e| DirectoryError::Response(e.to_string()))?;

        Ok(IdentityPage {
            users: page.users,
            next_page_token: page.next_page_token,
        })
    }
}
