//! Mock directory service implementation
//!
//! In-memory user store for tests and local development. Thread-safe via
//! `Arc<Mutex<>>`. Iteration order is the BTreeMap's key order, so paging
//! is deterministic.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use keystead_common::RoleClaims;

use crate::{DirectoryError, DirectoryService, IdentityPage, IdentityRecord};

/// Mock directory that stores identities in memory.
///
/// Tests can seed users, inspect stored claims, count listing calls, and
/// inject failures to exercise backend-error paths.
#[derive(Debug, Clone)]
pub struct MockDirectoryService {
    users: Arc<Mutex<BTreeMap<String, IdentityRecord>>>,
    fail_message: Arc<Mutex<Option<String>>>,
    list_calls: Arc<Mutex<u64>>,
    page_size: usize,
}

impl MockDirectoryService {
    /// Create a new mock directory with the default page size.
    pub fn new() -> Self {
        Self::with_page_size(crate::DEFAULT_PAGE_SIZE)
    }

    /// Create a new mock directory with a custom listing page size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            users: Arc::new(Mutex::new(BTreeMap::new())),
            fail_message: Arc::new(Mutex::new(None)),
            list_calls: Arc::new(Mutex::new(0)),
            page_size: page_size.max(1),
        }
    }

    /// Insert or replace an identity record.
    pub fn insert_user(&self, record: IdentityRecord) {
        self.users
            .lock()
            .expect("users lock poisoned — prior test panicked")
            .insert(record.uid.clone(), record);
    }

    /// Seed a minimal enabled identity with no role claim.
    pub fn seed_user(&self, uid: &str, email: Option<&str>) {
        self.insert_user(IdentityRecord {
            uid: uid.to_string(),
            email: email.map(|e| e.to_string()),
            display_name: None,
            disabled: false,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            last_sign_in_at: "2026-01-01T00:00:00Z".to_string(),
            app_metadata: serde_json::Map::new(),
        });
    }

    /// Return a stored identity, if present.
    pub fn stored_user(&self, uid: &str) -> Option<IdentityRecord> {
        self.users
            .lock()
            .expect("users lock poisoned — prior test panicked")
            .get(uid)
            .cloned()
    }

    /// Number of identities in the store.
    pub fn user_count(&self) -> usize {
        self.users
            .lock()
            .expect("users lock poisoned — prior test panicked")
            .len()
    }

    /// Number of `list_users` calls made so far.
    pub fn list_call_count(&self) -> u64 {
        *self
            .list_calls
            .lock()
            .expect("list counter lock poisoned — prior test panicked")
    }

    /// Make every subsequent operation fail with the given message.
    pub fn inject_failure(&self, message: &str) {
        *self
            .fail_message
            .lock()
            .expect("failure lock poisoned — prior test panicked") = Some(message.to_string());
    }

    /// Clear an injected failure.
    pub fn clear_failure(&self) {
        *self
            .fail_message
            .lock()
            .expect("failure lock poisoned — prior test panicked") = None;
    }

    fn check_failure(&self) -> Result<(), DirectoryError> {
        if let Some(message) = self
            .fail_message
            .lock()
            .map_err(|e| DirectoryError::Request(format!("failure lock poisoned: {e}")))?
            .clone()
        {
            return Err(DirectoryError::Request(message));
        }
        Ok(())
    }
}

impl Default for MockDirectoryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DirectoryService for MockDirectoryService {
    async fn get_user(&self, uid: &str) -> Result<IdentityRecord, DirectoryError> {
        self.check_failure()?;
        self.users
            .lock()
            .map_err(|e| DirectoryError::Request(format!("users lock poisoned: {e}")))?
            .get(uid)
            .cloned()
            .ok_or_else(|| DirectoryError::UserNotFound(uid.to_string()))
    }

    async fn set_role_claims(&self, uid: &str, claims: RoleClaims) -> Result<(), DirectoryError> {
        self.check_failure()?;
        let mut users = self
            .users
            .lock()
            .map_err(|e| DirectoryError::Request(format!("users lock poisoned: {e}")))?;

        let record = users
            .get_mut(uid)
            .ok_or_else(|| DirectoryError::UserNotFound(uid.to_string()))?;

        // Key-level merge: both claim fields land together, other keys stay.
        record
            .app_metadata
            .insert("role".to_string(), serde_json::json!(claims.role()));
        record
            .app_metadata
            .insert("admin".to_string(), serde_json::json!(claims.admin()));

        tracing::debug!(uid = %uid, role = %claims.role(), "Mock directory: role claims updated");
        Ok(())
    }

    async fn list_users(&self, page_token: Option<&str>) -> Result<IdentityPage, DirectoryError> {
        {
            let mut calls = self
                .list_calls
                .lock()
                .map_err(|e| DirectoryError::Request(format!("list counter lock poisoned: {e}")))?;
            *calls += 1;
        }
        self.check_failure()?;

        let start: usize = match page_token {
            None => 0,
            Some(token) => token.parse().map_err(|_| {
                DirectoryError::Response(format!("Invalid page token: {}", token))
            })?,
        };

        let users = self
            .users
            .lock()
            .map_err(|e| DirectoryError::Request(format!("users lock poisoned: {e}")))?;

        let page: Vec<IdentityRecord> = users
            .values()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();

        let next_page_token = if start + page.len() < users.len() {
            Some((start + page.len()).to_string())
        } else {
            None
        };

        Ok(IdentityPage {
            users: page,
            next_page_token,
        })
    }
}
