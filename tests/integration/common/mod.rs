//! Common test utilities and fixtures for integration tests
//!
//! Provides shared infrastructure for all integration tests:
//! - Composed router over a seeded mock directory
//! - Token minting helpers
//! - Request and response helpers

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tower::ServiceExt;

use keystead_auth::{AuthConfig, TokenClaims, TokenVerifier};
use keystead_directory::mock::MockDirectoryService;
use keystead_roles::{RoleAuthority, RolesState};

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_only";
pub const BOOTSTRAP_EMAIL: &str = "ops@keystead.test";
#[allow(dead_code)]
pub const HOOK_SECRET: &str = "test-hook-secret";

/// Composed application over a mock directory.
#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub directory: MockDirectoryService,
}

impl TestApp {
    /// Create a test application with the default listing page size.
    pub fn new() -> Self {
        Self::with_page_size(1000)
    }

    /// Create a test application with a custom listing page size.
    pub fn with_page_size(page_size: usize) -> Self {
        let directory = MockDirectoryService::with_page_size(page_size);
        let directory_arc: Arc<dyn keystead_directory::DirectoryService> =
            Arc::new(directory.clone());

        let verifier = TokenVerifier::new(AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
            issuer: None,
            audience: None,
        });

        let authority =
            RoleAuthority::new(Arc::clone(&directory_arc), BOOTSTRAP_EMAIL.to_string());

        let state = RolesState {
            directory: directory_arc,
            verifier,
            authority,
            hook_secret: Some(HOOK_SECRET.to_string()),
        };

        let router = keystead_roles::routes().with_state(state);

        TestApp { router, directory }
    }

    /// Send a request through the router.
    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router should be infallible")
    }
}

/// Mint an HS256 token the test verifier accepts.
pub fn mint_token(uid: &str, email: Option<&str>, role: Option<&str>, admin: Option<bool>) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = TokenClaims {
        sub: uid.to_string(),
        email: email.map(|e| e.to_string()),
        iat: now as u64,
        exp: (now + 3600) as u64,
        aud: "authenticated".to_string(),
        role: role.map(|r| r.to_string()),
        admin,
    };
    let key = EncodingKey::from_secret(TEST_JWT_SECRET.as_ref());
    encode(&Header::new(Algorithm::HS256), &claims, &key).expect("Failed to encode test JWT")
}

/// Mint a token for an established admin.
#[allow(dead_code)]
pub fn admin_token(uid: &str) -> String {
    mint_token(uid, None, Some("admin"), Some(true))
}

/// Mint a token for a plain tenant.
#[allow(dead_code)]
pub fn tenant_token(uid: &str) -> String {
    mint_token(uid, None, Some("tenant"), Some(false))
}

/// Build an authenticated POST with a JSON body.
pub fn post_json(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Build a lifecycle-hook POST carrying the shared hook secret.
#[allow(dead_code)]
pub fn hook_request(uri: &str, secret: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(secret) = secret {
        builder = builder.header("x-webhook-secret", secret);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Build an authenticated GET.
#[allow(dead_code)]
pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Read a response body as JSON.
pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body was not JSON")
}

/// Assert an error response carries the expected status and error code.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let body = response_json(response).await;
    assert_eq!(
        body["error"]["code"], code,
        "unexpected error body: {}",
        body
    );
}
