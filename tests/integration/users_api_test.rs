//! User listing integration tests

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{
    admin_token, assert_error, get_request, mint_token, post_json, response_json, tenant_token,
    TestApp, BOOTSTRAP_EMAIL,
};

#[tokio::test]
async fn test_listing_requires_authentication() {
    let app = TestApp::new();

    let response = app.request(get_request("/v1/users", None)).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED").await;
}

#[tokio::test]
async fn test_listing_denies_non_admin_before_any_directory_call() {
    let app = TestApp::new();
    app.directory.seed_user("someone", None);

    let token = tenant_token("caller");
    let response = app.request(get_request("/v1/users", Some(&token))).await;

    assert_error(response, StatusCode::FORBIDDEN, "PERMISSION_DENIED").await;
    // Short-circuit: zero listing calls reached the directory
    assert_eq!(app.directory.list_call_count(), 0);
}

#[tokio::test]
async fn test_listing_concatenates_all_pages() {
    // 5 identities, page size 2 — three pages, no duplicates, no misses
    let app = TestApp::with_page_size(2);
    for i in 0..5 {
        app.directory
            .seed_user(&format!("uid-{}", i), Some(&format!("u{}@keystead.test", i)));
    }

    let token = admin_token("admin-uid");
    let response = app.request(get_request("/v1/users", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 5);

    let mut uids: Vec<&str> = users.iter().map(|u| u["uid"].as_str().unwrap()).collect();
    uids.sort_unstable();
    uids.dedup();
    assert_eq!(uids.len(), 5);

    assert_eq!(app.directory.list_call_count(), 3);
}

#[tokio::test]
async fn test_listing_normalizes_garbage_role_claims() {
    let app = TestApp::new();
    app.directory.seed_user("odd-uid", Some("odd@keystead.test"));
    {
        let mut record = app.directory.stored_user("odd-uid").unwrap();
        record
            .app_metadata
            .insert("role".to_string(), json!("superuser"));
        app.directory.insert_user(record);
    }

    let token = admin_token("admin-uid");
    let response = app.request(get_request("/v1/users", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["role"], "none");
}

#[tokio::test]
async fn test_listing_projects_identity_fields() {
    let app = TestApp::new();
    app.directory.seed_user("uid-1", Some("one@keystead.test"));

    let token = admin_token("admin-uid");
    let response = app.request(get_request("/v1/users", Some(&token))).await;
    let body = response_json(response).await;

    let user = &body["users"][0];
    assert_eq!(user["uid"], "uid-1");
    assert_eq!(user["email"], "one@keystead.test");
    assert_eq!(user["disabled"], false);
    assert_eq!(user["creation_time"], "2026-01-01T00:00:00Z");
    assert_eq!(user["last_sign_in_time"], "2026-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_listing_failure_returns_no_partial_results() {
    let app = TestApp::new();
    app.directory.seed_user("uid-1", None);
    app.directory.inject_failure("listing backend unavailable");

    let token = admin_token("admin-uid");
    let response = app.request(get_request("/v1/users", Some(&token))).await;

    assert_error(response, StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL").await;
}

#[tokio::test]
async fn test_fresh_promotion_does_not_open_listing_until_refresh() {
    // The stale-claim window: authorization always reads the token
    // presented with the current request.
    let app = TestApp::new();
    app.directory.seed_user("boot-uid", Some(BOOTSTRAP_EMAIL));

    // Bootstrap self-promotion succeeds...
    let old_token = mint_token("boot-uid", Some(BOOTSTRAP_EMAIL), None, Some(false));
    let response = app
        .request(post_json(
            "/v1/roles",
            Some(&old_token),
            json!({"uid": "boot-uid", "role": "admin"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // ...but the pre-promotion token still cannot list users
    let response = app.request(get_request("/v1/users", Some(&old_token))).await;
    assert_error(response, StatusCode::FORBIDDEN, "PERMISSION_DENIED").await;

    // After a forced refresh the new token carries the admin claim
    let refreshed = mint_token("boot-uid", Some(BOOTSTRAP_EMAIL), Some("admin"), Some(true));
    let response = app.request(get_request("/v1/users", Some(&refreshed))).await;
    assert_eq!(response.status(), StatusCode::OK);
}
