//! Integration tests for the admin authentication flow.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn sign_in_returns_tokens_and_profile() {
    let app = helpers::TestApp::new();
    app.create_admin("boss@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/admin/auth/sign-in",
            Some(serde_json::json!({
                "email": "boss@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert!(data["access_token"].is_string());
    assert_eq!(data["refresh_token"].as_str().unwrap().len(), 64);
    assert!(data["expires_at"].is_string());
    assert_eq!(data["admin"]["email"], "boss@example.com");
    assert!(data["admin"]["password_hash"].is_null());
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let app = helpers::TestApp::new();
    app.create_admin("boss@example.com", "password123").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/admin/auth/sign-in",
            Some(serde_json::json!({
                "email": "boss@example.com",
                "password": "not-the-password",
            })),
            None,
        )
        .await;

    let unknown_email = app
        .request(
            "POST",
            "/api/admin/auth/sign-in",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["message"], unknown_email.body["message"]);
}

#[tokio::test]
async fn me_returns_resolved_grants() {
    let app = helpers::TestApp::new();
    app.create_admin_with_permissions("boss@example.com", "password123", &["roles.list"])
        .await;

    let token = app.sign_in_admin("boss@example.com", "password123").await;
    let response = app
        .request("GET", "/api/admin/auth/me", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["admin"]["email"], "boss@example.com");
    assert_eq!(data["permissions"], serde_json::json!(["roles.list"]));
    assert_eq!(data["is_super_admin"], false);
    assert_eq!(data["roles"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/admin/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", "/api/admin/auth/me", None, Some("not-a-real-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_out_invalidates_the_session() {
    let app = helpers::TestApp::new();
    app.create_admin("boss@example.com", "password123").await;
    let token = app.sign_in_admin("boss@example.com", "password123").await;

    let response = app
        .request("POST", "/api/admin/auth/sign-out", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let me = app
        .request("GET", "/api/admin/auth/me", None, Some(&token))
        .await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_requires_permission() {
    let app = helpers::TestApp::new();
    app.create_admin("peon@example.com", "password123").await;
    let token = app.sign_in_admin("peon@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/admin/auth/register",
            Some(serde_json::json!({
                "email": "new@example.com",
                "password": "password123",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "Missing permission: admins.create");
}

#[tokio::test]
async fn register_creates_admin_and_assigns_default_role() {
    let app = helpers::TestApp::new();
    app.create_admin_with_permissions("boss@example.com", "password123", &["admins.create"])
        .await;
    app.create_role("Editor", "editor", true).await;

    let token = app.sign_in_admin("boss@example.com", "password123").await;
    let response = app
        .request(
            "POST",
            "/api/admin/auth/register",
            Some(serde_json::json!({
                "email": "new@example.com",
                "password": "password123",
                "first_name": "New",
                "last_name": "Admin",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["email"], "new@example.com");

    // The default role is visible to the new admin immediately.
    let new_token = app.sign_in_admin("new@example.com", "password123").await;
    let me = app
        .request("GET", "/api/admin/auth/me", None, Some(&new_token))
        .await;

    assert_eq!(me.status, StatusCode::OK);
    let roles = me.data()["roles"].as_array().unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0]["slug"], "editor");
}

#[tokio::test]
async fn register_duplicate_email_conflicts() {
    let app = helpers::TestApp::new();
    app.create_admin_with_permissions("boss@example.com", "password123", &["admins.create"])
        .await;
    app.create_admin("taken@example.com", "password123").await;

    let token = app.sign_in_admin("boss@example.com", "password123").await;
    let response = app
        .request(
            "POST",
            "/api/admin/auth/register",
            Some(serde_json::json!({
                "email": "taken@example.com",
                "password": "password123",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = helpers::TestApp::new();
    app.create_admin_with_permissions("boss@example.com", "password123", &["admins.create"])
        .await;

    let token = app.sign_in_admin("boss@example.com", "password123").await;
    let response = app
        .request(
            "POST",
            "/api/admin/auth/register",
            Some(serde_json::json!({
                "email": "new@example.com",
                "password": "short",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
