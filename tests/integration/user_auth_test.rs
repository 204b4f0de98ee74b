//! Integration tests for the user-domain authentication flow.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn sign_up_then_sign_in() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/sign-up",
            Some(serde_json::json!({
                "email": "user@example.com",
                "password": "password123",
                "first_name": "Test",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["email"], "user@example.com");

    let token = app.sign_in_user("user@example.com", "password123").await;
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["email"], "user@example.com");
    assert_eq!(me.data()["first_name"], "Test");
}

#[tokio::test]
async fn sign_up_duplicate_email_conflicts() {
    let app = helpers::TestApp::new();

    let body = serde_json::json!({
        "email": "user@example.com",
        "password": "password123",
    });

    let first = app
        .request("POST", "/api/auth/sign-up", Some(body.clone()), None)
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request("POST", "/api/auth/sign-up", Some(body), None)
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn sign_up_rejects_invalid_email() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/sign-up",
            Some(serde_json::json!({
                "email": "not-an-email",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sign_in_wrong_password_is_unauthorized() {
    let app = helpers::TestApp::new();

    app.request(
        "POST",
        "/api/auth/sign-up",
        Some(serde_json::json!({
            "email": "user@example.com",
            "password": "password123",
        })),
        None,
    )
    .await;

    let response = app
        .request(
            "POST",
            "/api/auth/sign-in",
            Some(serde_json::json!({
                "email": "user@example.com",
                "password": "wrong-password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_out_invalidates_the_session() {
    let app = helpers::TestApp::new();

    app.request(
        "POST",
        "/api/auth/sign-up",
        Some(serde_json::json!({
            "email": "user@example.com",
            "password": "password123",
        })),
        None,
    )
    .await;

    let token = app.sign_in_user("user@example.com", "password123").await;

    let response = app
        .request("POST", "/api/auth/sign-out", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_token_is_rejected_on_the_admin_domain() {
    let app = helpers::TestApp::new();

    app.request(
        "POST",
        "/api/auth/sign-up",
        Some(serde_json::json!({
            "email": "user@example.com",
            "password": "password123",
        })),
        None,
    )
    .await;

    let token = app.sign_in_user("user@example.com", "password123").await;

    let response = app
        .request("GET", "/api/admin/auth/me", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_public() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
}
