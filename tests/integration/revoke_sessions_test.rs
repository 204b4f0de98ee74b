//! Integration tests for bulk session revocation on admin accounts.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn revocation_requires_the_permission() {
    let app = helpers::TestApp::new();
    app.create_admin("peon@example.com", "password123").await;
    let target = app.create_admin("target@example.com", "password123").await;

    let token = app.sign_in_admin("peon@example.com", "password123").await;
    let response = app
        .request(
            "POST",
            &format!("/api/admin/admins/{}/revoke-sessions", target.id),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "Missing permission: admins.update");
}

#[tokio::test]
async fn revocation_kills_every_target_session_and_spares_the_actor() {
    let app = helpers::TestApp::new();
    app.create_admin_with_permissions("boss@example.com", "password123", &["admins.update"])
        .await;
    let target = app.create_admin("target@example.com", "password123").await;

    let first = app.sign_in_admin("target@example.com", "password123").await;
    let second = app.sign_in_admin("target@example.com", "password123").await;
    let actor = app.sign_in_admin("boss@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/admins/{}/revoke-sessions", target.id),
            None,
            Some(&actor),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["revoked"], 2);

    for token in [&first, &second] {
        let me = app
            .request("GET", "/api/admin/auth/me", None, Some(token))
            .await;
        assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    }

    let me = app
        .request("GET", "/api/admin/auth/me", None, Some(&actor))
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn revocation_is_idempotent_at_the_http_level() {
    let app = helpers::TestApp::new();
    app.create_admin_with_permissions("boss@example.com", "password123", &["admins.update"])
        .await;
    let target = app.create_admin("target@example.com", "password123").await;
    app.sign_in_admin("target@example.com", "password123").await;

    let actor = app.sign_in_admin("boss@example.com", "password123").await;
    let path = format!("/api/admin/admins/{}/revoke-sessions", target.id);

    let first = app.request("POST", &path, None, Some(&actor)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.data()["revoked"], 1);

    let second = app.request("POST", &path, None, Some(&actor)).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.data()["revoked"], 0);
}

#[tokio::test]
async fn unknown_admin_is_not_found() {
    let app = helpers::TestApp::new();
    app.create_admin_with_permissions("boss@example.com", "password123", &["admins.update"])
        .await;
    let actor = app.sign_in_admin("boss@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/admins/{}/revoke-sessions", uuid::Uuid::new_v4()),
            None,
            Some(&actor),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
