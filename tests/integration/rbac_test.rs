//! Integration tests for permission enforcement on the admin routes.

mod helpers;

use http::StatusCode;
use panelkit_auth::RbacStore;
use panelkit_entity::role::UpdateRole;

#[tokio::test]
async fn listing_roles_requires_the_permission() {
    let app = helpers::TestApp::new();
    app.create_admin("peon@example.com", "password123").await;
    let token = app.sign_in_admin("peon@example.com", "password123").await;

    let denied = app
        .request("GET", "/api/admin/roles", None, Some(&token))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.body["message"], "Missing permission: roles.list");

    let app = helpers::TestApp::new();
    app.create_admin_with_permissions("lister@example.com", "password123", &["roles.list"])
        .await;
    let token = app.sign_in_admin("lister@example.com", "password123").await;

    let allowed = app
        .request("GET", "/api/admin/roles", None, Some(&token))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
}

#[tokio::test]
async fn super_admin_bypasses_permission_checks() {
    let app = helpers::TestApp::new();
    app.create_super_admin("root@example.com", "password123")
        .await;
    let token = app.sign_in_admin("root@example.com", "password123").await;

    let roles = app
        .request("GET", "/api/admin/roles", None, Some(&token))
        .await;
    assert_eq!(roles.status, StatusCode::OK);

    let created = app
        .request(
            "POST",
            "/api/admin/permissions",
            Some(serde_json::json!({
                "name": "widgets.list",
                "slug": "widgets.list",
                "display_name": "List widgets",
                "group": "widgets",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let me = app
        .request("GET", "/api/admin/auth/me", None, Some(&token))
        .await;
    assert_eq!(me.data()["is_super_admin"], true);
}

#[tokio::test]
async fn role_permissions_flow_to_members() {
    let app = helpers::TestApp::new();
    let admin = app.create_admin("member@example.com", "password123").await;
    let role = app.create_role("Viewer", "viewer", false).await;
    let permission = app.create_permission("roles.list", "roles").await;

    app.set_role_permissions(role.id, &[permission.id]).await;
    app.assign_role(admin.id, role.id).await;

    let token = app.sign_in_admin("member@example.com", "password123").await;
    let response = app
        .request("GET", "/api/admin/roles", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_grants_resolve_to_one_slug() {
    let app = helpers::TestApp::new();
    let admin = app.create_admin("member@example.com", "password123").await;
    let role = app.create_role("Viewer", "viewer", false).await;
    let permission = app.create_permission("roles.list", "roles").await;

    // Granted through the role and directly.
    app.set_role_permissions(role.id, &[permission.id]).await;
    app.assign_role(admin.id, role.id).await;
    app.store
        .grant_permission(admin.id, permission.id)
        .await
        .unwrap();

    let token = app.sign_in_admin("member@example.com", "password123").await;
    let me = app
        .request("GET", "/api/admin/auth/me", None, Some(&token))
        .await;

    assert_eq!(me.data()["permissions"], serde_json::json!(["roles.list"]));
}

#[tokio::test]
async fn revoking_a_role_grant_takes_effect_on_the_next_request() {
    let app = helpers::TestApp::new();
    let admin = app.create_admin("member@example.com", "password123").await;
    let role = app.create_role("Viewer", "viewer", false).await;
    let permission = app.create_permission("roles.list", "roles").await;

    app.set_role_permissions(role.id, &[permission.id]).await;
    app.assign_role(admin.id, role.id).await;

    let token = app.sign_in_admin("member@example.com", "password123").await;
    let before = app
        .request("GET", "/api/admin/roles", None, Some(&token))
        .await;
    assert_eq!(before.status, StatusCode::OK);

    // Grants are resolved per request; the same session loses access as
    // soon as the role's set is cleared.
    app.set_role_permissions(role.id, &[]).await;
    let after = app
        .request("GET", "/api/admin/roles", None, Some(&token))
        .await;
    assert_eq!(after.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn deactivated_role_stops_granting() {
    let app = helpers::TestApp::new();
    let admin = app.create_admin("member@example.com", "password123").await;
    let role = app.create_role("Viewer", "viewer", false).await;
    let permission = app.create_permission("roles.list", "roles").await;

    app.set_role_permissions(role.id, &[permission.id]).await;
    app.assign_role(admin.id, role.id).await;

    let token = app.sign_in_admin("member@example.com", "password123").await;

    app.store
        .update_role(
            role.id,
            &UpdateRole {
                display_name: None,
                description: None,
                order: None,
                is_active: Some(false),
            },
        )
        .await
        .unwrap();

    let response = app
        .request("GET", "/api/admin/roles", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
