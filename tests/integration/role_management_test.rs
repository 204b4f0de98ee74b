//! Integration tests for role and permission catalog management.

mod helpers;

use http::StatusCode;

async fn manager_token(app: &helpers::TestApp) -> String {
    app.create_super_admin("root@example.com", "password123")
        .await;
    app.sign_in_admin("root@example.com", "password123").await
}

#[tokio::test]
async fn create_role_and_list_it() {
    let app = helpers::TestApp::new();
    let token = manager_token(&app).await;

    let created = app
        .request(
            "POST",
            "/api/admin/roles",
            Some(serde_json::json!({
                "name": "Editor",
                "slug": "editor",
                "display_name": "Content Editor",
                "description": "Can edit content",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["slug"], "editor");

    let list = app
        .request("GET", "/api/admin/roles", None, Some(&token))
        .await;
    assert_eq!(list.status, StatusCode::OK);

    let slugs: Vec<&str> = list
        .data()
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["slug"].as_str())
        .collect();
    assert!(slugs.contains(&"editor"));
}

#[tokio::test]
async fn duplicate_role_slug_conflicts() {
    let app = helpers::TestApp::new();
    let token = manager_token(&app).await;

    let body = serde_json::json!({
        "name": "Editor",
        "slug": "editor",
        "display_name": "Content Editor",
    });

    let first = app
        .request("POST", "/api/admin/roles", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request("POST", "/api/admin/roles", Some(body), Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn update_role_changes_only_submitted_fields() {
    let app = helpers::TestApp::new();
    let token = manager_token(&app).await;
    let role = app.create_role("Editor", "editor", false).await;

    let updated = app
        .request(
            "PUT",
            &format!("/api/admin/roles/{}", role.id),
            Some(serde_json::json!({ "display_name": "Senior Editor" })),
            Some(&token),
        )
        .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["display_name"], "Senior Editor");
    assert_eq!(updated.data()["slug"], "editor");
}

#[tokio::test]
async fn deleted_role_is_gone() {
    let app = helpers::TestApp::new();
    let token = manager_token(&app).await;
    let role = app.create_role("Editor", "editor", false).await;

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/admin/roles/{}", role.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let get = app
        .request(
            "GET",
            &format!("/api/admin/roles/{}", role.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_role_is_not_found() {
    let app = helpers::TestApp::new();
    let token = manager_token(&app).await;

    let response = app
        .request(
            "GET",
            &format!("/api/admin/roles/{}", uuid::Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn replacing_role_permissions_replaces_the_whole_set() {
    let app = helpers::TestApp::new();
    let token = manager_token(&app).await;
    let role = app.create_role("Editor", "editor", false).await;
    let read = app.create_permission("posts.read", "posts").await;
    let write = app.create_permission("posts.write", "posts").await;

    let first = app
        .request(
            "PUT",
            &format!("/api/admin/roles/{}/permissions", role.id),
            Some(serde_json::json!({ "permission_ids": [read.id] })),
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.data().as_array().unwrap().len(), 1);
    assert_eq!(first.data()[0]["slug"], "posts.read");

    // A second submission replaces rather than merges.
    let second = app
        .request(
            "PUT",
            &format!("/api/admin/roles/{}/permissions", role.id),
            Some(serde_json::json!({ "permission_ids": [write.id] })),
            Some(&token),
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.data().as_array().unwrap().len(), 1);
    assert_eq!(second.data()[0]["slug"], "posts.write");

    // An empty list clears every grant.
    let cleared = app
        .request(
            "PUT",
            &format!("/api/admin/roles/{}/permissions", role.id),
            Some(serde_json::json!({ "permission_ids": [] })),
            Some(&token),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert_eq!(cleared.data().as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_and_filter_permissions_by_group() {
    let app = helpers::TestApp::new();
    let token = manager_token(&app).await;

    for (slug, group) in [
        ("posts.read", "posts"),
        ("posts.write", "posts"),
        ("media.upload", "media"),
    ] {
        let created = app
            .request(
                "POST",
                "/api/admin/permissions",
                Some(serde_json::json!({
                    "name": slug,
                    "slug": slug,
                    "display_name": slug,
                    "group": group,
                })),
                Some(&token),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
    }

    let all = app
        .request("GET", "/api/admin/permissions", None, Some(&token))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.data().as_array().unwrap().len(), 3);

    let posts = app
        .request(
            "GET",
            "/api/admin/permissions?group=posts",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(posts.status, StatusCode::OK);
    assert_eq!(posts.data().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_permission_slug_conflicts() {
    let app = helpers::TestApp::new();
    let token = manager_token(&app).await;
    app.create_permission("posts.read", "posts").await;

    let response = app
        .request(
            "POST",
            "/api/admin/permissions",
            Some(serde_json::json!({
                "name": "posts.read",
                "slug": "posts.read",
                "display_name": "Read posts",
                "group": "posts",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn deleted_permission_leaves_the_listing() {
    let app = helpers::TestApp::new();
    let token = manager_token(&app).await;
    let permission = app.create_permission("posts.read", "posts").await;

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/admin/permissions/{}", permission.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let list = app
        .request("GET", "/api/admin/permissions", None, Some(&token))
        .await;
    assert_eq!(list.data().as_array().unwrap().len(), 0);
}
