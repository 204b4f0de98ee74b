//! Shared test helpers for integration tests.
//!
//! All tests run against the full router over the in-memory store, so the
//! suite needs no external services.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use panelkit_auth::{MemoryStore, PasswordHasher, PrincipalStore, RbacStore, SessionStore};
use panelkit_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig, SessionConfig,
};
use panelkit_entity::admin::{Admin, CreateAdmin};
use panelkit_entity::permission::{CreatePermission, Permission};
use panelkit_entity::role::{CreateRole, Role, SUPER_ADMIN};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Direct store handle for seeding state behind the API's back
    pub store: Arc<MemoryStore>,
    /// Application config
    pub config: Arc<AppConfig>,
    hasher: PasswordHasher,
}

/// Configuration with low-cost hash parameters to keep the suite fast.
fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-signing-secret".to_string(),
            access_token_ttl: "1h".to_string(),
            refresh_token_ttl: "1d".to_string(),
            hash_memory_kib: 8,
            hash_iterations: 1,
            hash_parallelism: 1,
            password_min_length: 6,
        },
        session: SessionConfig::default(),
        logging: LoggingConfig::default(),
    }
}

impl TestApp {
    /// Create a new test application over an empty in-memory store.
    pub fn new() -> Self {
        let config = Arc::new(test_config());
        let store = Arc::new(MemoryStore::new());

        let state = panelkit_api::AppState::build(
            Arc::clone(&config),
            Arc::clone(&store) as Arc<dyn SessionStore>,
            Arc::clone(&store) as Arc<dyn PrincipalStore>,
            Arc::clone(&store) as Arc<dyn RbacStore>,
        )
        .expect("Failed to build app state");

        let router = panelkit_api::build_router(state);
        let hasher = PasswordHasher::new(&config.auth).expect("Failed to build hasher");

        Self {
            router,
            store,
            config,
            hasher,
        }
    }

    /// Create an admin account with no roles or permissions.
    pub async fn create_admin(&self, email: &str, password: &str) -> Admin {
        let hash = self.hasher.hash(password).expect("Failed to hash password");

        self.store
            .insert_admin(&CreateAdmin {
                email: email.to_string(),
                password_hash: Some(hash),
                first_name: None,
                last_name: None,
                created_by: None,
            })
            .await
            .expect("Failed to create test admin")
    }

    /// Create an admin holding the given permission slugs as direct grants.
    pub async fn create_admin_with_permissions(
        &self,
        email: &str,
        password: &str,
        slugs: &[&str],
    ) -> Admin {
        let admin = self.create_admin(email, password).await;

        for slug in slugs {
            let group = slug.split('.').next().unwrap_or("general");
            let permission = self.create_permission(slug, group).await;
            self.store
                .grant_permission(admin.id, permission.id)
                .await
                .expect("Failed to grant permission");
        }

        admin
    }

    /// Create an admin holding the reserved superuser role.
    pub async fn create_super_admin(&self, email: &str, password: &str) -> Admin {
        let admin = self.create_admin(email, password).await;
        let role = self.create_role(SUPER_ADMIN, SUPER_ADMIN, false).await;
        self.store
            .assign_role(admin.id, role.id)
            .await
            .expect("Failed to assign role");
        admin
    }

    /// Create a role.
    pub async fn create_role(&self, name: &str, slug: &str, is_default: bool) -> Role {
        self.store
            .create_role(&CreateRole {
                name: name.to_string(),
                slug: slug.to_string(),
                display_name: name.to_string(),
                description: None,
                is_default,
                order: 0,
            })
            .await
            .expect("Failed to create test role")
    }

    /// Create a permission.
    pub async fn create_permission(&self, slug: &str, group: &str) -> Permission {
        self.store
            .create_permission(&CreatePermission {
                name: slug.to_string(),
                slug: slug.to_string(),
                display_name: slug.to_string(),
                group: group.to_string(),
                group_order: 0,
                order: 0,
            })
            .await
            .expect("Failed to create test permission")
    }

    /// Set a role's full permission set.
    pub async fn set_role_permissions(&self, role_id: Uuid, permission_ids: &[Uuid]) {
        self.store
            .replace_role_permissions(role_id, permission_ids)
            .await
            .expect("Failed to set role permissions");
    }

    /// Attach a role to an admin.
    pub async fn assign_role(&self, admin_id: Uuid, role_id: Uuid) {
        self.store
            .assign_role(admin_id, role_id)
            .await
            .expect("Failed to assign role");
    }

    /// Sign in on the admin domain and return the access token.
    pub async fn sign_in_admin(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .request("POST", "/api/admin/auth/sign-in", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Admin sign-in failed: {:?}",
            response.body
        );

        response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in sign-in response")
            .to_string()
    }

    /// Sign in on the user domain and return the access token.
    pub async fn sign_in_user(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/sign-in", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "User sign-in failed: {:?}",
            response.body
        );

        response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in sign-in response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}
