#![allow(dead_code)]

use aula::aula_config::{CorsConfig, JwtConfig};
use aula::aula_models::{ExtraFields, User};
use aula::modules::users::UserService;
use aula::router::init_router;
use aula::state::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestUser {
    pub user: User,
    pub password: String,
}

impl TestUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
    }
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig::from_list("http://localhost:5173"),
    };
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub async fn create_regular_user(pool: &PgPool) -> TestUser {
    let user = UserService::create_user(
        pool,
        &generate_unique_email(),
        TEST_PASSWORD,
        ExtraFields::default(),
    )
    .await
    .unwrap();
    TestUser {
        user,
        password: TEST_PASSWORD.to_string(),
    }
}

pub async fn create_staff_user(pool: &PgPool) -> TestUser {
    let user = UserService::create_staff_user(
        pool,
        &generate_unique_email(),
        TEST_PASSWORD,
        ExtraFields::default(),
    )
    .await
    .unwrap();
    TestUser {
        user,
        password: TEST_PASSWORD.to_string(),
    }
}

pub async fn create_superuser(pool: &PgPool) -> TestUser {
    let user = UserService::create_superuser(
        pool,
        &generate_unique_email(),
        TEST_PASSWORD,
        ExtraFields::default(),
    )
    .await
    .unwrap();
    TestUser {
        user,
        password: TEST_PASSWORD.to_string(),
    }
}

/// Logs in through the API and returns the access token.
pub async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access_token"].as_str().unwrap().to_string()
}

pub async fn token_for(pool: &PgPool, user: &TestUser) -> String {
    get_auth_token(setup_test_app(pool.clone()), user.email(), &user.password).await
}

/// Sends a JSON request and returns the status with the parsed body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Creates a record through the API and returns its JSON.
pub async fn create_via_api(pool: &PgPool, token: &str, uri: &str, body: Value) -> Value {
    let (status, body) = send(setup_test_app(pool.clone()), "POST", uri, Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {} failed: {}", uri, body);
    body
}

pub fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}
