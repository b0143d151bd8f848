mod common;

use aula::aula_auth::create_refresh_token;
use aula::aula_models::{ExtraFields, RefreshTokenRequest};
use aula::modules::auth::AuthService;
use aula::modules::users::UserService;
use axum::http::StatusCode;
use common::{
    TEST_PASSWORD, create_regular_user, generate_unique_email, send, setup_test_app,
    test_jwt_config,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let user = create_regular_user(&pool).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": user.email(), "password": TEST_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
    assert_eq!(body["user"]["email"], user.email());
    assert!(body["user"]["last_login"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_matches_domain_case_insensitively(pool: PgPool) {
    UserService::create_user(
        &pool,
        "mixed@school.edu",
        TEST_PASSWORD,
        ExtraFields::default(),
    )
    .await
    .unwrap();

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "mixed@SCHOOL.edu", "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let user = create_regular_user(&pool).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": user.email(), "password": "wrong-password" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": generate_unique_email(), "password": TEST_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_inactive_user(pool: PgPool) {
    let email = generate_unique_email();
    UserService::create_user(
        &pool,
        &email,
        TEST_PASSWORD,
        ExtraFields {
            is_active: Some(false),
            ..ExtraFields::default()
        },
    )
    .await
    .unwrap();

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_missing_field(pool: PgPool) {
    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "someone@test.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_token_flow(pool: PgPool) {
    let user = create_regular_user(&pool).await;

    let (_, login) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": user.email(), "password": TEST_PASSWORD })),
    )
    .await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/refresh",
        None,
        Some(json!({ "refresh_token": login["refresh_token"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());

    // An access token is not accepted as a refresh token
    let (status, _) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/refresh",
        None,
        Some(json!({ "refresh_token": login["access_token"] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_protected_route_requires_token(pool: PgPool) {
    let (status, body) = send(setup_test_app(pool.clone()), "GET", "/api/courses", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "GET",
        "/api/courses",
        Some("not-a-jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_about_page_is_public_html(pool: PgPool) {
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    let response = setup_test_app(pool)
        .oneshot(Request::builder().uri("/about").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("<h1>Aula</h1>"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_for_removed_user_is_unauthorized(pool: PgPool) {
    let token = create_refresh_token(Uuid::new_v4(), "gone@school.edu", &test_jwt_config()).unwrap();

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/refresh",
        None,
        Some(json!({ "refresh_token": token })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired refresh token");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_store_failure_is_internal(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    let token = create_refresh_token(user.id(), user.email(), &test_jwt_config()).unwrap();

    pool.close().await;

    let err = AuthService::refresh_tokens(
        &pool,
        RefreshTokenRequest {
            refresh_token: token,
        },
        &test_jwt_config(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
}
