//! HTTP-level integration tests for registration and login.

mod common;

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use bookshelf_api::auth::jwt::validate_token;
use common::{body_json, post_json, test_jwt_config};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_201_with_id_and_username(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "username": "reader", "password": "secret1" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_i64());
    assert_eq!(json["username"], "reader");
    assert_eq!(json["message"], "User registered successfully");
    assert!(json.get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_stores_hash_not_plaintext(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = json!({ "username": "hashcheck", "password": "secret1" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let stored: String =
        sqlx::query_scalar("SELECT password_hash FROM users WHERE username = 'hashcheck'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_ne!(stored, "secret1");
    assert!(stored.starts_with("$argon2id$"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_username_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "username": "twice", "password": "secret1" });

    let first = post_json(app.clone(), "/api/v1/auth/register", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "DUPLICATE_USERNAME");
    assert_eq!(json["error"], "Username already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_short_password_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "username": "shorty", "password": "12345" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_blank_username_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "username": "   ", "password": "secret1" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_verifiable_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let creds = json!({ "username": "alice", "password": "wonderland" });

    let registered = post_json(app.clone(), "/api/v1/auth/register", creds.clone()).await;
    let user_id = body_json(registered).await["id"].as_i64().unwrap();

    let response = post_json(app, "/api/v1/auth/login", creds).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["expires_in"], 180 * 60);

    let token = json["token"].as_str().unwrap();
    let claims = validate_token(token, &test_jwt_config()).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.name, "alice");
    assert_eq!(claims.iss, "bookshelf");
    assert_eq!(claims.aud, "bookshelf-clients");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_and_unknown_user_are_indistinguishable(pool: PgPool) {
    let app = common::build_test_app(pool);
    let creds = json!({ "username": "bob", "password": "correct-horse" });
    post_json(app.clone(), "/api/v1/auth/register", creds).await;

    let wrong_password = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "username": "bob", "password": "battery-staple" }),
    )
    .await;
    let unknown_user = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "nobody", "password": "correct-horse" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_user).await;
    assert_eq!(a, b);
    assert_eq!(a["code"], "INVALID_CREDENTIALS");
    assert_eq!(a["error"], "Invalid username or password");
}

/// Fastest of three timed login attempts.
async fn fastest_login(app: axum::Router, username: &str, password: &str) -> Duration {
    let mut fastest = Duration::MAX;
    for _ in 0..3 {
        let body = json!({ "username": username, "password": password });
        let started = Instant::now();
        let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
        fastest = fastest.min(started.elapsed());
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
    fastest
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_user_costs_a_password_verification(pool: PgPool) {
    let app = common::build_test_app(pool);
    post_json(
        app.clone(),
        "/api/v1/auth/register",
        json!({ "username": "dave", "password": "correct-horse" }),
    )
    .await;

    let wrong_password = fastest_login(app.clone(), "dave", "battery-staple").await;
    let unknown_user = fastest_login(app, "nobody-here", "battery-staple").await;

    // Both paths run one Argon2 verification; a bare lookup is orders of
    // magnitude faster than that.
    assert!(
        unknown_user * 4 >= wrong_password,
        "unknown user took {unknown_user:?}, wrong password took {wrong_password:?}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn username_lookup_is_case_sensitive(pool: PgPool) {
    let app = common::build_test_app(pool);
    post_json(
        app.clone(),
        "/api/v1/auth/register",
        json!({ "username": "Carol", "password": "secret1" }),
    )
    .await;

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "carol", "password": "secret1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_user_cannot_log_in(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let creds = json!({ "username": "gone", "password": "secret1" });
    post_json(app.clone(), "/api/v1/auth/register", creds.clone()).await;

    sqlx::query("UPDATE users SET is_deleted = true WHERE username = 'gone'")
        .execute(&pool)
        .await
        .unwrap();

    let response = post_json(app, "/api/v1/auth/login", creds).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_CREDENTIALS");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_empty_password_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "alice", "password": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
