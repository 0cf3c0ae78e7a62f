mod common;

use std::time::Instant;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    create_test_user, generate_unique_email, generate_unique_username, get_request,
    json_request, login, send, setup_test_app, test_jwt_config,
};
use serde_json::json;
use spendwise::spendwise_auth::{create_access_token_at, verify_access_token};
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_then_login(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = generate_unique_email();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/register",
            None,
            json!({
                "username": generate_unique_username(),
                "email": email,
                "password": "pw123"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "user registered successfully");

    let (access_token, refresh_token) = login(&app, &email, "pw123").await;
    assert_eq!(refresh_token.len(), 64);

    let user_id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    let claims = verify_access_token(&access_token, &test_jwt_config()).unwrap();
    assert_eq!(claims.user_id, user_id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_stores_hash_not_password(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = generate_unique_email();

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/register",
            None,
            json!({ "username": generate_unique_username(), "email": email, "password": "pw123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let stored = sqlx::query_scalar::<_, String>("SELECT password FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(stored, "pw123");
    assert!(stored.starts_with("$2"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let user = create_test_user(&pool, "pw123").await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/register",
            None,
            json!({ "username": generate_unique_username(), "email": user.email, "password": "x" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_validation(pool: PgPool) {
    let app = setup_test_app(pool);

    for body in [
        json!({ "username": "", "email": generate_unique_email(), "password": "pw" }),
        json!({ "username": "a".repeat(51), "email": generate_unique_email(), "password": "pw" }),
        json!({ "username": "bob", "email": "not-an-email", "password": "pw" }),
        json!({ "username": "bob", "email": generate_unique_email(), "password": "" }),
        json!({ "username": "bob", "email": generate_unique_email() }),
    ] {
        let (status, response) = send(&app, json_request("POST", "/register", None, body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["error"].is_string());
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let user = create_test_user(&pool, "pw123").await;
    let app = setup_test_app(pool);

    let (wrong_password_status, wrong_password_body) = send(
        &app,
        json_request(
            "POST",
            "/login",
            None,
            json!({ "email": user.email, "password": "nope" }),
        ),
    )
    .await;
    let (unknown_email_status, unknown_email_body) = send(
        &app,
        json_request(
            "POST",
            "/login",
            None,
            json!({ "email": generate_unique_email(), "password": "pw123" }),
        ),
    )
    .await;

    assert_eq!(wrong_password_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password_body, unknown_email_body);
    assert_eq!(wrong_password_body["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_failures_take_comparable_time(pool: PgPool) {
    let user = create_test_user(&pool, "pw123").await;
    let app = setup_test_app(pool);

    let login_attempt = |email: String| {
        json_request(
            "POST",
            "/login",
            None,
            json!({ "email": email, "password": "nope" }),
        )
    };

    // Warm up the fixed digest used for unknown emails.
    send(&app, login_attempt(generate_unique_email())).await;

    let start = Instant::now();
    let (status, _) = send(&app, login_attempt(user.email.clone())).await;
    let wrong_password = start.elapsed();
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let start = Instant::now();
    let (status, _) = send(&app, login_attempt(generate_unique_email())).await;
    let unknown_email = start.elapsed();
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert!(
        unknown_email * 4 >= wrong_password,
        "unknown_email={unknown_email:?} wrong_password={wrong_password:?}"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_gate_rejects_missing_and_malformed_headers(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(&app, get_request("/api/categories", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let request = axum::http::Request::builder()
        .uri("/api/categories")
        .header("authorization", "Token abc")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get_request("/api/categories", Some("garbage"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_gate_rejects_expired_access_token(pool: PgPool) {
    let user = create_test_user(&pool, "pw123").await;
    let app = setup_test_app(pool);

    let issued_at = Utc::now() - Duration::minutes(16);
    let expired = create_access_token_at(user.id.get(), issued_at, &test_jwt_config()).unwrap();

    let (status, _) = send(&app, get_request("/api/categories", Some(&expired))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_gate_rejects_token_for_deleted_user(pool: PgPool) {
    let user = create_test_user(&pool, "pw123").await;
    let app = setup_test_app(pool.clone());
    let token = create_access_token_at(user.id.get(), Utc::now(), &test_jwt_config()).unwrap();

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let (status, _) = send(&app, get_request("/api/categories", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_returns_caller_without_password(pool: PgPool) {
    let user = create_test_user(&pool, "pw123").await;
    let app = setup_test_app(pool);
    let (access_token, _) = login(&app, &user.email, "pw123").await;

    let (status, body) = send(&app, get_request("/api/me", Some(&access_token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user.id.get());
    assert_eq!(body["username"], user.username);
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_rotates_token(pool: PgPool) {
    let user = create_test_user(&pool, "pw123").await;
    let app = setup_test_app(pool);
    let (_, old_refresh) = login(&app, &user.email, "pw123").await;

    let (status, body) = send(
        &app,
        json_request("POST", "/refresh", None, json!({ "refresh_token": old_refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let new_refresh = body["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(new_refresh, old_refresh);
    assert!(body["access_token"].is_string());

    // The old value is gone; the new one works.
    let (status, body) = send(
        &app,
        json_request("POST", "/refresh", None, json!({ "refresh_token": old_refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid refresh token");

    let (status, _) = send(
        &app,
        json_request("POST", "/refresh", None, json!({ "refresh_token": new_refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_unknown_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        json_request("POST", "/refresh", None, json!({ "refresh_token": "ab".repeat(32) })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid refresh token");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_expired_token(pool: PgPool) {
    let user = create_test_user(&pool, "pw123").await;
    let app = setup_test_app(pool.clone());
    let (_, refresh_token) = login(&app, &user.email, "pw123").await;

    sqlx::query("UPDATE refresh_tokens SET expires_at = NOW() - INTERVAL '1 minute' WHERE token = $1")
        .bind(&refresh_token)
        .execute(&pool)
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        json_request("POST", "/refresh", None, json!({ "refresh_token": refresh_token })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Refresh token expired");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_refresh_only_one_wins(pool: PgPool) {
    let user = create_test_user(&pool, "pw123").await;
    let app = setup_test_app(pool.clone());
    let (_, refresh_token) = login(&app, &user.email, "pw123").await;

    let first = send(
        &app,
        json_request("POST", "/refresh", None, json!({ "refresh_token": refresh_token })),
    );
    let second = send(
        &app,
        json_request("POST", "/refresh", None, json!({ "refresh_token": refresh_token })),
    );
    let ((first_status, _), (second_status, _)) = tokio::join!(first, second);

    let successes = [first_status, second_status]
        .iter()
        .filter(|status| **status == StatusCode::OK)
        .count();
    assert_eq!(successes, 1);
    assert!(
        [first_status, second_status].contains(&StatusCode::UNAUTHORIZED),
        "loser must be rejected: {first_status} {second_status}"
    );

    let records = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM refresh_tokens WHERE user_id = $1",
    )
    .bind(user.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(records, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_logout_is_idempotent(pool: PgPool) {
    let user = create_test_user(&pool, "pw123").await;
    let app = setup_test_app(pool);
    let (access_token, refresh_token) = login(&app, &user.email, "pw123").await;

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/logout",
                Some(&access_token),
                json!({ "refresh_token": refresh_token }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "logged out successfully");
    }

    let (status, _) = send(
        &app,
        json_request("POST", "/refresh", None, json!({ "refresh_token": refresh_token })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_logout_requires_access_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/logout", None, json!({ "refresh_token": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
