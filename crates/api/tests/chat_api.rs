//! HTTP-level integration tests for conversation messages: membership
//! enforcement, history ordering, and pagination.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get_auth, login_token, post_json_auth, seed_user};
use serde_json::json;
use sqlx::PgPool;

/// Seed two matched users plus an outsider; returns (match_id, outsider
/// token, member token).
async fn seed_match(pool: &PgPool, app: Router) -> (i64, String, String) {
    seed_user(pool, "ana").await;
    let ben = seed_user(pool, "ben").await;
    seed_user(pool, "zara").await;

    let ana_token = login_token(app.clone(), "ana").await;
    let zara_token = login_token(app.clone(), "zara").await;

    let accept = post_json_auth(
        app,
        "/api/v1/matches/accept",
        json!({ "user_id": ben.id }),
        &ana_token,
    )
    .await;
    assert_eq!(accept.status(), StatusCode::CREATED);
    let match_id = body_json(accept).await["data"]["id"].as_i64().unwrap();

    (match_id, zara_token, ana_token)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn outsiders_cannot_read_or_write(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (match_id, zara_token, _) = seed_match(&pool, app.clone()).await;

    let read = get_auth(
        app.clone(),
        &format!("/api/v1/matches/{match_id}/messages"),
        &zara_token,
    )
    .await;
    assert_eq!(read.status(), StatusCode::FORBIDDEN);

    let write = post_json_auth(
        app,
        &format!("/api/v1/matches/{match_id}/messages"),
        json!({ "content": "let me in" }),
        &zara_token,
    )
    .await;
    assert_eq!(write.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_match_is_not_found(pool: PgPool) {
    seed_user(&pool, "ana").await;
    let app = common::build_test_app(pool);
    let token = login_token(app.clone(), "ana").await;

    let response = get_auth(app, "/api/v1/matches/424242/messages", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_conversation_starts_empty(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (match_id, _, ana_token) = seed_match(&pool, app.clone()).await;

    let response = get_auth(
        app,
        &format!("/api/v1/matches/{match_id}/messages"),
        &ana_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn members_exchange_messages_in_send_order(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (match_id, _, ana_token) = seed_match(&pool, app.clone()).await;
    let ben_token = login_token(app.clone(), "ben").await;

    let first = post_json_auth(
        app.clone(),
        &format!("/api/v1/matches/{match_id}/messages"),
        json!({ "content": "hey, great taste in rock" }),
        &ana_token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_json = body_json(first).await;
    assert_eq!(first_json["data"]["sender_username"], "ana");
    assert_eq!(first_json["data"]["content"], "hey, great taste in rock");

    let reply = post_json_auth(
        app.clone(),
        &format!("/api/v1/matches/{match_id}/messages"),
        json!({ "content": "right back at you" }),
        &ben_token,
    )
    .await;
    assert_eq!(reply.status(), StatusCode::CREATED);

    let history = body_json(
        get_auth(
            app,
            &format!("/api/v1/matches/{match_id}/messages"),
            &ben_token,
        )
        .await,
    )
    .await;
    let messages = history["data"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["sender_username"], "ana");
    assert_eq!(messages[1]["sender_username"], "ben");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_message_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (match_id, _, ana_token) = seed_match(&pool, app.clone()).await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/matches/{match_id}/messages"),
        json!({ "content": "   " }),
        &ana_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn history_pagination_limits_and_offsets(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (match_id, _, ana_token) = seed_match(&pool, app.clone()).await;

    for i in 1..=3 {
        let response = post_json_auth(
            app.clone(),
            &format!("/api/v1/matches/{match_id}/messages"),
            json!({ "content": format!("message {i}") }),
            &ana_token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let page = body_json(
        get_auth(
            app.clone(),
            &format!("/api/v1/matches/{match_id}/messages?limit=2"),
            &ana_token,
        )
        .await,
    )
    .await;
    assert_eq!(page["data"].as_array().unwrap().len(), 2);
    assert_eq!(page["data"][0]["content"], "message 1");

    let rest = body_json(
        get_auth(
            app,
            &format!("/api/v1/matches/{match_id}/messages?limit=2&offset=2"),
            &ana_token,
        )
        .await,
    )
    .await;
    assert_eq!(rest["data"].as_array().unwrap().len(), 1);
    assert_eq!(rest["data"][0]["content"], "message 3");
}
