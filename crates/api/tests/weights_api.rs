//! HTTP-level integration tests for per-user scoring weight configuration
//! and its effect on candidate scoring.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, login_token, put_json_auth, seed_genre, seed_user, set_pref};
use duet_core::scoring::Category;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn unconfigured_weights_default_to_one(pool: PgPool) {
    seed_user(&pool, "dizzy").await;

    let app = common::build_test_app(pool);
    let token = login_token(app.clone(), "dizzy").await;

    let response = get_auth(app, "/api/v1/matches/weights", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["genre"], 1.0);
    assert_eq!(json["data"]["artist"], 1.0);
    assert_eq!(json["data"]["song"], 1.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn put_weights_persists_valid_values(pool: PgPool) {
    seed_user(&pool, "dizzy").await;

    let app = common::build_test_app(pool);
    let token = login_token(app.clone(), "dizzy").await;

    let put = put_json_auth(
        app.clone(),
        "/api/v1/matches/weights",
        json!({ "genre": 2.0, "artist": 0.0, "song": 5.0 }),
        &token,
    )
    .await;
    assert_eq!(put.status(), StatusCode::OK);

    let fetched = body_json(get_auth(app, "/api/v1/matches/weights", &token).await).await;
    assert_eq!(fetched["data"]["genre"], 2.0);
    assert_eq!(fetched["data"]["artist"], 0.0);
    assert_eq!(fetched["data"]["song"], 5.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn out_of_range_weight_is_rejected_not_clamped(pool: PgPool) {
    seed_user(&pool, "dizzy").await;

    let app = common::build_test_app(pool);
    let token = login_token(app.clone(), "dizzy").await;

    // Above the cap.
    let too_high = put_json_auth(
        app.clone(),
        "/api/v1/matches/weights",
        json!({ "genre": 6.0, "artist": 1.0, "song": 1.0 }),
        &token,
    )
    .await;
    assert_eq!(too_high.status(), StatusCode::BAD_REQUEST);
    let body = body_json(too_high).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Below zero.
    let negative = put_json_auth(
        app.clone(),
        "/api/v1/matches/weights",
        json!({ "genre": 1.0, "artist": -0.5, "song": 1.0 }),
        &token,
    )
    .await;
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);

    // Neither attempt was clamped into place; defaults still apply.
    let fetched = body_json(get_auth(app, "/api/v1/matches/weights", &token).await).await;
    assert_eq!(fetched["data"]["genre"], 1.0);
    assert_eq!(fetched["data"]["artist"], 1.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn configured_weights_change_candidate_scores(pool: PgPool) {
    // ana {rock: 10, pop: 4} vs ben {rock: 6, jazz: 2}: genre sim 0.545.
    let ana = seed_user(&pool, "ana").await;
    let ben = seed_user(&pool, "ben").await;
    let rock = seed_genre(&pool, "rock").await;
    let pop = seed_genre(&pool, "pop").await;
    let jazz = seed_genre(&pool, "jazz").await;
    set_pref(&pool, ana.id, Category::Genre, rock, 10).await;
    set_pref(&pool, ana.id, Category::Genre, pop, 4).await;
    set_pref(&pool, ben.id, Category::Genre, rock, 6).await;
    set_pref(&pool, ben.id, Category::Genre, jazz, 2).await;

    let app = common::build_test_app(pool);
    let token = login_token(app.clone(), "ana").await;

    let put = put_json_auth(
        app.clone(),
        "/api/v1/matches/weights",
        json!({ "genre": 2.0, "artist": 1.0, "song": 1.0 }),
        &token,
    )
    .await;
    assert_eq!(put.status(), StatusCode::OK);

    let candidates = body_json(get_auth(app, "/api/v1/matches/candidates", &token).await).await;
    let entry = &candidates["data"][0];

    // combined = round3(0.545 * 2.0) = 1.09;
    // compatibility = round1(1.09 / 4.0 * 100) = 27.3.
    assert_eq!(entry["scores"]["genre"], 0.545);
    assert_eq!(entry["scores"]["combined"], 1.09);
    assert_eq!(entry["compatibility"], 27.3);
}
