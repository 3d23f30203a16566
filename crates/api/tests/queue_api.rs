//! Integration tests for the venue queue view.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, submit, transition};
use sqlx::PgPool;

async fn queue_view(app: &axum::Router, venue_id: i64) -> serde_json::Value {
    let response = get(app.clone(), &format!("/api/v1/venues/{venue_id}/queue"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_queue_has_no_entries_and_zero_counts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let venue = common::seed_venue(&app, 2, 50).await;

    let json = queue_view(&app, venue).await;
    assert_eq!(json["data"]["entries"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["counts"]["pending"], 0);
    assert_eq!(json["data"]["counts"]["playing"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn queue_lists_entries_in_position_order_with_track_info(pool: PgPool) {
    let app = common::build_test_app(pool);
    let venue = common::seed_venue(&app, 2, 50).await;
    let t1 = common::seed_track(&app, venue, "Blue in Green").await;
    let t2 = common::seed_track(&app, venue, "So What").await;
    let token_a = common::seed_session(&app, venue, "table-1").await;
    let token_b = common::seed_session(&app, venue, "table-2").await;

    submit(&app, venue, &token_a, t1).await;
    submit(&app, venue, &token_b, t2).await;

    let json = queue_view(&app, venue).await;
    let entries = json["data"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["queue_position"], 1);
    assert_eq!(entries[0]["track_title"], "Blue in Green");
    assert_eq!(entries[1]["queue_position"], 2);
    assert_eq!(entries[1]["track_title"], "So What");
    assert_eq!(json["data"]["counts"]["pending"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn queue_view_tracks_the_full_scenario(pool: PgPool) {
    // Caps 2/50: patron A submits T1, T2; A's third is refused; patron B
    // submits T4; staff plays T1 through; T2 and T4 end at positions 1, 2.
    let app = common::build_test_app(pool);
    let venue = common::seed_venue(&app, 2, 50).await;
    let t1 = common::seed_track(&app, venue, "T1").await;
    let t2 = common::seed_track(&app, venue, "T2").await;
    let t3 = common::seed_track(&app, venue, "T3").await;
    let t4 = common::seed_track(&app, venue, "T4").await;
    let token_a = common::seed_session(&app, venue, "table-a").await;
    let token_b = common::seed_session(&app, venue, "table-b").await;

    let r1 = body_json(submit(&app, venue, &token_a, t1).await).await;
    let r1_id = r1["data"]["id"].as_i64().unwrap();
    submit(&app, venue, &token_a, t2).await;
    assert_eq!(
        submit(&app, venue, &token_a, t3).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );
    submit(&app, venue, &token_b, t4).await;

    transition(&app, r1_id, "playing").await;
    transition(&app, r1_id, "completed").await;

    let json = queue_view(&app, venue).await;
    let entries = json["data"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["track_title"], "T2");
    assert_eq!(entries[0]["queue_position"], 1);
    assert_eq!(entries[1]["track_title"], "T4");
    assert_eq!(entries[1]["queue_position"], 2);
    assert_eq!(json["data"]["counts"]["completed"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn queue_view_for_unknown_venue_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/venues/424242/queue", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
