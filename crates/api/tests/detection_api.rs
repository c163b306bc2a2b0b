//! HTTP-level integration tests for the JSON detection endpoints.

mod common;

use axum::http::StatusCode;
use camwatch_core::store::DetectionStore;
use common::{body_json, get, post, post_json, post_raw, seed_scenario};

// ---------------------------------------------------------------------------
// POST /api/detection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ingest_persists_coerced_detection() {
    let app = common::build_test_app();
    let before = chrono::Utc::now();

    let response = post_json(app.router.clone(), "/api/detection", common::detection_body()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Detection saved");
    let id = json["id"].as_i64().unwrap();

    let all = app.store.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    let stored = &all[0];
    assert_eq!(stored.id, id);
    assert_eq!(stored.camera_id, "cam-7");
    assert_eq!(stored.timestamp_sec, 12);
    assert!((stored.confidence - 0.91).abs() < 1e-9);
    assert!(stored.created_at >= before);
}

#[tokio::test]
async fn ingest_accepts_zero_offset() {
    let app = common::build_test_app();
    let mut body = common::detection_body();
    body["timestampSec"] = serde_json::json!(0);

    let response = post_json(app.router, "/api/detection", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.store.list_all().await.unwrap()[0].timestamp_sec, 0);
}

#[tokio::test]
async fn ingest_identical_payloads_twice_stores_two_records() {
    let app = common::build_test_app();

    for _ in 0..2 {
        let response =
            post_json(app.router.clone(), "/api/detection", common::detection_body()).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    assert_eq!(app.store.len().await, 2);
}

#[tokio::test]
async fn ingest_missing_field_is_rejected_without_persisting() {
    for field in ["cameraId", "videoId", "item", "confidence", "timestamp", "timestampSec"] {
        let app = common::build_test_app();
        let mut body = common::detection_body();
        body.as_object_mut().unwrap().remove(field);

        let response = post_json(app.router, "/api/detection", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "field {field}");
        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing required fields");
        assert!(app.store.is_empty().await);
    }
}

#[tokio::test]
async fn ingest_empty_item_is_missing() {
    let app = common::build_test_app();
    let mut body = common::detection_body();
    body["item"] = serde_json::json!("");

    let response = post_json(app.router, "/api/detection", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Missing required fields");
}

#[tokio::test]
async fn ingest_unparseable_value_is_invalid() {
    let app = common::build_test_app();
    let mut body = common::detection_body();
    body["timestamp"] = serde_json::json!("not a date");

    let response = post_json(app.router, "/api/detection", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid detection payload");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn ingest_malformed_json_is_a_client_error() {
    let app = common::build_test_app();

    let response = post_raw(
        app.router.clone(),
        "/api/detection",
        "application/json",
        "{not json".to_string(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid detection payload");

    let response = post_raw(app.router, "/api/detection", "text/plain", "hello".to_string()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ingest_store_failure_is_a_server_error() {
    let response = post_json(
        common::build_failing_app(),
        "/api/detection",
        common::detection_body(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "An internal error occurred");
    assert!(!json.to_string().contains("connection refused"));
}

// ---------------------------------------------------------------------------
// GET /api/last-seen/{item}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn last_seen_returns_most_recent_match() {
    let app = common::build_test_app();
    let (_, b, _) = seed_scenario(&app.store).await;

    let response = get(app.router, "/api/last-seen/CUP").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["found"], true);
    assert_eq!(json["detection"]["id"], b);
    assert_eq!(json["detection"]["videoId"], "v1");
    assert_eq!(json["detection"]["timestampSec"], 5);
}

#[tokio::test]
async fn last_seen_unknown_item_is_not_an_error() {
    let app = common::build_test_app();
    seed_scenario(&app.store).await;

    let response = get(app.router, "/api/last-seen/giraffe").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["found"], false);
    assert_eq!(json["message"], "No detections found for 'giraffe'");
    assert!(json.get("detection").is_none());
}

#[tokio::test]
async fn last_seen_pattern_characters_match_literally() {
    let app = common::build_test_app();
    seed_scenario(&app.store).await;

    let response = get(app.router, "/api/last-seen/c.p").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["found"], false);
}

#[tokio::test]
async fn last_seen_store_failure_returns_500() {
    let response = get(common::build_failing_app(), "/api/last-seen/cup").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
}

// ---------------------------------------------------------------------------
// GET /api/items
// ---------------------------------------------------------------------------

#[tokio::test]
async fn items_are_distinct_and_sorted() {
    let app = common::build_test_app();
    seed_scenario(&app.store).await;
    app.store
        .insert(common::new_detection("apple", "v3", 1, 9))
        .await
        .unwrap();

    let response = get(app.router, "/api/items").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "items": ["apple", "bottle", "cup"] })
    );
}

#[tokio::test]
async fn items_store_failure_returns_500() {
    let response = get(common::build_failing_app(), "/api/items").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// POST /delete/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_only_the_target() {
    let app = common::build_test_app();
    let (a, b, c) = seed_scenario(&app.store).await;

    let response = post(app.router, &format!("/delete/{b}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["deleted"], true);

    let ids: Vec<_> = app.store.list_all().await.unwrap().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![c, a]);
}

#[tokio::test]
async fn delete_unknown_id_still_succeeds() {
    let app = common::build_test_app();
    seed_scenario(&app.store).await;

    let response = post(app.router.clone(), "/delete/999999").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["deleted"], false);

    let response = post(app.router, "/delete/not-a-number").await;
    assert_eq!(body_json(response).await["success"], true);

    assert_eq!(app.store.len().await, 3);
}

#[tokio::test]
async fn delete_store_failure_reports_structured_failure() {
    let response = post(common::build_failing_app(), "/delete/1").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Failed to delete detection");
}
