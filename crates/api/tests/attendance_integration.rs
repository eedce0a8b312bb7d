//! Integration tests for the scan / check-in / attendance endpoints.
//!
//! These tests require a running PostgreSQL instance and are ignored by
//! default. Set TEST_DATABASE_URL and run:
//!
//!   cargo test --test attendance_integration -- --ignored

mod common;

use axum::http::StatusCode;
use common::{
    add_invited_guest, cleanup_invitation, create_test_app, create_test_invitation,
    create_test_pool, get_request, json_request, parse_response_body, photo_base64,
    run_migrations,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_qr_check_in_flow_end_to_end() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let (invitation_id, slug) = create_test_invitation(&pool, "ana-budi").await;
    add_invited_guest(&pool, invitation_id, "Jane Doe", Some("+62 812 1111")).await;
    add_invited_guest(&pool, invitation_id, "John Smith", Some("+62 812 2222")).await;
    let app = create_test_app(pool.clone());

    // Scan resolves the guest and reports not-yet-checked-in
    let payload = format!(r#"{{"slug":"{}","guest":"Jane Doe"}}"#, slug);
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/invitations/{}/scan", slug),
            json!({ "raw_text": payload }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["guest_name"], "Jane Doe");
    assert_eq!(body["invited"], true);
    assert_eq!(body["already_checked_in"], false);

    // First check-in with a party of two
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/invitations/{}/attendance", slug),
            json!({ "guest_name": "Jane Doe", "headcount": 2, "entry": "qr" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = parse_response_body(response).await;
    assert_eq!(record["source"], "invited");
    assert_eq!(record["headcount"], 2);

    // Summary: one of two invited guests present, two people in the room
    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/v1/invitations/{}/attendance",
            slug
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["summary"]["total_invited"], 2);
    assert_eq!(body["summary"]["unique_present"], 1);
    assert_eq!(body["summary"]["total_present_people"], 2);
    assert_eq!(body["summary"]["total_absent"], 1);

    // Re-scan with different casing reports the existing check-in
    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/v1/invitations/{}/resolve?name=jane%20doe",
            slug
        )))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["already_checked_in"], true);

    // Re-check-in corrects the headcount in place
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/invitations/{}/attendance", slug),
            json!({ "guest_name": "jane doe", "headcount": 3, "entry": "qr" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/v1/invitations/{}/attendance",
            slug
        )))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["summary"]["unique_present"], 1);
    assert_eq!(body["summary"]["total_present_people"], 3);
    assert_eq!(body["summary"]["total_absent"], 1);

    cleanup_invitation(&pool, invitation_id).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_manual_entry_requires_photo() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let (invitation_id, slug) = create_test_invitation(&pool, "ana-budi").await;
    let app = create_test_app(pool.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/invitations/{}/attendance", slug),
            json!({ "guest_name": "Walk-in Guy", "headcount": 1, "entry": "manual" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["message"].as_str().unwrap().contains("photo"));

    cleanup_invitation(&pool, invitation_id).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_walk_in_with_photo_recorded_as_manual() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let (invitation_id, slug) = create_test_invitation(&pool, "ana-budi").await;
    add_invited_guest(&pool, invitation_id, "Jane Doe", None).await;
    let app = create_test_app(pool.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/invitations/{}/attendance", slug),
            json!({
                "guest_name": "Walk-in Guy",
                "headcount": 2,
                "entry": "manual",
                "photo_base64": photo_base64(),
                "note": "friend of the groom"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = parse_response_body(response).await;
    assert_eq!(record["source"], "manual");
    assert_eq!(record["note"], "friend of the groom");
    assert!(record["photo_url"].as_str().unwrap().ends_with(".jpg"));

    // Walk-ins count as present but never reduce the absent count
    let response = app
        .oneshot(get_request(&format!(
            "/api/v1/invitations/{}/attendance",
            slug
        )))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["summary"]["total_invited"], 1);
    assert_eq!(body["summary"]["unique_present"], 1);
    assert_eq!(body["summary"]["total_absent"], 1);
    assert_eq!(body["summary"]["manual_present_count"], 1);
    assert_eq!(body["summary"]["manual_present_people"], 2);

    cleanup_invitation(&pool, invitation_id).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_scan_error_mapping() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let (invitation_id, slug) = create_test_invitation(&pool, "ana-budi").await;
    let app = create_test_app(pool.clone());

    // A payload for some other invitation is rejected as a conflict
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/invitations/{}/scan", slug),
            json!({ "raw_text": r#"{"slug":"citra-dian","guest":"Jane"}"# }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "wrong_invitation");

    // Garbage is unprocessable
    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/invitations/{}/scan", slug),
            json!({ "raw_text": "definitely not a qr payload" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "malformed_payload");

    cleanup_invitation(&pool, invitation_id).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_unknown_invitation_is_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(pool);

    let response = app
        .oneshot(get_request(
            "/api/v1/invitations/no-such-wedding/attendance",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_headcount_is_clamped_not_rejected() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let (invitation_id, slug) = create_test_invitation(&pool, "ana-budi").await;
    add_invited_guest(&pool, invitation_id, "Jane Doe", None).await;
    add_invited_guest(&pool, invitation_id, "John Smith", None).await;
    let app = create_test_app(pool.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/invitations/{}/attendance", slug),
            json!({ "guest_name": "Jane Doe", "headcount": 0, "entry": "qr" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = parse_response_body(response).await;
    assert_eq!(record["headcount"], 1);

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/invitations/{}/attendance", slug),
            json!({ "guest_name": "John Smith", "headcount": 999, "entry": "qr" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = parse_response_body(response).await;
    assert_eq!(record["headcount"], 10);

    cleanup_invitation(&pool, invitation_id).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_concurrent_check_ins_yield_one_record() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let (invitation_id, slug) = create_test_invitation(&pool, "ana-budi").await;
    add_invited_guest(&pool, invitation_id, "Jane Doe", None).await;
    let app = create_test_app(pool.clone());

    // Two entrances scan the same guest at once
    let request_a = json_request(
        "POST",
        &format!("/api/v1/invitations/{}/attendance", slug),
        json!({ "guest_name": "Jane Doe", "headcount": 2, "entry": "qr" }),
    );
    let request_b = json_request(
        "POST",
        &format!("/api/v1/invitations/{}/attendance", slug),
        json!({ "guest_name": "JANE DOE", "headcount": 4, "entry": "qr" }),
    );
    let (response_a, response_b) =
        tokio::join!(app.clone().oneshot(request_a), app.clone().oneshot(request_b));
    assert!(response_a.unwrap().status().is_success());
    assert!(response_b.unwrap().status().is_success());

    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM attendance_records WHERE invitation_id = $1")
            .bind(invitation_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count.0, 1);

    cleanup_invitation(&pool, invitation_id).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_list_invited_guests() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let (invitation_id, slug) = create_test_invitation(&pool, "ana-budi").await;
    add_invited_guest(&pool, invitation_id, "Jane Doe", Some("+62 812 1111")).await;
    add_invited_guest(&pool, invitation_id, "Citra Ayu", None).await;
    let app = create_test_app(pool.clone());

    let response = app
        .oneshot(get_request(&format!("/api/v1/invitations/{}/guests", slug)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    // Sorted by name
    assert_eq!(data[0]["name"], "Citra Ayu");
    assert_eq!(data[1]["name"], "Jane Doe");

    cleanup_invitation(&pool, invitation_id).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_list_filters_search_and_pagination() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let (invitation_id, slug) = create_test_invitation(&pool, "ana-budi").await;
    add_invited_guest(&pool, invitation_id, "Jane Doe", Some("jane@example.com")).await;
    add_invited_guest(&pool, invitation_id, "John Smith", Some("john@example.com")).await;
    add_invited_guest(&pool, invitation_id, "Citra Ayu", None).await;
    let app = create_test_app(pool.clone());

    // Check Jane in; add a walk-in
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/invitations/{}/attendance", slug),
            json!({ "guest_name": "Jane Doe", "headcount": 1, "entry": "qr" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/invitations/{}/attendance", slug),
            json!({
                "guest_name": "Walk-in Guy",
                "headcount": 1,
                "entry": "manual",
                "photo_base64": photo_base64()
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // status=absent: the two invited guests who have not arrived
    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/v1/invitations/{}/attendance?status=absent",
            slug
        )))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total_items"], 2);

    // source=manual: just the walk-in
    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/v1/invitations/{}/attendance?source=manual",
            slug
        )))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Walk-in Guy");

    // Free-text search covers contact info as well
    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/v1/invitations/{}/attendance?search=john%40example",
            slug
        )))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "John Smith");

    // Pagination: page size 2 over 4 rows, sorted by name
    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/v1/invitations/{}/attendance?sort=name&page=2&limit=2",
            slug
        )))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["pagination"]["total_items"], 4);
    assert_eq!(body["pagination"]["total_pages"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    cleanup_invitation(&pool, invitation_id).await;
}
