mod common;

use axum::{body::Body, http::{Request, StatusCode}};
use common::{future_monday, json_request, parse_body, run_wizard_to_booking, TestApp};
use serde_json::json;
use tower::ServiceExt;

async fn start_wizard(app: &TestApp) -> String {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/wizard")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    assert_eq!(body["draft"]["stage"], "SERVICE");
    body["draft"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_full_flow_produces_pending_booking_and_clears_draft() {
    let app = TestApp::new().await;
    let date = future_monday();

    let booking = run_wizard_to_booking(&app, "basic", 15, &date, "14:00").await;

    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["package_id"], "basic");
    assert_eq!(booking["total_price"], 549);     // 399 + 150
    assert_eq!(booking["downpayment"], 275);     // ceil(549 / 2)
    assert_eq!(booking["duration_total"], 40);   // 25 + 15
    assert_eq!(booking["customer_phone"], "09171234567");

    // The notification job was queued with the booking
    let jobs = app.state.job_repo.list_recent(10).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].job_type, "NOTIFY_RECEIVED");
    assert_eq!(jobs[0].payload.booking_id, booking["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_draft_is_gone_after_submit() {
    let app = TestApp::new().await;
    let date = future_monday();
    let token = start_wizard(&app).await;

    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "package_id": "solo", "date": date, "time": "10:00"
    })).await;
    json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;
    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "full_name": "Maria Clara", "email": "maria@example.com", "phone": "09998887766"
    })).await;
    json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;
    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "payment_proof_path": "/files/pop/proof.png"
    })).await;
    let res = json_request(&app, "POST", &format!("/api/v1/wizard/{}/submit", token), json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/wizard/{}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_service_guard_blocks_incomplete_selection() {
    let app = TestApp::new().await;
    let date = future_monday();
    let token = start_wizard(&app).await;

    // Nothing selected yet
    let res = json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Package but no date/time
    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({"package_id": "basic"})).await;
    let res = json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Time outside the weekday grid
    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "date": date, "time": "09:00"
    })).await;
    let res = json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Valid slot passes
    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({"time": "10:00"})).await;
    let res = json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;
    let body = parse_body(res).await;
    assert_eq!(body["draft"]["stage"], "DETAILS");
}

#[tokio::test]
async fn test_details_guard_validates_phone_format() {
    let app = TestApp::new().await;
    let date = future_monday();
    let token = start_wizard(&app).await;

    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "package_id": "basic", "date": date, "time": "10:00"
    })).await;
    json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;

    for bad_phone in ["9171234567", "08171234567", "091712345678", ""] {
        json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
            "full_name": "Juan Dela Cruz", "email": "juan@example.com", "phone": bad_phone
        })).await;
        let res = json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "phone {:?} should be rejected", bad_phone);
    }

    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({"phone": "09171234567"})).await;
    let res = json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;
    let body = parse_body(res).await;
    assert_eq!(body["draft"]["stage"], "PAYMENT");
}

#[tokio::test]
async fn test_submit_requires_payment_stage_and_proof() {
    let app = TestApp::new().await;
    let date = future_monday();
    let token = start_wizard(&app).await;

    // Submitting from the first stage is rejected outright
    let res = json_request(&app, "POST", &format!("/api/v1/wizard/{}/submit", token), json!({})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "package_id": "basic", "date": date, "time": "10:00"
    })).await;
    json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;
    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "full_name": "Juan Dela Cruz", "email": "juan@example.com", "phone": "09171234567"
    })).await;
    json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;

    // At payment but no proof attached
    let res = json_request(&app, "POST", &format!("/api/v1/wizard/{}/submit", token), json!({})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "payment_proof_path": "/files/pop/proof.png"
    })).await;
    let res = json_request(&app, "POST", &format!("/api/v1/wizard/{}/submit", token), json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_back_steps_one_stage_at_a_time() {
    let app = TestApp::new().await;
    let date = future_monday();
    let token = start_wizard(&app).await;

    // Back from the first stage is an error
    let res = json_request(&app, "POST", &format!("/api/v1/wizard/{}/back", token), json!({})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "package_id": "basic", "date": date, "time": "10:00"
    })).await;
    json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;

    let res = json_request(&app, "POST", &format!("/api/v1/wizard/{}/back", token), json!({})).await;
    let body = parse_body(res).await;
    assert_eq!(body["draft"]["stage"], "SERVICE");
}

#[tokio::test]
async fn test_double_booking_same_slot_conflicts() {
    let app = TestApp::new().await;
    let date = future_monday();

    run_wizard_to_booking(&app, "basic", 0, &date, "10:00").await;

    // Second wizard targeting the same slot passes the guards (they do
    // not check availability) but fails at submit's re-check.
    let token = start_wizard(&app).await;
    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "package_id": "basic", "date": date, "time": "10:00"
    })).await;
    json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;
    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "full_name": "Jose Rizal", "email": "jose@example.com", "phone": "09181234567"
    })).await;
    json_request(&app, "POST", &format!("/api/v1/wizard/{}/next", token), json!({})).await;
    json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "payment_proof_path": "/files/pop/proof2.png"
    })).await;

    let res = json_request(&app, "POST", &format!("/api/v1/wizard/{}/submit", token), json!({})).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // The adjacent slot is still bookable
    let booking = run_wizard_to_booking(&app, "basic", 0, &date, "10:30").await;
    assert_eq!(booking["status"], "pending");
}

#[tokio::test]
async fn test_cancel_clears_draft() {
    let app = TestApp::new().await;
    let token = start_wizard(&app).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/wizard/{}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/wizard/{}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quote_tracks_draft_inputs() {
    let app = TestApp::new().await;
    let date = future_monday();
    let token = start_wizard(&app).await;

    let res = json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "package_id": "solo", "date": date, "time": "10:00"
    })).await;
    let body = parse_body(res).await;
    assert_eq!(body["quote"]["total_price"], 299);
    assert_eq!(body["quote"]["downpayment"], 150);
    assert_eq!(body["quote"]["duration_total"], 15);

    let res = json_request(&app, "PUT", &format!("/api/v1/wizard/{}", token), json!({
        "extension_min": 60
    })).await;
    let body = parse_body(res).await;
    assert_eq!(body["quote"]["total_price"], 899);
    assert_eq!(body["quote"]["downpayment"], 450);
    assert_eq!(body["quote"]["duration_total"], 75);
}
