use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Request},
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{
    auth, availability, booking, catalog, feedback, health, member, notification, upload, wizard,
};
use crate::api::handlers::upload::GALLERY_MAX_BYTES;
use tower_http::{
    services::ServeDir,
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Leave headroom above the largest allowed file for multipart framing.
    let upload_body_limit = DefaultBodyLimit::max(GALLERY_MAX_BYTES + 1024 * 1024);

    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Public catalog & availability
        .route("/api/v1/packages", get(catalog::list_packages))
        .route("/api/v1/availability", get(availability::get_slots))

        // Booking wizard
        .route("/api/v1/wizard", post(wizard::start_wizard))
        .route("/api/v1/wizard/{token}", get(wizard::get_draft).put(wizard::update_draft).delete(wizard::cancel_draft))
        .route("/api/v1/wizard/{token}/next", post(wizard::next_stage))
        .route("/api/v1/wizard/{token}/back", post(wizard::back_stage))
        .route("/api/v1/wizard/{token}/submit", post(wizard::submit_booking))

        // Uploads
        .route("/api/v1/uploads/payment-proof", post(upload::upload_payment_proof).layer(upload_body_limit.clone()))
        .route("/api/v1/uploads/gallery", post(upload::upload_gallery).layer(upload_body_limit))

        // Feedback & testimonials
        .route("/api/v1/feedback", post(feedback::create_feedback))
        .route("/api/v1/testimonials", get(feedback::list_testimonials))

        // Admin dashboard
        .route("/api/v1/admin/stats", get(booking::get_stats))
        .route("/api/v1/admin/bookings", get(booking::list_bookings))
        .route("/api/v1/admin/bookings/{booking_id}", get(booking::get_booking).put(booking::update_booking_status).delete(booking::delete_booking))
        .route("/api/v1/admin/feedback", get(feedback::list_feedback))
        .route("/api/v1/admin/feedback/{feedback_id}", put(feedback::set_feedback_visibility).delete(feedback::delete_feedback))
        .route("/api/v1/admin/members", post(member::create_member).get(member::list_members))
        .route("/api/v1/admin/members/{user_id}", delete(member::delete_member))
        .route("/api/v1/admin/jobs", get(notification::list_jobs))
        .route("/api/v1/admin/notifications/test-send", post(notification::send_test_email))

        // Uploaded files (payment proofs, gallery images)
        .nest_service("/files", ServeDir::new(state.file_store.root()))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
