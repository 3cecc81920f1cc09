use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::TestSendRequest;
use crate::api::extractors::auth::AuthUser;
use crate::domain::services::notification_service::{BookingEmailContext, NotificationKind};
use crate::error::AppError;
use crate::state::AppState;

/// Renders and sends one notification to an arbitrary address so an
/// operator can eyeball the templates. With a booking id the real data
/// is used, otherwise a sample context.
pub async fn send_test_email(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<TestSendRequest>,
) -> Result<impl IntoResponse, AppError> {
    let kind = NotificationKind::parse(&payload.kind)
        .ok_or_else(|| AppError::Validation(format!("Unknown notification type: {}", payload.kind)))?;

    let context = if let Some(booking_id) = &payload.booking_id {
        let found = state.booking_repo.find_by_id(booking_id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;
        BookingEmailContext::from_booking(&found, None)
    } else {
        BookingEmailContext {
            name: "Test Customer".to_string(),
            package: "Basic Package".to_string(),
            total_amount: 399,
            downpayment: 200,
            date: "2025-01-01".to_string(),
            time_start: "10:00 AM".to_string(),
            extension_text: None,
            reason: "Scheduling conflict".to_string(),
        }
    };

    let (subject, html) = state.notification_service.render(kind, &context)?;
    state.email_service.send(&payload.recipient, &subject, &html, None, None).await?;

    info!("Test email ({}) sent to {}", payload.kind, payload.recipient);
    Ok(Json(serde_json::json!({ "status": "sent" })))
}

pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let jobs = state.job_repo.list_recent(100).await?;
    Ok(Json(jobs))
}
