use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::UpdateBookingStatusRequest;
use crate::api::dtos::responses::StatsResponse;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::booking::{self, Booking};
use crate::domain::models::job::{Job, JOB_NOTIFY_CONFIRMED, JOB_NOTIFY_REJECTED};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_all().await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let found = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(found))
}

/// Status changes drive the customer-facing emails: confirming or
/// rejecting queues the matching notification, anything else is silent.
pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !Booking::is_valid_status(&payload.status) {
        return Err(AppError::Validation(format!("Invalid status: {}", payload.status)));
    }

    let updated = state.booking_repo.update_status(&booking_id, &payload.status).await?;

    match payload.status.as_str() {
        booking::STATUS_CONFIRMED => {
            let job = Job::new(JOB_NOTIFY_CONFIRMED, updated.id.clone(), None, Utc::now());
            state.job_repo.create(&job).await?;
        }
        booking::STATUS_REJECTED => {
            let job = Job::new(JOB_NOTIFY_REJECTED, updated.id.clone(), payload.reason.clone(), Utc::now());
            state.job_repo.create(&job).await?;
        }
        _ => {}
    }

    info!("Booking {} status changed to {}", updated.id, updated.status);
    Ok(Json(updated))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.booking_repo.delete(&booking_id).await?;
    info!("Booking deleted: {}", booking_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

/// Dashboard headline numbers; revenue counts confirmed bookings only.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_all().await?;

    let mut stats = StatsResponse { total: 0, pending: 0, confirmed: 0, revenue: 0 };
    for b in &bookings {
        stats.total += 1;
        match b.status.as_str() {
            booking::STATUS_PENDING => stats.pending += 1,
            booking::STATUS_CONFIRMED => {
                stats.confirmed += 1;
                stats.revenue += b.total_price;
            }
            _ => {}
        }
    }

    Ok(Json(stats))
}
