use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::{Local, Utc};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::UpdateDraftRequest;
use crate::api::dtos::responses::DraftResponse;
use crate::domain::models::booking::{Booking, NewBookingParams};
use crate::domain::models::draft::BookingDraft;
use crate::domain::models::job::{Job, JOB_NOTIFY_RECEIVED};
use crate::domain::services::{availability, catalog, pricing, wizard};
use crate::domain::services::pricing::Quote;
use crate::domain::services::wizard::WizardStage;
use crate::error::AppError;
use crate::state::AppState;

fn quote_for(draft: &BookingDraft) -> Option<Quote> {
    let package = catalog::find_package(draft.package_id.as_deref()?)?;
    pricing::quote(package, draft.extension_min)
}

fn respond(draft: BookingDraft) -> Json<DraftResponse> {
    let quote = quote_for(&draft);
    Json(DraftResponse { draft, quote })
}

pub async fn start_wizard(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let draft = state.draft_repo.create(&BookingDraft::new()).await?;
    info!("Wizard started: {}", draft.token);
    Ok(respond(draft))
}

pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let draft = state.draft_repo.find_by_token(&token).await?
        .ok_or(AppError::NotFound("Draft not found".into()))?;
    Ok(respond(draft))
}

pub async fn update_draft(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    Json(payload): Json<UpdateDraftRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut draft = state.draft_repo.find_by_token(&token).await?
        .ok_or(AppError::NotFound("Draft not found".into()))?;

    if wizard::stage_of(&draft)? == WizardStage::Done {
        return Err(AppError::Validation("Booking already completed".into()));
    }

    if let Some(package_id) = payload.package_id { draft.package_id = Some(package_id); }
    if let Some(date) = payload.date { draft.date = Some(date); }
    if let Some(time) = payload.time { draft.time = Some(time); }
    if let Some(extension_min) = payload.extension_min { draft.extension_min = extension_min; }
    if let Some(full_name) = payload.full_name { draft.full_name = Some(full_name); }
    if let Some(email) = payload.email { draft.email = Some(email); }
    if let Some(phone) = payload.phone { draft.phone = Some(phone); }
    if let Some(notes) = payload.notes { draft.notes = Some(notes); }
    if let Some(path) = payload.payment_proof_path { draft.payment_proof_path = Some(path); }

    draft.updated_at = Utc::now();
    let updated = state.draft_repo.update(&draft).await?;
    Ok(respond(updated))
}

pub async fn next_stage(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut draft = state.draft_repo.find_by_token(&token).await?
        .ok_or(AppError::NotFound("Draft not found".into()))?;

    let next = wizard::advance(&draft, Local::now().date_naive())?;
    draft.stage = next.as_str().to_string();
    draft.updated_at = Utc::now();

    let updated = state.draft_repo.update(&draft).await?;
    Ok(respond(updated))
}

pub async fn back_stage(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut draft = state.draft_repo.find_by_token(&token).await?
        .ok_or(AppError::NotFound("Draft not found".into()))?;

    let prev = wizard::retreat(&draft)?;
    draft.stage = prev.as_str().to_string();
    draft.updated_at = Utc::now();

    let updated = state.draft_repo.update(&draft).await?;
    Ok(respond(updated))
}

/// Finalizes the wizard: re-runs every guard, re-checks the slot against
/// the bookings that exist right now, inserts the pending booking with
/// its notification job, and clears the draft. The email is queued work;
/// its failure never surfaces here.
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let draft = state.draft_repo.find_by_token(&token).await?
        .ok_or(AppError::NotFound("Draft not found".into()))?;

    if wizard::stage_of(&draft)? != WizardStage::Payment {
        return Err(AppError::Validation("Booking is not at the payment step".into()));
    }

    let today = Local::now().date_naive();
    wizard::validate_service(&draft, today)?;
    wizard::validate_details(&draft)?;
    wizard::validate_payment(&draft)?;

    // The guards above guarantee these are present and well-formed.
    let package_id = draft.package_id.clone().ok_or(AppError::Internal)?;
    let date = draft.date.ok_or(AppError::Internal)?;
    let time = draft.time.clone().ok_or(AppError::Internal)?;
    let proof_path = draft.payment_proof_path.clone().ok_or(AppError::Internal)?;

    let package = catalog::find_package(&package_id)
        .ok_or_else(|| AppError::Validation(format!("Unknown package: {}", package_id)))?;
    let quote = pricing::quote(package, draft.extension_min)
        .ok_or_else(|| AppError::Validation(format!("Invalid extension: {} minutes", draft.extension_min)))?;

    let existing = state.booking_repo.list_active_by_date(date).await?;
    let booked = availability::booked_ranges(&existing);
    let start_min = availability::time_to_minutes(&time)
        .ok_or_else(|| AppError::Validation(format!("Invalid time: {}", time)))?;

    if !availability::is_slot_available(start_min, quote.duration_total, &booked) {
        return Err(AppError::Conflict("Selected time slot is no longer available".into()));
    }

    let booking = Booking::new(NewBookingParams {
        package_id,
        date,
        time,
        extension_min: draft.extension_min,
        duration_total: quote.duration_total,
        total_price: quote.total_price,
        downpayment: quote.downpayment,
        customer_name: draft.full_name.clone().unwrap_or_default(),
        customer_email: draft.email.clone().unwrap_or_default(),
        customer_phone: draft.phone.clone().unwrap_or_default(),
        notes: draft.notes.clone(),
        payment_proof_path: proof_path,
    });

    let job = Job::new(JOB_NOTIFY_RECEIVED, booking.id.clone(), None, Utc::now());
    let created = state.booking_repo.create_with_jobs(&booking, vec![job]).await?;

    state.draft_repo.delete(&token).await?;

    info!("Booking submitted: {} ({} on {} at {})",
        created.id, created.package_id, created.date, created.time);
    Ok(Json(created))
}

pub async fn cancel_draft(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.draft_repo.delete(&token).await?;
    info!("Wizard cancelled: {}", token);
    Ok(Json(serde_json::json!({ "status": "cancelled" })))
}
