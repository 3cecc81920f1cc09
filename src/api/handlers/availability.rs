use axum::{extract::{Query, State}, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::requests::AvailabilityQuery;
use crate::api::dtos::responses::{SlotView, SlotsResponse};
use crate::domain::services::{availability, catalog, pricing};
use crate::error::AppError;
use crate::state::AppState;

/// Slot grid for one date, with each slot marked available or taken for
/// the requested package + extension duration.
pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let package = catalog::find_package(&params.package_id)
        .ok_or_else(|| AppError::Validation(format!("Unknown package: {}", params.package_id)))?;

    let extension_min = params.extension_min.unwrap_or(0);
    let quote = pricing::quote(package, extension_min)
        .ok_or_else(|| AppError::Validation(format!("Invalid extension: {} minutes", extension_min)))?;

    let bookings = state.booking_repo.list_active_by_date(params.date).await?;
    let booked = availability::booked_ranges(&bookings);

    let slots = availability::generate_time_slots(params.date)
        .into_iter()
        .map(|time| {
            let start_min = availability::time_to_minutes(&time).unwrap_or(0);
            SlotView {
                available: availability::is_slot_available(start_min, quote.duration_total, &booked),
                time,
            }
        })
        .collect();

    Ok(Json(SlotsResponse {
        date: params.date.to_string(),
        duration_min: quote.duration_total,
        slots,
    }))
}
