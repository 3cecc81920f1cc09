use serde::Serialize;

use crate::domain::models::draft::BookingDraft;
use crate::domain::services::catalog::Package;
use crate::domain::services::pricing::Quote;

#[derive(Serialize)]
pub struct SlotView {
    pub time: String,
    pub available: bool,
}

#[derive(Serialize)]
pub struct SlotsResponse {
    /// Echoes the queried date so clients can drop responses that no
    /// longer match their selection.
    pub date: String,
    pub duration_min: i32,
    pub slots: Vec<SlotView>,
}

#[derive(Serialize)]
pub struct ExtensionView {
    pub minutes: i32,
    pub price: i64,
}

#[derive(Serialize)]
pub struct CatalogResponse {
    pub packages: &'static [Package],
    pub extensions: Vec<ExtensionView>,
}

#[derive(Serialize)]
pub struct DraftResponse {
    pub draft: BookingDraft,
    pub quote: Option<Quote>,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub path: String,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub revenue: i64,
}
