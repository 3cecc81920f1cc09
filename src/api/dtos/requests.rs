use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct UpdateDraftRequest {
    pub package_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub extension_min: Option<i32>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub payment_proof_path: Option<String>,
}

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub package_id: String,
    pub extension_min: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateFeedbackRequest {
    pub name: String,
    pub rating: i32,
    pub message: String,
}

#[derive(Deserialize)]
pub struct UpdateFeedbackRequest {
    pub show_in_testimonials: bool,
}

#[derive(Deserialize)]
pub struct CreateMemberRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct TestSendRequest {
    pub kind: String,
    pub recipient: String,
    pub booking_id: Option<String>,
}
