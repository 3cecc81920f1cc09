use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub package_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub extension_min: i32,
    pub duration_total: i32,
    pub total_price: i64,
    pub downpayment: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub notes: Option<String>,
    pub payment_proof_path: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub package_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub extension_min: i32,
    pub duration_total: i32,
    pub total_price: i64,
    pub downpayment: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub notes: Option<String>,
    pub payment_proof_path: String,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            package_id: params.package_id,
            date: params.date,
            time: params.time,
            extension_min: params.extension_min,
            duration_total: params.duration_total,
            total_price: params.total_price,
            downpayment: params.downpayment,
            customer_name: params.customer_name,
            customer_email: params.customer_email,
            customer_phone: params.customer_phone,
            notes: params.notes,
            payment_proof_path: params.payment_proof_path,
            status: STATUS_PENDING.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_valid_status(status: &str) -> bool {
        matches!(status, STATUS_PENDING | STATUS_CONFIRMED | STATUS_REJECTED | STATUS_COMPLETED)
    }
}
