use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

/// One in-progress booking session. The row is the wizard's only state:
/// it survives page reloads and is deleted on submit or cancel.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct BookingDraft {
    pub token: String,
    pub stage: String,
    pub package_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub extension_min: i32,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub payment_proof_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingDraft {
    pub fn new() -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        let now = Utc::now();
        Self {
            token,
            stage: crate::domain::services::wizard::WizardStage::Service.as_str().to_string(),
            package_id: None,
            date: None,
            time: None,
            extension_min: 0,
            full_name: None,
            email: None,
            phone: None,
            notes: None,
            payment_proof_path: None,
            created_at: now,
            updated_at: now,
        }
    }
}
