use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Feedback {
    pub id: String,
    pub name: String,
    pub rating: i32,
    pub message: String,
    pub show_in_testimonials: bool,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    /// New submissions stay hidden until an admin publishes them.
    pub fn new(name: String, rating: i32, message: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            rating,
            message,
            show_in_testimonials: false,
            created_at: Utc::now(),
        }
    }
}
