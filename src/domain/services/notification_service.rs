use std::sync::Arc;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::error;

use crate::config::Config;
use crate::domain::models::booking::Booking;
use crate::domain::services::catalog;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Received,
    Confirmed,
    Rejected,
}

impl NotificationKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "received" => Some(NotificationKind::Received),
            "confirmed" => Some(NotificationKind::Confirmed),
            "rejected" => Some(NotificationKind::Rejected),
            _ => None,
        }
    }

    fn template_name(&self) -> &'static str {
        match self {
            NotificationKind::Received => "received.html",
            NotificationKind::Confirmed => "confirmed.html",
            NotificationKind::Rejected => "rejected.html",
        }
    }
}

/// "13:30" -> "1:30 PM", for customer-facing copy.
pub fn format_time_12h(time: &str) -> String {
    let Some((hour, minute)) = time.split_once(':') else {
        return time.to_string();
    };
    let Ok(h) = hour.parse::<u32>() else {
        return time.to_string();
    };
    let suffix = if h >= 12 { "PM" } else { "AM" };
    let display_hour = match h % 12 {
        0 => 12,
        other => other,
    };
    format!("{}:{} {}", display_hour, minute, suffix)
}

#[derive(Serialize)]
pub struct BookingEmailContext {
    pub name: String,
    pub package: String,
    pub total_amount: i64,
    pub downpayment: i64,
    pub date: String,
    pub time_start: String,
    pub extension_text: Option<String>,
    pub reason: String,
}

impl BookingEmailContext {
    pub fn from_booking(booking: &Booking, reason: Option<String>) -> Self {
        let extension_text = if booking.extension_min > 0 {
            let price = catalog::extension_price(booking.extension_min).unwrap_or(0);
            Some(format!("+{} mins (₱{})", booking.extension_min, price))
        } else {
            None
        };

        Self {
            name: booking.customer_name.clone(),
            package: catalog::package_display_name(&booking.package_id),
            total_amount: booking.total_price,
            downpayment: booking.downpayment,
            date: booking.date.format("%Y-%m-%d").to_string(),
            time_start: format_time_12h(&booking.time),
            extension_text,
            reason: reason.unwrap_or_else(|| "Scheduling conflict".to_string()),
        }
    }
}

pub struct NotificationService {
    templates: Arc<Tera>,
    config: Config,
}

impl NotificationService {
    pub fn new(templates: Arc<Tera>, config: Config) -> Self {
        Self { templates, config }
    }

    /// Renders subject + HTML body for one notification. Studio identity
    /// and payee details come from config so the templates stay generic.
    pub fn render(
        &self,
        kind: NotificationKind,
        booking: &BookingEmailContext,
    ) -> Result<(String, String), AppError> {
        let mut context = Context::from_serialize(booking).map_err(|e| {
            error!("Failed to build template context: {:?}", e);
            AppError::Internal
        })?;
        context.insert("studio_name", &self.config.studio_name);
        context.insert("studio_address", &self.config.studio_address);
        context.insert("studio_landmark", &self.config.studio_landmark);
        context.insert("business_email", &self.config.business_email);
        context.insert("gcash_name", &self.config.gcash_name);
        context.insert("gcash_number", &self.config.gcash_number);

        let subject = match kind {
            NotificationKind::Received => format!("Booking Received - {}", self.config.studio_name),
            NotificationKind::Confirmed => format!("Booking Confirmed - {}", self.config.studio_name),
            NotificationKind::Rejected => format!("Booking Update - {}", self.config.studio_name),
        };

        let body = self.templates.render(kind.template_name(), &context).map_err(|e| {
            error!("Template render failed for {}: {:?}", kind.template_name(), e);
            AppError::InternalWithMsg(format!("Template render failed: {}", kind.template_name()))
        })?;

        Ok((subject, body))
    }
}
