use std::sync::LazyLock;
use chrono::NaiveDate;
use regex::Regex;

use crate::domain::models::draft::BookingDraft;
use crate::domain::services::{availability, catalog};
use crate::error::AppError;

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^09\d{9}$").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

/// The four wizard stages, strictly linear. `Done` is terminal: the
/// draft is gone by then and a new booking starts a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStage {
    Service,
    Details,
    Payment,
    Done,
}

impl WizardStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStage::Service => "SERVICE",
            WizardStage::Details => "DETAILS",
            WizardStage::Payment => "PAYMENT",
            WizardStage::Done => "DONE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SERVICE" => Some(WizardStage::Service),
            "DETAILS" => Some(WizardStage::Details),
            "PAYMENT" => Some(WizardStage::Payment),
            "DONE" => Some(WizardStage::Done),
            _ => None,
        }
    }
}

pub fn stage_of(draft: &BookingDraft) -> Result<WizardStage, AppError> {
    WizardStage::parse(&draft.stage)
        .ok_or_else(|| AppError::InternalWithMsg(format!("Corrupt wizard stage: {}", draft.stage)))
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Guard for Service -> Details: a real package, a valid extension, a
/// date that is not in the past, and a time from that date's slot grid.
pub fn validate_service(draft: &BookingDraft, today: NaiveDate) -> Result<(), AppError> {
    let package_id = draft.package_id.as_deref()
        .ok_or(AppError::Validation("Please select a package".into()))?;
    if catalog::find_package(package_id).is_none() {
        return Err(AppError::Validation(format!("Unknown package: {}", package_id)));
    }
    if catalog::extension_price(draft.extension_min).is_none() {
        return Err(AppError::Validation(format!("Invalid extension: {} minutes", draft.extension_min)));
    }

    let date = draft.date
        .ok_or(AppError::Validation("Please select a date".into()))?;
    if date < today {
        return Err(AppError::Validation("Date cannot be in the past".into()));
    }

    let time = draft.time.as_deref()
        .ok_or(AppError::Validation("Please select a time slot".into()))?;
    if !availability::generate_time_slots(date).iter().any(|s| s == time) {
        return Err(AppError::Validation(format!("Time {} is not a bookable slot on {}", time, date)));
    }

    Ok(())
}

/// Guard for Details -> Payment: name, email, and an 11-digit local
/// phone number starting with 09.
pub fn validate_details(draft: &BookingDraft) -> Result<(), AppError> {
    let name = draft.full_name.as_deref().unwrap_or("").trim();
    if name.is_empty() {
        return Err(AppError::Validation("Full name is required".into()));
    }

    let email = draft.email.as_deref().unwrap_or("");
    if !is_valid_email(email) {
        return Err(AppError::Validation("A valid email address is required".into()));
    }

    let phone = draft.phone.as_deref().unwrap_or("");
    if !is_valid_phone(phone) {
        return Err(AppError::Validation("Phone must be 11 digits starting with 09".into()));
    }

    Ok(())
}

/// Guard for Payment -> Done: proof of payment must be attached.
pub fn validate_payment(draft: &BookingDraft) -> Result<(), AppError> {
    if draft.payment_proof_path.as_deref().unwrap_or("").is_empty() {
        return Err(AppError::Validation("Please upload your payment proof".into()));
    }
    Ok(())
}

/// Runs the guard for the draft's current stage and returns the stage to
/// move to. Submission is not a transition: `Payment` finalizes via the
/// submit path, which owns the availability re-check.
pub fn advance(draft: &BookingDraft, today: NaiveDate) -> Result<WizardStage, AppError> {
    match stage_of(draft)? {
        WizardStage::Service => {
            validate_service(draft, today)?;
            Ok(WizardStage::Details)
        }
        WizardStage::Details => {
            validate_details(draft)?;
            Ok(WizardStage::Payment)
        }
        WizardStage::Payment => {
            Err(AppError::Validation("Submit the booking to finish the payment step".into()))
        }
        WizardStage::Done => Err(AppError::Validation("Booking already completed".into())),
    }
}

pub fn retreat(draft: &BookingDraft) -> Result<WizardStage, AppError> {
    match stage_of(draft)? {
        WizardStage::Service => Err(AppError::Validation("Already at the first step".into())),
        WizardStage::Details => Ok(WizardStage::Service),
        WizardStage::Payment => Ok(WizardStage::Details),
        WizardStage::Done => Err(AppError::Validation("Booking already completed".into())),
    }
}
