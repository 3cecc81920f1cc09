use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn, info_span, Instrument};

use crate::domain::models::job::{Job, JOB_NOTIFY_CONFIRMED, JOB_NOTIFY_RECEIVED, JOB_NOTIFY_REJECTED};
use crate::domain::services::notification_service::{BookingEmailContext, NotificationKind};
use crate::error::AppError;
use crate::state::AppState;

/// Polls the job queue and delivers notification emails. A failed job is
/// marked FAILED with its error and never retried; nothing here touches
/// the booking it belongs to.
pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background job worker...");

    loop {
        match state.job_repo.find_pending(10).await {
            Ok(jobs) => {
                for job in jobs {
                    let span = info_span!(
                        "background_job",
                        job_id = %job.id,
                        job_type = %job.job_type,
                    );

                    let state = state.clone();

                    async move {
                        info!("Processing job: {}", job.job_type);
                        match process_job(&state, &job).await {
                            Ok(_) => {
                                info!("Job completed successfully");
                                if let Err(e) = state.job_repo.update_status(&job.id, "COMPLETED", None).await {
                                    error!("Failed to mark job as completed: {:?}", e);
                                }
                            },
                            Err(e) => {
                                let err_msg = format!("{}", e);
                                error!("Job failed with error: {}", err_msg);
                                if let Err(up_err) = state.job_repo.update_status(&job.id, "FAILED", Some(err_msg)).await {
                                    error!("Failed to mark job as failed: {:?}", up_err);
                                }
                            }
                        }
                    }
                        .instrument(span)
                        .await;
                }
            }
            Err(e) => error!("Failed to fetch pending jobs: {:?}", e),
        }
        sleep(Duration::from_secs(5)).await;
    }
}

async fn process_job(state: &Arc<AppState>, job: &Job) -> Result<(), AppError> {
    let kind = match job.job_type.as_str() {
        JOB_NOTIFY_RECEIVED => NotificationKind::Received,
        JOB_NOTIFY_CONFIRMED => NotificationKind::Confirmed,
        JOB_NOTIFY_REJECTED => NotificationKind::Rejected,
        other => return Err(AppError::InternalWithMsg(format!("Unknown job type: {}", other))),
    };

    let booking = state.booking_repo.find_by_id(&job.payload.booking_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", job.payload.booking_id)))?;

    let context = BookingEmailContext::from_booking(&booking, job.payload.reason.clone());
    let (subject, html) = state.notification_service.render(kind, &context)?;

    // The received mail carries the payment QR so the customer can settle
    // the downpayment straight from their inbox.
    let qr_bytes = if kind == NotificationKind::Received {
        load_payment_qr(state).await
    } else {
        None
    };

    let (attachment_name, attachment_data) = match &qr_bytes {
        Some(bytes) => (Some("payment_qr.png"), Some(bytes.as_slice())),
        None => (None, None),
    };

    state.email_service.send(
        &booking.customer_email,
        &subject,
        &html,
        attachment_name,
        attachment_data,
    ).await
}

async fn load_payment_qr(state: &Arc<AppState>) -> Option<Vec<u8>> {
    let path = state.config.payment_qr_path.as_ref()?;
    match tokio::fs::read(path).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!("Payment QR not readable at {}: {}", path, e);
            None
        }
    }
}
