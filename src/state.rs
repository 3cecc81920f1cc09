use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, BookingRepository, DraftRepository, EmailService,
    FeedbackRepository, JobRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::notification_service::NotificationService;
use crate::infra::uploads::disk_store::DiskStore;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub draft_repo: Arc<dyn DraftRepository>,
    pub feedback_repo: Arc<dyn FeedbackRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub auth_service: Arc<AuthService>,
    pub notification_service: Arc<NotificationService>,
    pub email_service: Arc<dyn EmailService>,
    pub file_store: Arc<DiskStore>,
}
