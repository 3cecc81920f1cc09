use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;
use std::sync::LazyLock;
use regex::Regex;
use tracing::info;

use crate::api::dtos::requests::{CreateFeedbackRequest, UpdateFeedbackRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::feedback::Feedback;
use crate::error::AppError;
use crate::state::AppState;

static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static NAME_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-ZÀ-ÿ\s\-'.]").unwrap());
static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

fn sanitize_name(input: &str) -> String {
    let stripped = HTML_TAG_RE.replace_all(input, "");
    let cleaned = NAME_CHARS_RE.replace_all(&stripped, "");
    let collapsed = SPACES_RE.replace_all(&cleaned, " ");
    collapsed.trim().chars().take(50).collect()
}

fn sanitize_text(input: &str) -> String {
    let stripped = HTML_TAG_RE.replace_all(input, "");
    stripped.trim().chars().take(500).collect()
}

pub async fn create_feedback(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateFeedbackRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = sanitize_name(&payload.name);
    let message = sanitize_text(&payload.message);

    if name.is_empty() || message.is_empty() {
        return Err(AppError::Validation("Please provide a valid name and message".into()));
    }

    let feedback = Feedback::new(name, payload.rating.clamp(1, 5), message);
    let created = state.feedback_repo.create(&feedback).await?;

    info!("Feedback received: {} ({} stars)", created.id, created.rating);
    Ok(Json(created))
}

pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let published = state.feedback_repo.list_published().await?;
    Ok(Json(published))
}

pub async fn list_feedback(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let all = state.feedback_repo.list_all().await?;
    Ok(Json(all))
}

pub async fn set_feedback_visibility(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(feedback_id): Path<String>,
    Json(payload): Json<UpdateFeedbackRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.feedback_repo.set_published(&feedback_id, payload.show_in_testimonials).await?;
    info!("Feedback {} visibility set to {}", updated.id, updated.show_in_testimonials);
    Ok(Json(updated))
}

pub async fn delete_feedback(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(feedback_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.feedback_repo.delete(&feedback_id).await?;
    info!("Feedback deleted: {}", feedback_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
