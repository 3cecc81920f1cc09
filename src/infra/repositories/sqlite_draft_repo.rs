use crate::domain::{models::draft::BookingDraft, ports::DraftRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteDraftRepo {
    pool: SqlitePool,
}

impl SqliteDraftRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftRepository for SqliteDraftRepo {
    async fn create(&self, draft: &BookingDraft) -> Result<BookingDraft, AppError> {
        sqlx::query_as::<_, BookingDraft>(
            "INSERT INTO drafts (token, stage, package_id, date, time, extension_min, full_name, email, phone, notes, payment_proof_path, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&draft.token).bind(&draft.stage).bind(&draft.package_id).bind(draft.date)
            .bind(&draft.time).bind(draft.extension_min).bind(&draft.full_name).bind(&draft.email)
            .bind(&draft.phone).bind(&draft.notes).bind(&draft.payment_proof_path)
            .bind(draft.created_at).bind(draft.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<BookingDraft>, AppError> {
        sqlx::query_as::<_, BookingDraft>("SELECT * FROM drafts WHERE token = ?")
            .bind(token).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, draft: &BookingDraft) -> Result<BookingDraft, AppError> {
        sqlx::query_as::<_, BookingDraft>(
            "UPDATE drafts SET stage=?, package_id=?, date=?, time=?, extension_min=?, full_name=?, email=?, phone=?, notes=?, payment_proof_path=?, updated_at=?
             WHERE token=?
             RETURNING *"
        )
            .bind(&draft.stage).bind(&draft.package_id).bind(draft.date).bind(&draft.time)
            .bind(draft.extension_min).bind(&draft.full_name).bind(&draft.email).bind(&draft.phone)
            .bind(&draft.notes).bind(&draft.payment_proof_path).bind(draft.updated_at)
            .bind(&draft.token)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Draft not found".into()))
    }

    async fn delete(&self, token: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM drafts WHERE token = ?")
            .bind(token).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Draft not found".into()));
        }
        Ok(())
    }
}
