use crate::domain::{models::feedback::Feedback, ports::FeedbackRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresFeedbackRepo {
    pool: PgPool,
}

impl PostgresFeedbackRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PostgresFeedbackRepo {
    async fn create(&self, feedback: &Feedback) -> Result<Feedback, AppError> {
        sqlx::query_as::<_, Feedback>(
            "INSERT INTO feedbacks (id, name, rating, message, show_in_testimonials, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *"
        )
            .bind(&feedback.id).bind(&feedback.name).bind(feedback.rating)
            .bind(&feedback.message).bind(feedback.show_in_testimonials).bind(feedback.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Feedback>, AppError> {
        sqlx::query_as::<_, Feedback>("SELECT * FROM feedbacks ORDER BY created_at DESC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_published(&self) -> Result<Vec<Feedback>, AppError> {
        sqlx::query_as::<_, Feedback>("SELECT * FROM feedbacks WHERE show_in_testimonials = TRUE ORDER BY created_at DESC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn set_published(&self, id: &str, published: bool) -> Result<Feedback, AppError> {
        sqlx::query_as::<_, Feedback>("UPDATE feedbacks SET show_in_testimonials = $1 WHERE id = $2 RETURNING *")
            .bind(published).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Feedback not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM feedbacks WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Feedback not found".into()));
        }
        Ok(())
    }
}
