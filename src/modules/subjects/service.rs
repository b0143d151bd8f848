use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_db::{SoftDeletable, map_db_error};
use aula_models::{CreateSubjectDto, Subject, UpdateSubjectDto};

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db))]
    pub async fn create_subject(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        let sql = format!(
            "INSERT INTO subjects (name) VALUES ($1) RETURNING {}",
            Subject::COLUMNS
        );
        sqlx::query_as::<_, Subject>(&sql)
            .bind(dto.name.trim())
            .fetch_one(db)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(db))]
    pub async fn update_subject(
        db: &PgPool,
        id: Uuid,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        let sql = format!(
            "UPDATE subjects SET name = COALESCE($2, name), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            Subject::COLUMNS
        );
        sqlx::query_as::<_, Subject>(&sql)
            .bind(id)
            .bind(dto.name.as_deref().map(str::trim))
            .fetch_optional(db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subject not found")))
    }
}
