use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_db::{SoftDeletable, map_db_error};
use aula_models::{AcademicHistory, CreateAcademicHistoryDto, UpdateAcademicHistoryDto};

pub struct AcademicHistoryService;

impl AcademicHistoryService {
    #[instrument(skip(db))]
    pub async fn create_academic_history(
        db: &PgPool,
        dto: CreateAcademicHistoryDto,
    ) -> Result<AcademicHistory, AppError> {
        let sql = format!(
            "INSERT INTO academic_histories (course_id, subject_id, cycle) VALUES ($1, $2, $3) \
             RETURNING {}",
            AcademicHistory::COLUMNS
        );
        sqlx::query_as::<_, AcademicHistory>(&sql)
            .bind(dto.course_id)
            .bind(dto.subject_id)
            .bind(dto.cycle)
            .fetch_one(db)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(db))]
    pub async fn update_academic_history(
        db: &PgPool,
        id: Uuid,
        dto: UpdateAcademicHistoryDto,
    ) -> Result<AcademicHistory, AppError> {
        let sql = format!(
            "UPDATE academic_histories SET course_id = CASE WHEN $2 THEN $3 ELSE course_id END, \
             subject_id = CASE WHEN $4 THEN $5 ELSE subject_id END, cycle = COALESCE($6, cycle), \
             updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            AcademicHistory::COLUMNS
        );
        sqlx::query_as::<_, AcademicHistory>(&sql)
            .bind(id)
            .bind(dto.course_id.is_some())
            .bind(dto.course_id.flatten())
            .bind(dto.subject_id.is_some())
            .bind(dto.subject_id.flatten())
            .bind(dto.cycle)
            .fetch_optional(db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Academic history not found")))
    }
}
