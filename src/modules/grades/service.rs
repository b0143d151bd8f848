use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_db::{SoftDeletable, map_db_error};
use aula_models::{CreateGradeDto, Grade, UpdateGradeDto};

pub struct GradeService;

impl GradeService {
    #[instrument(skip(db))]
    pub async fn create_grade(db: &PgPool, dto: CreateGradeDto) -> Result<Grade, AppError> {
        let sql = format!(
            "INSERT INTO grades (professor_id, student_id, subject_id, grade) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            Grade::COLUMNS
        );
        let grade = sqlx::query_as::<_, Grade>(&sql)
            .bind(dto.professor_id)
            .bind(dto.student_id)
            .bind(dto.subject_id)
            .bind(dto.grade)
            .fetch_one(db)
            .await
            .map_err(map_db_error)?;

        tracing::info!(grade_id = %grade.id, value = %grade.grade, "Grade recorded");
        Ok(grade)
    }

    #[instrument(skip(db))]
    pub async fn update_grade(
        db: &PgPool,
        id: Uuid,
        dto: UpdateGradeDto,
    ) -> Result<Grade, AppError> {
        let sql = format!(
            "UPDATE grades SET professor_id = CASE WHEN $2 THEN $3 ELSE professor_id END, \
             student_id = CASE WHEN $4 THEN $5 ELSE student_id END, \
             subject_id = CASE WHEN $6 THEN $7 ELSE subject_id END, \
             grade = COALESCE($8, grade), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            Grade::COLUMNS
        );
        sqlx::query_as::<_, Grade>(&sql)
            .bind(id)
            .bind(dto.professor_id.is_some())
            .bind(dto.professor_id.flatten())
            .bind(dto.student_id.is_some())
            .bind(dto.student_id.flatten())
            .bind(dto.subject_id.is_some())
            .bind(dto.subject_id.flatten())
            .bind(dto.grade)
            .fetch_optional(db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Grade not found")))
    }
}
