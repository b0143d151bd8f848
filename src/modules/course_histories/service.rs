use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_db::{SoftDeletable, map_db_error};
use aula_models::{CourseHistory, CreateCourseHistoryDto, UpdateCourseHistoryDto};

pub struct CourseHistoryService;

impl CourseHistoryService {
    #[instrument(skip(db))]
    pub async fn create_course_history(
        db: &PgPool,
        dto: CreateCourseHistoryDto,
    ) -> Result<CourseHistory, AppError> {
        let sql = format!(
            "INSERT INTO course_histories (course_id, student_id) VALUES ($1, $2) RETURNING {}",
            CourseHistory::COLUMNS
        );
        sqlx::query_as::<_, CourseHistory>(&sql)
            .bind(dto.course_id)
            .bind(dto.student_id)
            .fetch_one(db)
            .await
            .map_err(map_db_error)
    }

    /// Moves the entry to another course, or detaches it with `null`. The
    /// student is fixed at creation.
    #[instrument(skip(db))]
    pub async fn update_course_history(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseHistoryDto,
    ) -> Result<CourseHistory, AppError> {
        let sql = format!(
            "UPDATE course_histories SET course_id = CASE WHEN $2 THEN $3 ELSE course_id END, \
             updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            CourseHistory::COLUMNS
        );
        sqlx::query_as::<_, CourseHistory>(&sql)
            .bind(id)
            .bind(dto.course_id.is_some())
            .bind(dto.course_id.flatten())
            .fetch_optional(db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course history not found")))
    }
}
