use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_db::{SoftDeletable, map_unique_violation};
use aula_models::{Course, CreateCourseDto, UpdateCourseDto};

const DUPLICATE_COURSE: &str = "A course with this year, division and shift already exists";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let sql = format!(
            "INSERT INTO courses (year, division, shift) VALUES ($1, $2, $3) RETURNING {}",
            Course::COLUMNS
        );
        sqlx::query_as::<_, Course>(&sql)
            .bind(dto.year)
            .bind(dto.division)
            .bind(dto.shift)
            .fetch_one(db)
            .await
            .map_err(|e| map_unique_violation(e, DUPLICATE_COURSE))
    }

    /// Updates an alive course. Omitted fields keep their value.
    #[instrument(skip(db))]
    pub async fn update_course(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let sql = format!(
            "UPDATE courses SET year = COALESCE($2, year), division = COALESCE($3, division), \
             shift = COALESCE($4, shift), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            Course::COLUMNS
        );
        sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .bind(dto.year)
            .bind(dto.division)
            .bind(dto.shift)
            .fetch_optional(db)
            .await
            .map_err(|e| map_unique_violation(e, DUPLICATE_COURSE))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))
    }

}
