use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_db::{Repository, SoftDeletable, map_db_error};
use aula_models::{
    Comment, CourseHistory, CreateStudentDto, Grade, Phone, Student, UpdateStudentDto,
};

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let sql = format!(
            "INSERT INTO students (first_name, last_name, birthday) VALUES ($1, $2, $3) \
             RETURNING {}",
            Student::COLUMNS
        );
        sqlx::query_as::<_, Student>(&sql)
            .bind(dto.first_name.trim())
            .bind(dto.last_name.trim())
            .bind(dto.birthday)
            .fetch_one(db)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(db))]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let sql = format!(
            "UPDATE students SET first_name = COALESCE($2, first_name), \
             last_name = COALESCE($3, last_name), birthday = COALESCE($4, birthday), \
             updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            Student::COLUMNS
        );
        sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .bind(dto.first_name.as_deref().map(str::trim))
            .bind(dto.last_name.as_deref().map(str::trim))
            .bind(dto.birthday)
            .fetch_optional(db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    /// Alive rows of `T` pointing at an alive student.
    #[instrument(skip(db))]
    async fn related<T: SoftDeletable>(db: &PgPool, student_id: Uuid) -> Result<Vec<T>, AppError> {
        Repository::<Student>::objects(db).get(student_id).await?;
        Repository::<T>::objects(db)
            .fetch_by("student_id", student_id)
            .await
    }

    pub async fn get_phones(db: &PgPool, student_id: Uuid) -> Result<Vec<Phone>, AppError> {
        Self::related(db, student_id).await
    }

    pub async fn get_comments(db: &PgPool, student_id: Uuid) -> Result<Vec<Comment>, AppError> {
        Self::related(db, student_id).await
    }

    pub async fn get_course_histories(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<CourseHistory>, AppError> {
        Self::related(db, student_id).await
    }

    pub async fn get_grades(db: &PgPool, student_id: Uuid) -> Result<Vec<Grade>, AppError> {
        Self::related(db, student_id).await
    }
}
