use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_db::{SoftDeletable, map_db_error};
use aula_models::{CreatePhoneDto, Phone, UpdatePhoneDto};

pub struct PhoneService;

impl PhoneService {
    #[instrument(skip(db))]
    pub async fn create_phone(db: &PgPool, dto: CreatePhoneDto) -> Result<Phone, AppError> {
        let sql = format!(
            "INSERT INTO phones (number, student_id) VALUES ($1, $2) RETURNING {}",
            Phone::COLUMNS
        );
        sqlx::query_as::<_, Phone>(&sql)
            .bind(dto.number.trim())
            .bind(dto.student_id)
            .fetch_one(db)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(db))]
    pub async fn update_phone(
        db: &PgPool,
        id: Uuid,
        dto: UpdatePhoneDto,
    ) -> Result<Phone, AppError> {
        let sql = format!(
            "UPDATE phones SET number = COALESCE($2, number), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            Phone::COLUMNS
        );
        sqlx::query_as::<_, Phone>(&sql)
            .bind(id)
            .bind(dto.number.as_deref().map(str::trim))
            .fetch_optional(db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Phone not found")))
    }
}
