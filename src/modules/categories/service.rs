use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_db::{SoftDeletable, map_db_error};
use aula_models::{Category, CreateCategoryDto, UpdateCategoryDto};

pub struct CategoryService;

impl CategoryService {
    #[instrument(skip(db))]
    pub async fn create_category(
        db: &PgPool,
        dto: CreateCategoryDto,
    ) -> Result<Category, AppError> {
        let sql = format!(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING {}",
            Category::COLUMNS
        );
        sqlx::query_as::<_, Category>(&sql)
            .bind(dto.name.trim())
            .bind(&dto.description)
            .fetch_one(db)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(db))]
    pub async fn update_category(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCategoryDto,
    ) -> Result<Category, AppError> {
        let sql = format!(
            "UPDATE categories SET name = COALESCE($2, name), \
             description = COALESCE($3, description), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            Category::COLUMNS
        );
        sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(dto.description)
            .fetch_optional(db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Category not found")))
    }
}
