//! Comments and their category links.
//!
//! A comment and its `comment_categories` rows are written in one
//! transaction, so a failed link leaves no orphan comment behind.

use sqlx::{PgConnection, PgPool};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_db::{Repository, SoftDeletable, map_db_error};
use aula_models::{
    Category, Comment, CommentWithCategories, CreateCommentDto, UpdateCommentDto,
};

pub struct CommentService;

impl CommentService {
    /// Creates a comment. The author defaults to `caller_id` and the date to
    /// now.
    #[instrument(skip(db))]
    pub async fn create_comment(
        db: &PgPool,
        dto: CreateCommentDto,
        caller_id: Uuid,
    ) -> Result<CommentWithCategories, AppError> {
        let mut tx = db.begin().await.map_err(map_db_error)?;

        let sql = format!(
            "INSERT INTO comments (student_id, author_id, description, date) \
             VALUES ($1, $2, $3, COALESCE($4, NOW())) RETURNING {}",
            Comment::COLUMNS
        );
        let comment = sqlx::query_as::<_, Comment>(&sql)
            .bind(dto.student_id)
            .bind(dto.author_id.unwrap_or(caller_id))
            .bind(dto.description.trim())
            .bind(dto.date)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let category_ids = Self::link_categories(&mut tx, comment.id, &dto.category_ids).await?;

        tx.commit().await.map_err(map_db_error)?;

        tracing::info!(
            comment_id = %comment.id,
            student_id = %comment.student_id,
            categories = category_ids.len(),
            "Comment created"
        );

        Ok(CommentWithCategories {
            comment,
            category_ids,
        })
    }

    /// Updates an alive comment. `category_ids`, when present, replaces the
    /// whole category set.
    #[instrument(skip(db))]
    pub async fn update_comment(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCommentDto,
    ) -> Result<CommentWithCategories, AppError> {
        let mut tx = db.begin().await.map_err(map_db_error)?;

        let sql = format!(
            "UPDATE comments SET description = COALESCE($2, description), \
             date = COALESCE($3, date), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            Comment::COLUMNS
        );
        let comment = sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .bind(dto.description.as_deref().map(str::trim))
            .bind(dto.date)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Comment not found")))?;

        let category_ids = match dto.category_ids {
            Some(ids) => {
                sqlx::query("DELETE FROM comment_categories WHERE comment_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
                Self::link_categories(&mut tx, id, &ids).await?
            }
            None => Self::category_ids(&mut tx, id).await?,
        };

        tx.commit().await.map_err(map_db_error)?;

        Ok(CommentWithCategories {
            comment,
            category_ids,
        })
    }

    /// Alive categories attached to an alive comment, by name.
    #[instrument(skip(db))]
    pub async fn get_categories(db: &PgPool, comment_id: Uuid) -> Result<Vec<Category>, AppError> {
        Repository::<Comment>::objects(db).get(comment_id).await?;

        let sql = format!(
            "SELECT {} FROM categories \
             WHERE deleted_at IS NULL \
             AND id IN (SELECT category_id FROM comment_categories WHERE comment_id = $1) \
             ORDER BY name",
            Category::COLUMNS
        );
        sqlx::query_as::<_, Category>(&sql)
            .bind(comment_id)
            .fetch_all(db)
            .await
            .map_err(map_db_error)
    }

    async fn link_categories(
        conn: &mut PgConnection,
        comment_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, AppError> {
        let mut linked: Vec<Uuid> = Vec::with_capacity(category_ids.len());
        for category_id in category_ids {
            if linked.contains(category_id) {
                continue;
            }
            sqlx::query("INSERT INTO comment_categories (comment_id, category_id) VALUES ($1, $2)")
                .bind(comment_id)
                .bind(category_id)
                .execute(&mut *conn)
                .await
                .map_err(map_db_error)?;
            linked.push(*category_id);
        }
        Ok(linked)
    }

    async fn category_ids(conn: &mut PgConnection, comment_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT category_id FROM comment_categories WHERE comment_id = $1",
        )
        .bind(comment_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(map_db_error)
    }
}
