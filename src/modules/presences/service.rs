use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_db::{SoftDeletable, map_unique_violation};
use aula_models::{CreatePresenceDto, Presence, UpdatePresenceDto};

const ALREADY_MARKED: &str = "The student or preceptor already has a presence record";

pub struct PresenceService;

impl PresenceService {
    /// Records attendance. `date` defaults to now.
    #[instrument(skip(db))]
    pub async fn create_presence(
        db: &PgPool,
        dto: CreatePresenceDto,
    ) -> Result<Presence, AppError> {
        let sql = format!(
            "INSERT INTO presences (date, student_id, preceptor_id, presence) \
             VALUES (COALESCE($1, NOW()), $2, $3, $4) RETURNING {}",
            Presence::COLUMNS
        );
        sqlx::query_as::<_, Presence>(&sql)
            .bind(dto.date)
            .bind(dto.student_id)
            .bind(dto.preceptor_id)
            .bind(dto.presence)
            .fetch_one(db)
            .await
            .map_err(|e| map_unique_violation(e, ALREADY_MARKED))
    }

    #[instrument(skip(db))]
    pub async fn update_presence(
        db: &PgPool,
        id: Uuid,
        dto: UpdatePresenceDto,
    ) -> Result<Presence, AppError> {
        let sql = format!(
            "UPDATE presences SET date = COALESCE($2, date), \
             student_id = CASE WHEN $3 THEN $4 ELSE student_id END, \
             preceptor_id = CASE WHEN $5 THEN $6 ELSE preceptor_id END, \
             presence = CASE WHEN $7 THEN $8 ELSE presence END, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            Presence::COLUMNS
        );
        sqlx::query_as::<_, Presence>(&sql)
            .bind(id)
            .bind(dto.date)
            .bind(dto.student_id.is_some())
            .bind(dto.student_id.flatten())
            .bind(dto.preceptor_id.is_some())
            .bind(dto.preceptor_id.flatten())
            .bind(dto.presence.is_some())
            .bind(dto.presence.flatten())
            .fetch_optional(db)
            .await
            .map_err(|e| map_unique_violation(e, ALREADY_MARKED))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Presence not found")))
    }
}
