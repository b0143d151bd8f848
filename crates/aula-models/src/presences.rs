use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use aula_core::serde::deserialize_nullable;

/// Attendance mark. `presence` is `None` while attendance is unknown.
///
/// A student and a preceptor each appear on at most one presence row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Presence {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub student_id: Option<Uuid>,
    pub preceptor_id: Option<Uuid>,
    pub presence: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

aula_db::impl_soft_deletable!(
    Presence,
    table = "presences",
    entity = "Presence",
    columns = "id, date, student_id, preceptor_id, presence, created_at, updated_at, deleted_at"
);

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreatePresenceDto {
    pub date: Option<DateTime<Utc>>,
    pub student_id: Option<Uuid>,
    pub preceptor_id: Option<Uuid>,
    pub presence: Option<bool>,
}

/// Omitted fields keep their value. An explicit `null` clears a reference or
/// sets the mark back to unknown.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePresenceDto {
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub student_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub preceptor_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<bool>)]
    pub presence: Option<Option<bool>>,
}
