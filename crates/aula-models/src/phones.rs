use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Phone {
    pub id: Uuid,
    pub number: String,
    pub student_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

aula_db::impl_soft_deletable!(
    Phone,
    table = "phones",
    entity = "Phone",
    columns = "id, number, student_id, created_at, updated_at, deleted_at"
);

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePhoneDto {
    #[validate(length(min = 1, max = 50, message = "Number must be 1 to 50 characters"))]
    #[schema(example = "+54 11 5555-0101")]
    pub number: String,
    pub student_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdatePhoneDto {
    #[validate(length(min = 1, max = 50, message = "Number must be 1 to 50 characters"))]
    pub number: Option<String>,
}
