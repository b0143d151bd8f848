//! Disciplinary and follow-up comments written about students.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub author_id: Uuid,
    pub description: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

aula_db::impl_soft_deletable!(
    Comment,
    table = "comments",
    entity = "Comment",
    columns = "id, student_id, author_id, description, date, created_at, updated_at, deleted_at"
);

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentWithCategories {
    #[serde(flatten)]
    pub comment: Comment,
    pub category_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    pub student_id: Uuid,
    /// Defaults to the authenticated user
    pub author_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Defaults to now
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentDto {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    /// Replaces the whole category set when present
    pub category_ids: Option<Vec<Uuid>>,
}

/// Form-encoded comment submission. The author is the submitting user.
///
/// `categories` is a comma-separated list of category IDs, since
/// form bodies carry no arrays.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CommentForm {
    pub student_id: Uuid,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    #[validate(custom(function = "validate_category_list"))]
    pub categories: String,
}

impl CommentForm {
    pub fn category_ids(&self) -> Vec<Uuid> {
        parse_category_list(&self.categories)
            .into_iter()
            .filter_map(Result::ok)
            .collect()
    }

    pub fn into_create_dto(self, author_id: Uuid) -> CreateCommentDto {
        let category_ids = self.category_ids();
        CreateCommentDto {
            student_id: self.student_id,
            author_id: Some(author_id),
            description: self.description,
            date: None,
            category_ids,
        }
    }
}

fn parse_category_list(raw: &str) -> Vec<Result<Uuid, uuid::Error>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Uuid::parse_str)
        .collect()
}

fn validate_category_list(raw: &str) -> Result<(), ValidationError> {
    if parse_category_list(raw).iter().any(Result::is_err) {
        return Err(ValidationError::new("categories")
            .with_message("Categories must be comma-separated IDs".into()));
    }
    Ok(())
}
