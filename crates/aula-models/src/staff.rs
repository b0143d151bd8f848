//! Staff role records: principals, preceptors and professors.
//!
//! Each record owns exactly one user identity (`user_id`, unique). Removing
//! the user row removes the role record with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::subjects::Subject;

macro_rules! staff_record {
    ($(#[$meta:meta])* $name:ident, table = $table:literal, entity = $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
        pub struct $name {
            pub id: Uuid,
            pub user_id: Uuid,
            pub first_name: String,
            pub last_name: String,
            pub created_at: DateTime<Utc>,
            pub updated_at: DateTime<Utc>,
            pub deleted_at: Option<DateTime<Utc>>,
        }

        aula_db::impl_soft_deletable!(
            $name,
            table = $table,
            entity = $entity,
            columns = "id, user_id, first_name, last_name, created_at, updated_at, deleted_at"
        );

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}: {} {}", $entity, self.first_name, self.last_name)
            }
        }
    };
}

staff_record!(Principal, table = "principals", entity = "Principal");
staff_record!(Preceptor, table = "preceptors", entity = "Preceptor");
staff_record!(
    /// Teaches any number of subjects through `professor_subjects`.
    Professor,
    table = "professors",
    entity = "Professor"
);

/// The three staff roles, used to label metrics and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffRole {
    Principal,
    Preceptor,
    Professor,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Principal => "principal",
            Self::Preceptor => "preceptor",
            Self::Professor => "professor",
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfessorWithSubjects {
    #[serde(flatten)]
    pub professor: Professor,
    pub subjects: Vec<Subject>,
}

/// Creates the user identity and the role record together.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStaffMemberDto {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 50, message = "First name must be 1 to 50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be 1 to 50 characters"))]
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProfessorDto {
    #[serde(flatten)]
    #[validate(nested)]
    pub member: CreateStaffMemberDto,
    #[serde(default)]
    pub subject_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStaffMemberDto {
    #[validate(length(min = 1, max = 50, message = "First name must be 1 to 50 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Last name must be 1 to 50 characters"))]
    pub last_name: Option<String>,
}

/// Replaces the subject set of a professor.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SetProfessorSubjectsDto {
    pub subject_ids: Vec<Uuid>,
}
