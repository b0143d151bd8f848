//! Course and academic histories.
//!
//! Both keep their row when the referenced course or subject is removed;
//! the reference becomes null instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use aula_core::serde::deserialize_nullable;

/// A course a student attended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseHistory {
    pub id: Uuid,
    pub course_id: Option<Uuid>,
    pub student_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

aula_db::impl_soft_deletable!(
    CourseHistory,
    table = "course_histories",
    entity = "Course history",
    columns = "id, course_id, student_id, created_at, updated_at, deleted_at"
);

/// A subject taught to a course in a given cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AcademicHistory {
    pub id: Uuid,
    pub course_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub cycle: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

aula_db::impl_soft_deletable!(
    AcademicHistory,
    table = "academic_histories",
    entity = "Academic history",
    columns = "id, course_id, subject_id, cycle, created_at, updated_at, deleted_at"
);

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseHistoryDto {
    pub course_id: Option<Uuid>,
    pub student_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseHistoryDto {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub course_id: Option<Option<Uuid>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAcademicHistoryDto {
    pub course_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    #[schema(example = 2024)]
    pub cycle: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAcademicHistoryDto {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub course_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub subject_id: Option<Option<Uuid>>,
    pub cycle: Option<i32>,
}
