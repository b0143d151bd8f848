//! Students and the validation of their personal data.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

aula_db::impl_soft_deletable!(
    Student,
    table = "students",
    entity = "Student",
    columns = "id, first_name, last_name, birthday, created_at, updated_at, deleted_at"
);

impl std::fmt::Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 50, message = "First name must be 1 to 50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be 1 to 50 characters"))]
    pub last_name: String,
    #[schema(example = "2010-03-14")]
    pub birthday: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 50, message = "First name must be 1 to 50 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Last name must be 1 to 50 characters"))]
    pub last_name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_student_name_bounds() {
        let dto = CreateStudentDto {
            first_name: String::new(),
            last_name: "x".repeat(51),
            birthday: NaiveDate::from_ymd_opt(2010, 3, 14).unwrap(),
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
        assert!(errors.field_errors().contains_key("last_name"));
    }

    #[test]
    fn test_birthday_is_required() {
        let json = r#"{"first_name":"Ana","last_name":"Paz"}"#;
        assert!(serde_json::from_str::<CreateStudentDto>(json).is_err());
    }
}
