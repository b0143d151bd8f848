//! Grades given by professors. Values are the codes "1" through "10".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use aula_core::serde::deserialize_nullable;

use crate::choice_enum;

choice_enum! {
    pub enum GradeValue ("grade") {
        One => "1", "1";
        Two => "2", "2";
        Three => "3", "3";
        Four => "4", "4";
        Five => "5", "5";
        Six => "6", "6";
        Seven => "7", "7";
        Eight => "8", "8";
        Nine => "9", "9";
        Ten => "10", "10";
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Grade {
    pub id: Uuid,
    pub professor_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub grade: GradeValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

aula_db::impl_soft_deletable!(
    Grade,
    table = "grades",
    entity = "Grade",
    columns = "id, professor_id, student_id, subject_id, grade, created_at, updated_at, deleted_at"
);

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateGradeDto {
    pub professor_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub grade: GradeValue,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateGradeDto {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub professor_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub student_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub subject_id: Option<Option<Uuid>>,
    pub grade: Option<GradeValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_parses() {
        for n in 1..=10 {
            let value: GradeValue = n.to_string().parse().unwrap();
            assert_eq!(value.code(), n.to_string());
        }
    }

    #[test]
    fn test_out_of_range_codes_are_rejected() {
        for code in ["0", "11", "", "7.5", "siete"] {
            assert!(code.parse::<GradeValue>().is_err(), "{code} should fail");
        }
    }

    #[test]
    fn test_create_grade_dto_rejects_bad_grade() {
        let json = r#"{"grade":"11"}"#;
        let err = serde_json::from_str::<CreateGradeDto>(json).unwrap_err();
        assert!(err.to_string().contains("not a valid grade"));

        let dto: CreateGradeDto = serde_json::from_str(r#"{"grade":"7"}"#).unwrap();
        assert_eq!(dto.grade, GradeValue::Seven);
    }
}
