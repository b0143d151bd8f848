//! Courses: a (year, division, shift) triple, unique among alive courses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::choice_enum;

choice_enum! {
    pub enum Year ("course year") {
        First => "FIR", "Primer Año";
        Second => "SEC", "Segundo Año";
        Third => "THI", "Tercer Año";
        Fourth => "FOU", "Cuarto Año";
        Fifth => "FIF", "Quinto Año";
        Sixth => "SIX", "Sexto Año";
        Seventh => "NIN", "Septimo Año";
    }
}

choice_enum! {
    pub enum Division ("course division") {
        A => "A", "Division A";
        B => "B", "Division B";
        C => "C", "Division C";
        D => "D", "Division D";
        E => "E", "Division E";
    }
}

choice_enum! {
    pub enum Shift ("course shift") {
        Morning => "MS", "Turno mañana";
        Evening => "ES", "Turno tarde";
        Night => "NS", "Turno noche";
    }
}

impl Default for Year {
    fn default() -> Self {
        Self::First
    }
}

impl Default for Division {
    fn default() -> Self {
        Self::A
    }
}

impl Default for Shift {
    fn default() -> Self {
        Self::Morning
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub year: Year,
    pub division: Division,
    pub shift: Shift,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

aula_db::impl_soft_deletable!(
    Course,
    table = "courses",
    entity = "Course",
    columns = "id, year, division, shift, created_at, updated_at, deleted_at"
);

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.year, self.division, self.shift)
    }
}

/// Omitted fields take the defaults FIR / A / MS.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[serde(default)]
    pub year: Year,
    #[serde(default)]
    pub division: Division,
    #[serde(default)]
    pub shift: Shift,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    pub year: Option<Year>,
    pub division: Option<Division>,
    pub shift: Option<Shift>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_course_defaults() {
        let dto: CreateCourseDto = serde_json::from_str("{}").unwrap();
        assert_eq!(dto.year, Year::First);
        assert_eq!(dto.division, Division::A);
        assert_eq!(dto.shift, Shift::Morning);
    }

    #[test]
    fn test_create_course_rejects_unknown_codes() {
        assert!(serde_json::from_str::<CreateCourseDto>(r#"{"year":"EIG"}"#).is_err());
        assert!(serde_json::from_str::<CreateCourseDto>(r#"{"division":"F"}"#).is_err());
        assert!(serde_json::from_str::<CreateCourseDto>(r#"{"shift":"AS"}"#).is_err());
    }

    #[test]
    fn test_year_codes() {
        let codes: Vec<&str> = Year::ALL.iter().map(Year::code).collect();
        assert_eq!(codes, ["FIR", "SEC", "THI", "FOU", "FIF", "SIX", "NIN"]);
        assert_eq!(Year::Seventh.label(), "Septimo Año");
    }

    #[test]
    fn test_course_display() {
        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4(),
            year: Year::Third,
            division: Division::B,
            shift: Shift::Night,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        assert_eq!(course.to_string(), "THI B NS");
    }
}
