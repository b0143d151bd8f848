//! Seed rows and the configuration controlling how many are generated.

use aula_models::{Division, Shift, Year};
use chrono::NaiveDate;

/// Domain of every generated email, used to find seeded users again.
pub const SEED_EMAIL_DOMAIN: &str = "seed.aula.example";

pub struct StudentSeed {
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub phone: String,
}

pub struct CourseSeed {
    pub year: Year,
    pub division: Division,
    pub shift: Shift,
}

pub struct CategorySeed {
    pub name: String,
    pub description: String,
}

pub struct StaffSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Number of staff members per role.
#[derive(Clone)]
pub struct StaffCounts {
    pub principals: usize,
    pub preceptors: usize,
    pub professors: usize,
}

impl Default for StaffCounts {
    fn default() -> Self {
        Self {
            principals: 1,
            preceptors: 4,
            professors: 12,
        }
    }
}

#[derive(Clone)]
pub struct SeedConfig {
    pub students: usize,
    /// Capped at the number of distinct year/division/shift triples
    pub courses: usize,
    pub subjects: usize,
    pub categories: usize,
    pub staff: StaffCounts,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            students: 200,
            courses: 10,
            subjects: 12,
            categories: 5,
            staff: StaffCounts::default(),
        }
    }
}

impl SeedConfig {
    pub fn new(students: usize) -> Self {
        Self {
            students,
            ..Default::default()
        }
    }

    pub fn with_courses(mut self, courses: usize) -> Self {
        self.courses = courses;
        self
    }

    pub fn with_subjects(mut self, subjects: usize) -> Self {
        self.subjects = subjects;
        self
    }

    pub fn with_categories(mut self, categories: usize) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_staff(mut self, staff: StaffCounts) -> Self {
        self.staff = staff;
        self
    }

    pub fn total_staff(&self) -> usize {
        self.staff.principals + self.staff.preceptors + self.staff.professors
    }
}
