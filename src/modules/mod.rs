pub mod academic_histories;
pub mod admin;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod course_histories;
pub mod courses;
pub mod grades;
pub mod pages;
pub mod phones;
pub mod presences;
pub mod staff;
pub mod students;
pub mod subjects;
pub mod users;
