use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_student, delete_record, get_record, get_student_comments,
    get_student_course_histories, get_student_grades, get_student_phones, list_records,
    restore_record, update_student,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_student))
        .route(
            "/{id}",
            get(get_record).put(update_student).delete(delete_record),
        )
        .route("/{id}/restore", post(restore_record))
        .route("/{id}/phones", get(get_student_phones))
        .route("/{id}/comments", get(get_student_comments))
        .route("/{id}/course-histories", get(get_student_course_histories))
        .route("/{id}/grades", get(get_student_grades))
}
