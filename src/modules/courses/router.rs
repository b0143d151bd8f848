use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_course, delete_record, get_record, list_records, restore_record, update_course,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_course))
        .route(
            "/{id}",
            get(get_record).put(update_course).delete(delete_record),
        )
        .route("/{id}/restore", post(restore_record))
}
