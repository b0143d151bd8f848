use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_grade, delete_record, get_record, list_records, restore_record, update_grade,
};

pub fn init_grades_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_grade))
        .route(
            "/{id}",
            get(get_record).put(update_grade).delete(delete_record),
        )
        .route("/{id}/restore", post(restore_record))
}
