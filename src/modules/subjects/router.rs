use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_subject, delete_record, get_record, list_records, restore_record, update_subject,
};

pub fn init_subjects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_subject))
        .route(
            "/{id}",
            get(get_record).put(update_subject).delete(delete_record),
        )
        .route("/{id}/restore", post(restore_record))
}
