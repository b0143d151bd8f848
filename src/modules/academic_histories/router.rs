use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_academic_history, delete_record, get_record, list_records, restore_record,
    update_academic_history,
};

pub fn init_academic_histories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_academic_history))
        .route(
            "/{id}",
            get(get_record)
                .put(update_academic_history)
                .delete(delete_record),
        )
        .route("/{id}/restore", post(restore_record))
}
