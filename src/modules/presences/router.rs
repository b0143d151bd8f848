use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_presence, delete_record, get_record, list_records, restore_record, update_presence,
};

pub fn init_presences_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_presence))
        .route(
            "/{id}",
            get(get_record).put(update_presence).delete(delete_record),
        )
        .route("/{id}/restore", post(restore_record))
}
