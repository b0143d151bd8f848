use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_category, delete_record, get_record, list_records, restore_record, update_category,
};

pub fn init_categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_category))
        .route(
            "/{id}",
            get(get_record).put(update_category).delete(delete_record),
        )
        .route("/{id}/restore", post(restore_record))
}
