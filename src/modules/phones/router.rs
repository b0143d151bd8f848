use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_phone, delete_record, get_record, list_records, restore_record, update_phone,
};

pub fn init_phones_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_phone))
        .route(
            "/{id}",
            get(get_record).put(update_phone).delete(delete_record),
        )
        .route("/{id}/restore", post(restore_record))
}
