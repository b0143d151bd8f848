use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_comment, delete_record, get_comment_categories, get_record, list_records,
    restore_record, submit_comment_form, update_comment,
};

pub fn init_comments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_comment))
        .route("/form", post(submit_comment_form))
        .route(
            "/{id}",
            get(get_record).put(update_comment).delete(delete_record),
        )
        .route("/{id}/restore", post(restore_record))
        .route("/{id}/categories", get(get_comment_categories))
}
