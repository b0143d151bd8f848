use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::about;

pub fn init_pages_router() -> Router<AppState> {
    Router::new().route("/about", get(about))
}
