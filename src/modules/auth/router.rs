use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{login_user, refresh_token};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/refresh", post(refresh_token))
}
