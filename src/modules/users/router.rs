use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{change_password, create_staff_user, create_user, get_me, get_users};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users).post(create_user))
        .route("/staff", post(create_staff_user))
        .route("/me", get(get_me))
        .route("/me/password", put(change_password))
}
