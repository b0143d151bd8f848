use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::{preceptors, principals, professors};

pub fn init_principals_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(principals::list_records).post(principals::create_principal),
        )
        .route(
            "/{id}",
            get(principals::get_record)
                .put(principals::update_principal)
                .delete(principals::delete_record),
        )
        .route("/{id}/restore", post(principals::restore_record))
}

pub fn init_preceptors_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(preceptors::list_records).post(preceptors::create_preceptor),
        )
        .route(
            "/{id}",
            get(preceptors::get_record)
                .put(preceptors::update_preceptor)
                .delete(preceptors::delete_record),
        )
        .route("/{id}/restore", post(preceptors::restore_record))
}

pub fn init_professors_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(professors::list_records).post(professors::create_professor),
        )
        .route(
            "/{id}",
            get(professors::get_record)
                .put(professors::update_professor)
                .delete(professors::delete_record),
        )
        .route("/{id}/restore", post(professors::restore_record))
        .route(
            "/{id}/subjects",
            get(professors::get_professor_subjects).put(professors::set_professor_subjects),
        )
}
