use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::academic_histories::init_academic_histories_router;
use crate::modules::auth::init_auth_router;
use crate::modules::categories::init_categories_router;
use crate::modules::comments::init_comments_router;
use crate::modules::course_histories::init_course_histories_router;
use crate::modules::courses::init_courses_router;
use crate::modules::grades::init_grades_router;
use crate::modules::pages::init_pages_router;
use crate::modules::phones::init_phones_router;
use crate::modules::presences::init_presences_router;
use crate::modules::staff::{
    init_preceptors_router, init_principals_router, init_professors_router,
};
use crate::modules::students::init_students_router;
use crate::modules::subjects::init_subjects_router;
use crate::modules::users::init_users_router;
use crate::state::AppState;

/// Authorization lives in the extractors of each handler, so the API tree
/// carries no route layers of its own.
fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", init_auth_router())
        .nest("/users", init_users_router())
        .nest("/courses", init_courses_router())
        .nest("/subjects", init_subjects_router())
        .nest("/students", init_students_router())
        .nest("/categories", init_categories_router())
        .nest("/comments", init_comments_router())
        .nest("/phones", init_phones_router())
        .nest("/course-histories", init_course_histories_router())
        .nest("/academic-histories", init_academic_histories_router())
        .nest("/grades", init_grades_router())
        .nest("/presences", init_presences_router())
        .nest("/principals", init_principals_router())
        .nest("/preceptors", init_preceptors_router())
        .nest("/professors", init_professors_router())
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_pages_router())
        .nest("/api", api_router())
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
