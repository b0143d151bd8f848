use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_models::{Course, CreateCourseDto, UpdateCourseDto};

use super::service::CourseService;
use crate::middleware::auth::RequireStaff;
use crate::modules::admin::soft_delete_handlers;
use crate::state::AppState;
use crate::validator::ValidatedJson;

soft_delete_handlers!(
    Course,
    tag = "Courses",
    list = "/api/courses",
    item = "/api/courses/{id}",
    restore = "/api/courses/{id}/restore"
);

/// Create a course. Omitted fields default to FIR / A / MS.
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 403, description = "Staff access required"),
        (status = 409, description = "An alive course with the same triple exists"),
        (status = 422, description = "Unknown year, division or shift")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_course(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "An alive course with the same triple exists")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_course(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::update_course(&state.db, id, dto).await?;
    Ok(Json(course))
}
