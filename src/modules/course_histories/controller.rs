use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_models::{CourseHistory, CreateCourseHistoryDto, UpdateCourseHistoryDto};

use super::service::CourseHistoryService;
use crate::middleware::auth::RequireStaff;
use crate::modules::admin::soft_delete_handlers;
use crate::state::AppState;
use crate::validator::ValidatedJson;

soft_delete_handlers!(
    CourseHistory,
    tag = "Course histories",
    list = "/api/course-histories",
    item = "/api/course-histories/{id}",
    restore = "/api/course-histories/{id}/restore"
);

/// Record that a student attended a course.
#[utoipa::path(
    post,
    path = "/api/course-histories",
    request_body = CreateCourseHistoryDto,
    responses(
        (status = 201, description = "Entry created", body = CourseHistory),
        (status = 403, description = "Staff access required"),
        (status = 409, description = "Course or student does not exist")
    ),
    tag = "Course histories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_course_history(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateCourseHistoryDto>,
) -> Result<(StatusCode, Json<CourseHistory>), AppError> {
    let entry = CourseHistoryService::create_course_history(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    put,
    path = "/api/course-histories/{id}",
    params(("id" = Uuid, Path, description = "Course history ID")),
    request_body = UpdateCourseHistoryDto,
    responses(
        (status = 200, description = "Entry updated", body = CourseHistory),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Course history not found")
    ),
    tag = "Course histories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_course_history(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseHistoryDto>,
) -> Result<Json<CourseHistory>, AppError> {
    let entry = CourseHistoryService::update_course_history(&state.db, id, dto).await?;
    Ok(Json(entry))
}
