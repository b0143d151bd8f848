use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_models::{CreateGradeDto, Grade, UpdateGradeDto};

use super::service::GradeService;
use crate::middleware::auth::RequireStaff;
use crate::modules::admin::soft_delete_handlers;
use crate::state::AppState;
use crate::validator::ValidatedJson;

soft_delete_handlers!(
    Grade,
    tag = "Grades",
    list = "/api/grades",
    item = "/api/grades/{id}",
    restore = "/api/grades/{id}/restore"
);

/// Record a grade. The value is one of the codes "1" to "10".
#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = CreateGradeDto,
    responses(
        (status = 201, description = "Grade recorded", body = Grade),
        (status = 403, description = "Staff access required"),
        (status = 409, description = "Professor, student or subject does not exist"),
        (status = 422, description = "Grade outside 1..10")
    ),
    tag = "Grades",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_grade(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateGradeDto>,
) -> Result<(StatusCode, Json<Grade>), AppError> {
    let grade = GradeService::create_grade(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(grade)))
}

#[utoipa::path(
    put,
    path = "/api/grades/{id}",
    params(("id" = Uuid, Path, description = "Grade ID")),
    request_body = UpdateGradeDto,
    responses(
        (status = 200, description = "Grade updated", body = Grade),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Grade not found"),
        (status = 422, description = "Grade outside 1..10")
    ),
    tag = "Grades",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_grade(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateGradeDto>,
) -> Result<Json<Grade>, AppError> {
    let grade = GradeService::update_grade(&state.db, id, dto).await?;
    Ok(Json(grade))
}
