use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_models::{AcademicHistory, CreateAcademicHistoryDto, UpdateAcademicHistoryDto};

use super::service::AcademicHistoryService;
use crate::middleware::auth::RequireStaff;
use crate::modules::admin::soft_delete_handlers;
use crate::state::AppState;
use crate::validator::ValidatedJson;

soft_delete_handlers!(
    AcademicHistory,
    tag = "Academic histories",
    list = "/api/academic-histories",
    item = "/api/academic-histories/{id}",
    restore = "/api/academic-histories/{id}/restore"
);

/// Record which subject a course taught in a given cycle.
#[utoipa::path(
    post,
    path = "/api/academic-histories",
    request_body = CreateAcademicHistoryDto,
    responses(
        (status = 201, description = "Entry created", body = AcademicHistory),
        (status = 403, description = "Staff access required"),
        (status = 409, description = "Course or subject does not exist"),
        (status = 422, description = "Validation error")
    ),
    tag = "Academic histories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_academic_history(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateAcademicHistoryDto>,
) -> Result<(StatusCode, Json<AcademicHistory>), AppError> {
    let entry = AcademicHistoryService::create_academic_history(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    put,
    path = "/api/academic-histories/{id}",
    params(("id" = Uuid, Path, description = "Academic history ID")),
    request_body = UpdateAcademicHistoryDto,
    responses(
        (status = 200, description = "Entry updated", body = AcademicHistory),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Academic history not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Academic histories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_academic_history(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAcademicHistoryDto>,
) -> Result<Json<AcademicHistory>, AppError> {
    let entry = AcademicHistoryService::update_academic_history(&state.db, id, dto).await?;
    Ok(Json(entry))
}
