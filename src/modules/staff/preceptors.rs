use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_models::{CreateStaffMemberDto, Preceptor, UpdateStaffMemberDto};

use super::service::StaffService;
use crate::middleware::auth::RequireStaff;
use crate::modules::admin::soft_delete_handlers;
use crate::state::AppState;
use crate::validator::ValidatedJson;

soft_delete_handlers!(
    Preceptor,
    tag = "Preceptors",
    list = "/api/preceptors",
    item = "/api/preceptors/{id}",
    restore = "/api/preceptors/{id}/restore"
);

/// Create a preceptor together with their staff user.
#[utoipa::path(
    post,
    path = "/api/preceptors",
    request_body = CreateStaffMemberDto,
    responses(
        (status = 201, description = "Preceptor created", body = Preceptor),
        (status = 403, description = "Staff access required"),
        (status = 409, description = "Email already in use"),
        (status = 422, description = "Validation error")
    ),
    tag = "Preceptors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto), fields(email = %dto.email))]
pub async fn create_preceptor(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateStaffMemberDto>,
) -> Result<(StatusCode, Json<Preceptor>), AppError> {
    let preceptor = StaffService::create_member::<Preceptor>(&state.db, &dto).await?;
    Ok((StatusCode::CREATED, Json(preceptor)))
}

#[utoipa::path(
    put,
    path = "/api/preceptors/{id}",
    params(("id" = Uuid, Path, description = "Preceptor ID")),
    request_body = UpdateStaffMemberDto,
    responses(
        (status = 200, description = "Preceptor updated", body = Preceptor),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Preceptor not found")
    ),
    tag = "Preceptors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_preceptor(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStaffMemberDto>,
) -> Result<Json<Preceptor>, AppError> {
    let preceptor = StaffService::update_member::<Preceptor>(&state.db, id, dto).await?;
    Ok(Json(preceptor))
}
