use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_models::{CreateStaffMemberDto, Principal, UpdateStaffMemberDto};

use super::service::StaffService;
use crate::middleware::auth::RequireStaff;
use crate::modules::admin::soft_delete_handlers;
use crate::state::AppState;
use crate::validator::ValidatedJson;

soft_delete_handlers!(
    Principal,
    tag = "Principals",
    list = "/api/principals",
    item = "/api/principals/{id}",
    restore = "/api/principals/{id}/restore"
);

/// Create a principal together with their staff user.
#[utoipa::path(
    post,
    path = "/api/principals",
    request_body = CreateStaffMemberDto,
    responses(
        (status = 201, description = "Principal created", body = Principal),
        (status = 403, description = "Staff access required"),
        (status = 409, description = "Email already in use"),
        (status = 422, description = "Validation error")
    ),
    tag = "Principals",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto), fields(email = %dto.email))]
pub async fn create_principal(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateStaffMemberDto>,
) -> Result<(StatusCode, Json<Principal>), AppError> {
    let principal = StaffService::create_member::<Principal>(&state.db, &dto).await?;
    Ok((StatusCode::CREATED, Json(principal)))
}

#[utoipa::path(
    put,
    path = "/api/principals/{id}",
    params(("id" = Uuid, Path, description = "Principal ID")),
    request_body = UpdateStaffMemberDto,
    responses(
        (status = 200, description = "Principal updated", body = Principal),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Principal not found")
    ),
    tag = "Principals",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_principal(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStaffMemberDto>,
) -> Result<Json<Principal>, AppError> {
    let principal = StaffService::update_member::<Principal>(&state.db, id, dto).await?;
    Ok(Json(principal))
}
