use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_models::{CreatePhoneDto, Phone, UpdatePhoneDto};

use super::service::PhoneService;
use crate::middleware::auth::RequireStaff;
use crate::modules::admin::soft_delete_handlers;
use crate::state::AppState;
use crate::validator::ValidatedJson;

soft_delete_handlers!(
    Phone,
    tag = "Phones",
    list = "/api/phones",
    item = "/api/phones/{id}",
    restore = "/api/phones/{id}/restore"
);

#[utoipa::path(
    post,
    path = "/api/phones",
    request_body = CreatePhoneDto,
    responses(
        (status = 201, description = "Phone created", body = Phone),
        (status = 403, description = "Staff access required"),
        (status = 409, description = "Student does not exist"),
        (status = 422, description = "Validation error")
    ),
    tag = "Phones",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_phone(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreatePhoneDto>,
) -> Result<(StatusCode, Json<Phone>), AppError> {
    let phone = PhoneService::create_phone(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(phone)))
}

#[utoipa::path(
    put,
    path = "/api/phones/{id}",
    params(("id" = Uuid, Path, description = "Phone ID")),
    request_body = UpdatePhoneDto,
    responses(
        (status = 200, description = "Phone updated", body = Phone),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Phone not found")
    ),
    tag = "Phones",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_phone(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePhoneDto>,
) -> Result<Json<Phone>, AppError> {
    let phone = PhoneService::update_phone(&state.db, id, dto).await?;
    Ok(Json(phone))
}
