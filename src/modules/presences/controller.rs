use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_models::{CreatePresenceDto, Presence, UpdatePresenceDto};

use super::service::PresenceService;
use crate::middleware::auth::RequireStaff;
use crate::modules::admin::soft_delete_handlers;
use crate::state::AppState;
use crate::validator::ValidatedJson;

soft_delete_handlers!(
    Presence,
    tag = "Presences",
    list = "/api/presences",
    item = "/api/presences/{id}",
    restore = "/api/presences/{id}/restore"
);

#[utoipa::path(
    post,
    path = "/api/presences",
    request_body = CreatePresenceDto,
    responses(
        (status = 201, description = "Presence recorded", body = Presence),
        (status = 403, description = "Staff access required"),
        (status = 409, description = "Student or preceptor already has a presence record")
    ),
    tag = "Presences",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_presence(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreatePresenceDto>,
) -> Result<(StatusCode, Json<Presence>), AppError> {
    let presence = PresenceService::create_presence(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(presence)))
}

#[utoipa::path(
    put,
    path = "/api/presences/{id}",
    params(("id" = Uuid, Path, description = "Presence ID")),
    request_body = UpdatePresenceDto,
    responses(
        (status = 200, description = "Presence updated", body = Presence),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Presence not found"),
        (status = 409, description = "Student or preceptor already has a presence record")
    ),
    tag = "Presences",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_presence(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePresenceDto>,
) -> Result<Json<Presence>, AppError> {
    let presence = PresenceService::update_presence(&state.db, id, dto).await?;
    Ok(Json(presence))
}
