use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_models::{
    CreateProfessorDto, Professor, ProfessorWithSubjects, SetProfessorSubjectsDto, Subject,
    UpdateStaffMemberDto,
};

use super::service::StaffService;
use crate::middleware::auth::RequireStaff;
use crate::modules::admin::soft_delete_handlers;
use crate::state::AppState;
use crate::validator::ValidatedJson;

soft_delete_handlers!(
    Professor,
    tag = "Professors",
    list = "/api/professors",
    item = "/api/professors/{id}",
    restore = "/api/professors/{id}/restore"
);

/// Create a professor with their staff user and the subjects they teach.
#[utoipa::path(
    post,
    path = "/api/professors",
    request_body = CreateProfessorDto,
    responses(
        (status = 201, description = "Professor created", body = ProfessorWithSubjects),
        (status = 403, description = "Staff access required"),
        (status = 409, description = "Email already in use or unknown subject"),
        (status = 422, description = "Validation error")
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto), fields(email = %dto.member.email))]
pub async fn create_professor(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateProfessorDto>,
) -> Result<(StatusCode, Json<ProfessorWithSubjects>), AppError> {
    let professor = StaffService::create_professor(&state.db, &dto).await?;
    Ok((StatusCode::CREATED, Json(professor)))
}

#[utoipa::path(
    put,
    path = "/api/professors/{id}",
    params(("id" = Uuid, Path, description = "Professor ID")),
    request_body = UpdateStaffMemberDto,
    responses(
        (status = 200, description = "Professor updated", body = Professor),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Professor not found")
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_professor(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStaffMemberDto>,
) -> Result<Json<Professor>, AppError> {
    let professor = StaffService::update_member::<Professor>(&state.db, id, dto).await?;
    Ok(Json(professor))
}

#[utoipa::path(
    get,
    path = "/api/professors/{id}/subjects",
    params(("id" = Uuid, Path, description = "Professor ID")),
    responses(
        (status = 200, description = "Subjects taught", body = Vec<Subject>),
        (status = 404, description = "Professor not found")
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_professor_subjects(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Subject>>, AppError> {
    Ok(Json(StaffService::get_subjects(&state.db, id).await?))
}

/// Replace the subjects a professor teaches.
#[utoipa::path(
    put,
    path = "/api/professors/{id}/subjects",
    params(("id" = Uuid, Path, description = "Professor ID")),
    request_body = SetProfessorSubjectsDto,
    responses(
        (status = 200, description = "Subjects replaced", body = ProfessorWithSubjects),
        (status = 404, description = "Professor not found"),
        (status = 409, description = "Unknown subject")
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn set_professor_subjects(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<SetProfessorSubjectsDto>,
) -> Result<Json<ProfessorWithSubjects>, AppError> {
    Ok(Json(StaffService::set_subjects(&state.db, id, dto).await?))
}
