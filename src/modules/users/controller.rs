use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use aula_core::AppError;
use aula_models::{ChangePasswordDto, CreateUserDto, Paginated, User, UserFilterParams};

use crate::middleware::auth::{AuthUser, RequireStaff, RequireSuperuser};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a regular user (flag overrides allowed)
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser access required"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto), fields(email = %dto.email))]
pub async fn create_user(
    State(state): State<AppState>,
    _superuser: RequireSuperuser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user =
        UserService::create_user(&state.db, &dto.email, &dto.password, dto.extra_fields()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Create a staff user
#[utoipa::path(
    post,
    path = "/api/users/staff",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Staff user created", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser access required"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error or conflicting flags")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto), fields(email = %dto.email))]
pub async fn create_staff_user(
    State(state): State<AppState>,
    _superuser: RequireSuperuser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user =
        UserService::create_staff_user(&state.db, &dto.email, &dto.password, dto.extra_fields())
            .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(UserFilterParams),
    responses(
        (status = 200, description = "Users ordered by email", body = Paginated<User>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff access required")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Query(filters): Query<UserFilterParams>,
) -> Result<Json<Paginated<User>>, AppError> {
    let users = UserService::list_users(&state.db, filters).await?;
    Ok(Json(users))
}

/// Current user
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Authenticated user", body = User),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_user(&state.db, auth_user.user_id()?).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/api/users/me/password",
    request_body = ChangePasswordDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Current password is incorrect"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation error")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<StatusCode, AppError> {
    UserService::change_password(&state.db, auth_user.user_id()?, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}
