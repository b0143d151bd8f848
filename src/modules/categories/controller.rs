use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_models::{Category, CreateCategoryDto, UpdateCategoryDto};

use super::service::CategoryService;
use crate::middleware::auth::RequireStaff;
use crate::modules::admin::soft_delete_handlers;
use crate::state::AppState;
use crate::validator::ValidatedJson;

soft_delete_handlers!(
    Category,
    tag = "Categories",
    list = "/api/categories",
    item = "/api/categories/{id}",
    restore = "/api/categories/{id}/restore"
);

/// Create a comment category.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 403, description = "Staff access required"),
        (status = 422, description = "Validation error")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = CategoryService::create_category(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Category not found")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_category(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCategoryDto>,
) -> Result<Json<Category>, AppError> {
    let category = CategoryService::update_category(&state.db, id, dto).await?;
    Ok(Json(category))
}
