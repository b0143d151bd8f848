use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_models::{
    Category, Comment, CommentForm, CommentWithCategories, CreateCommentDto, UpdateCommentDto,
};

use super::service::CommentService;
use crate::metrics::track_comment_submitted;
use crate::middleware::auth::RequireStaff;
use crate::modules::admin::soft_delete_handlers;
use crate::state::AppState;
use crate::validator::{ValidatedForm, ValidatedJson};

soft_delete_handlers!(
    Comment,
    tag = "Comments",
    list = "/api/comments",
    item = "/api/comments/{id}",
    restore = "/api/comments/{id}/restore"
);

/// Create a comment about a student. The author defaults to the caller.
#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = CommentWithCategories),
        (status = 403, description = "Staff access required"),
        (status = 409, description = "Student, author or category does not exist"),
        (status = 422, description = "Validation error")
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_comment(
    State(state): State<AppState>,
    RequireStaff(auth_user): RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<CommentWithCategories>), AppError> {
    let comment = CommentService::create_comment(&state.db, dto, auth_user.user_id()?).await?;
    track_comment_submitted("json");
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Form submission of a comment. Redirects to the student's comment list.
#[utoipa::path(
    post,
    path = "/api/comments/form",
    request_body(content = CommentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Comment created, redirect to the student's comments"),
        (status = 403, description = "Staff access required"),
        (status = 422, description = "Validation error")
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn submit_comment_form(
    State(state): State<AppState>,
    RequireStaff(auth_user): RequireStaff,
    ValidatedForm(form): ValidatedForm<CommentForm>,
) -> Result<Redirect, AppError> {
    let author_id = auth_user.user_id()?;
    let student_id = form.student_id;
    CommentService::create_comment(&state.db, form.into_create_dto(author_id), author_id).await?;
    track_comment_submitted("form");
    Ok(Redirect::to(&format!("/api/students/{}/comments", student_id)))
}

#[utoipa::path(
    put,
    path = "/api/comments/{id}",
    params(("id" = Uuid, Path, description = "Comment ID")),
    request_body = UpdateCommentDto,
    responses(
        (status = 200, description = "Comment updated", body = CommentWithCategories),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Comment not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_comment(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCommentDto>,
) -> Result<Json<CommentWithCategories>, AppError> {
    let comment = CommentService::update_comment(&state.db, id, dto).await?;
    Ok(Json(comment))
}

#[utoipa::path(
    get,
    path = "/api/comments/{id}/categories",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Categories of the comment", body = Vec<Category>),
        (status = 404, description = "Comment not found")
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_comment_categories(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(CommentService::get_categories(&state.db, id).await?))
}
