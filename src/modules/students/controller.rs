use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_models::{
    Comment, CourseHistory, CreateStudentDto, Grade, Phone, Student, UpdateStudentDto,
};

use super::service::StudentService;
use crate::middleware::auth::RequireStaff;
use crate::modules::admin::soft_delete_handlers;
use crate::state::AppState;
use crate::validator::ValidatedJson;

soft_delete_handlers!(
    Student,
    tag = "Students",
    list = "/api/students",
    item = "/api/students/{id}",
    restore = "/api/students/{id}/restore"
);

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Malformed body or missing birthday"),
        (status = 403, description = "Staff access required"),
        (status = 422, description = "Validation error")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_student(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = StudentService::create_student(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Student not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_student(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(&state.db, id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/phones",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Phones of the student", body = Vec<Phone>),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_phones(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Phone>>, AppError> {
    Ok(Json(StudentService::get_phones(&state.db, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/comments",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Comments about the student", body = Vec<Comment>),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_comments(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(StudentService::get_comments(&state.db, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/course-histories",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Courses the student attended", body = Vec<CourseHistory>),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_course_histories(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CourseHistory>>, AppError> {
    Ok(Json(
        StudentService::get_course_histories(&state.db, id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/grades",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Grades of the student", body = Vec<Grade>),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_grades(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Grade>>, AppError> {
    Ok(Json(StudentService::get_grades(&state.db, id).await?))
}
