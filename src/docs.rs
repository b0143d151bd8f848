use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use aula_core::{PaginationMeta, PaginationParams};
use aula_db::Liveness;
use aula_models::{
    AcademicHistory, Category, ChangePasswordDto, Comment, CommentForm, CommentWithCategories,
    Course, CourseHistory, CreateAcademicHistoryDto, CreateCategoryDto, CreateCommentDto,
    CreateCourseDto, CreateCourseHistoryDto, CreateGradeDto, CreatePhoneDto, CreatePresenceDto,
    CreateProfessorDto, CreateStaffMemberDto, CreateStudentDto, CreateSubjectDto, CreateUserDto,
    Division, Grade, GradeValue, LoginRequest, LoginResponse, Phone, Preceptor, Presence,
    Principal, Professor, ProfessorWithSubjects, RefreshTokenRequest, SetProfessorSubjectsDto,
    Shift, Student, Subject, TokenResponse, UpdateAcademicHistoryDto, UpdateCategoryDto,
    UpdateCommentDto, UpdateCourseDto, UpdateCourseHistoryDto, UpdateGradeDto, UpdatePhoneDto,
    UpdatePresenceDto, UpdateStaffMemberDto, UpdateStudentDto, UpdateSubjectDto, User, Year,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_token,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::create_staff_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::change_password,
        crate::modules::pages::controller::about,
        crate::modules::courses::controller::list_records,
        crate::modules::courses::controller::get_record,
        crate::modules::courses::controller::delete_record,
        crate::modules::courses::controller::restore_record,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::subjects::controller::list_records,
        crate::modules::subjects::controller::get_record,
        crate::modules::subjects::controller::delete_record,
        crate::modules::subjects::controller::restore_record,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::students::controller::list_records,
        crate::modules::students::controller::get_record,
        crate::modules::students::controller::delete_record,
        crate::modules::students::controller::restore_record,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::get_student_phones,
        crate::modules::students::controller::get_student_comments,
        crate::modules::students::controller::get_student_course_histories,
        crate::modules::students::controller::get_student_grades,
        crate::modules::categories::controller::list_records,
        crate::modules::categories::controller::get_record,
        crate::modules::categories::controller::delete_record,
        crate::modules::categories::controller::restore_record,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::update_category,
        crate::modules::comments::controller::list_records,
        crate::modules::comments::controller::get_record,
        crate::modules::comments::controller::delete_record,
        crate::modules::comments::controller::restore_record,
        crate::modules::comments::controller::create_comment,
        crate::modules::comments::controller::submit_comment_form,
        crate::modules::comments::controller::update_comment,
        crate::modules::comments::controller::get_comment_categories,
        crate::modules::phones::controller::list_records,
        crate::modules::phones::controller::get_record,
        crate::modules::phones::controller::delete_record,
        crate::modules::phones::controller::restore_record,
        crate::modules::phones::controller::create_phone,
        crate::modules::phones::controller::update_phone,
        crate::modules::course_histories::controller::list_records,
        crate::modules::course_histories::controller::get_record,
        crate::modules::course_histories::controller::delete_record,
        crate::modules::course_histories::controller::restore_record,
        crate::modules::course_histories::controller::create_course_history,
        crate::modules::course_histories::controller::update_course_history,
        crate::modules::academic_histories::controller::list_records,
        crate::modules::academic_histories::controller::get_record,
        crate::modules::academic_histories::controller::delete_record,
        crate::modules::academic_histories::controller::restore_record,
        crate::modules::academic_histories::controller::create_academic_history,
        crate::modules::academic_histories::controller::update_academic_history,
        crate::modules::grades::controller::list_records,
        crate::modules::grades::controller::get_record,
        crate::modules::grades::controller::delete_record,
        crate::modules::grades::controller::restore_record,
        crate::modules::grades::controller::create_grade,
        crate::modules::grades::controller::update_grade,
        crate::modules::presences::controller::list_records,
        crate::modules::presences::controller::get_record,
        crate::modules::presences::controller::delete_record,
        crate::modules::presences::controller::restore_record,
        crate::modules::presences::controller::create_presence,
        crate::modules::presences::controller::update_presence,
        crate::modules::staff::principals::list_records,
        crate::modules::staff::principals::get_record,
        crate::modules::staff::principals::delete_record,
        crate::modules::staff::principals::restore_record,
        crate::modules::staff::principals::create_principal,
        crate::modules::staff::principals::update_principal,
        crate::modules::staff::preceptors::list_records,
        crate::modules::staff::preceptors::get_record,
        crate::modules::staff::preceptors::delete_record,
        crate::modules::staff::preceptors::restore_record,
        crate::modules::staff::preceptors::create_preceptor,
        crate::modules::staff::preceptors::update_preceptor,
        crate::modules::staff::professors::list_records,
        crate::modules::staff::professors::get_record,
        crate::modules::staff::professors::delete_record,
        crate::modules::staff::professors::restore_record,
        crate::modules::staff::professors::create_professor,
        crate::modules::staff::professors::update_professor,
        crate::modules::staff::professors::get_professor_subjects,
        crate::modules::staff::professors::set_professor_subjects,
    ),
    components(
        schemas(
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
            Liveness,
            User,
            CreateUserDto,
            ChangePasswordDto,
            LoginRequest,
            LoginResponse,
            RefreshTokenRequest,
            TokenResponse,
            Year,
            Division,
            Shift,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            Category,
            CreateCategoryDto,
            UpdateCategoryDto,
            Comment,
            CommentWithCategories,
            CreateCommentDto,
            UpdateCommentDto,
            CommentForm,
            Phone,
            CreatePhoneDto,
            UpdatePhoneDto,
            CourseHistory,
            CreateCourseHistoryDto,
            UpdateCourseHistoryDto,
            AcademicHistory,
            CreateAcademicHistoryDto,
            UpdateAcademicHistoryDto,
            GradeValue,
            Grade,
            CreateGradeDto,
            UpdateGradeDto,
            Presence,
            CreatePresenceDto,
            UpdatePresenceDto,
            Principal,
            Preceptor,
            Professor,
            ProfessorWithSubjects,
            CreateStaffMemberDto,
            CreateProfessorDto,
            UpdateStaffMemberDto,
            SetProfessorSubjectsDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token refresh"),
        (name = "Users", description = "User identities"),
        (name = "Courses", description = "Courses identified by year, division and shift"),
        (name = "Subjects", description = "Subjects taught at the school"),
        (name = "Students", description = "Students and their records"),
        (name = "Categories", description = "Comment categories"),
        (name = "Comments", description = "Comments about students"),
        (name = "Phones", description = "Student phone numbers"),
        (name = "Course histories", description = "Courses attended by students"),
        (name = "Academic histories", description = "Subjects taught per course and cycle"),
        (name = "Grades", description = "Grades from 1 to 10"),
        (name = "Presences", description = "Attendance"),
        (name = "Principals", description = "Principals"),
        (name = "Preceptors", description = "Preceptors"),
        (name = "Professors", description = "Professors and the subjects they teach"),
        (name = "Pages", description = "Public pages")
    ),
    info(
        title = "Aula API",
        version = "0.1.0",
        description = "Academic records backend for a school, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/users/me",
            "/api/courses",
            "/api/courses/{id}/restore",
            "/api/comments/form",
            "/api/professors/{id}/subjects",
            "/about",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
