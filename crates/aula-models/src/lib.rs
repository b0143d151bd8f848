//! # Aula Models
//!
//! Entity rows, choice types and request/response DTOs for the Aula API.
//!
//! Every entity except [`users::User`] implements
//! [`aula_db::SoftDeletable`] and is read through [`aula_db::Repository`].
//!
//! # Modules
//!
//! - [`users`]: user identity and the rules behind `create_user`,
//!   `create_staff_user` and `create_superuser`
//! - [`auth`]: login and token DTOs
//! - [`staff`]: principals, preceptors and professors
//! - [`courses`], [`subjects`], [`students`], [`categories`]
//! - [`comments`], [`phones`], [`histories`], [`grades`], [`presences`]
//! - [`value_types`]: choice enums stored as short text codes
//! - [`listing`]: paginated response envelope

pub mod auth;
pub mod categories;
pub mod comments;
pub mod courses;
pub mod grades;
pub mod histories;
pub mod listing;
pub mod phones;
pub mod presences;
pub mod staff;
pub mod students;
pub mod subjects;
pub mod users;
pub mod value_types;

pub use auth::{Claims, LoginRequest, LoginResponse, RefreshTokenRequest, TokenResponse};
pub use categories::{Category, CreateCategoryDto, UpdateCategoryDto};
pub use comments::{
    Comment, CommentForm, CommentWithCategories, CreateCommentDto, UpdateCommentDto,
};
pub use courses::{Course, CreateCourseDto, Division, Shift, UpdateCourseDto, Year};
pub use grades::{CreateGradeDto, Grade, GradeValue, UpdateGradeDto};
pub use histories::{
    AcademicHistory, CourseHistory, CreateAcademicHistoryDto, CreateCourseHistoryDto,
    UpdateAcademicHistoryDto, UpdateCourseHistoryDto,
};
pub use listing::Paginated;
pub use phones::{CreatePhoneDto, Phone, UpdatePhoneDto};
pub use presences::{CreatePresenceDto, Presence, UpdatePresenceDto};
pub use staff::{
    CreateProfessorDto, CreateStaffMemberDto, Preceptor, Principal, Professor,
    ProfessorWithSubjects, SetProfessorSubjectsDto, StaffRole, UpdateStaffMemberDto,
};
pub use students::{CreateStudentDto, Student, UpdateStudentDto};
pub use subjects::{CreateSubjectDto, Subject, UpdateSubjectDto};
pub use users::{
    ChangePasswordDto, CreateUserDto, ExtraFields, IdentityError, User, UserFilterParams,
    UserFlags, UserKind, normalize_email,
};
pub use value_types::ChoiceError;
