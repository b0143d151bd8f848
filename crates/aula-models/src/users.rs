//! User identity models and the rules of the identity manager.
//!
//! A user is keyed by email. There is no username. The three creation paths
//! differ only in the flag defaults they apply and the overrides they refuse:
//!
//! | path | is_staff | is_superuser | is_active |
//! |------|----------|--------------|-----------|
//! | `create_user` | false | false | true |
//! | `create_staff_user` | true (must stay true) | false (must stay false) | true |
//! | `create_superuser` | true (must stay true) | true (must stay true) | true |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use aula_core::PaginationParams;
use aula_core::serde::deserialize_optional_bool;

/// Columns selected for [`User`]. The password hash is never part of it.
pub const USER_COLUMNS: &str =
    "id, email, is_staff, is_active, is_superuser, date_joined, last_login";

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.email)
    }
}

/// User row together with its password hash, used only for authentication.
#[derive(FromRow, Debug, Clone)]
pub struct UserCredentials {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_superuser: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("The given email must be set")]
    EmptyEmail,
    #[error("Staff user must have is_staff=true.")]
    StaffWithoutStaffFlag,
    #[error("Staff user must have is_superuser=false.")]
    StaffWithSuperuserFlag,
    #[error("Superuser must have is_staff=true.")]
    SuperuserWithoutStaffFlag,
    #[error("Superuser must have is_superuser=true.")]
    SuperuserWithoutSuperuserFlag,
}

/// Lower-cases the domain part of an email address.
///
/// The local part is kept as given. Surrounding whitespace is dropped.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Which identity-manager path is creating the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKind {
    Regular,
    Staff,
    Superuser,
}

/// Optional flag overrides passed to the identity manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct ExtraFields {
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// Flags a new user ends up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFlags {
    pub is_staff: bool,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl ExtraFields {
    pub fn staff() -> Self {
        Self {
            is_staff: Some(true),
            ..Self::default()
        }
    }

    /// Applies the defaults of `kind` and checks the overrides it refuses.
    pub fn resolve(self, kind: UserKind) -> Result<UserFlags, IdentityError> {
        let is_active = self.is_active.unwrap_or(true);
        match kind {
            UserKind::Regular => Ok(UserFlags {
                is_staff: self.is_staff.unwrap_or(false),
                is_active,
                is_superuser: self.is_superuser.unwrap_or(false),
            }),
            UserKind::Staff => {
                if !self.is_staff.unwrap_or(true) {
                    return Err(IdentityError::StaffWithoutStaffFlag);
                }
                if self.is_superuser.unwrap_or(false) {
                    return Err(IdentityError::StaffWithSuperuserFlag);
                }
                Ok(UserFlags {
                    is_staff: true,
                    is_active,
                    is_superuser: false,
                })
            }
            UserKind::Superuser => {
                if !self.is_staff.unwrap_or(true) {
                    return Err(IdentityError::SuperuserWithoutStaffFlag);
                }
                if !self.is_superuser.unwrap_or(true) {
                    return Err(IdentityError::SuperuserWithoutSuperuserFlag);
                }
                Ok(UserFlags {
                    is_staff: true,
                    is_active,
                    is_superuser: true,
                })
            }
        }
    }
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "preceptor@school.edu")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl CreateUserDto {
    pub fn extra_fields(&self) -> ExtraFields {
        ExtraFields {
            is_staff: self.is_staff,
            is_active: self.is_active,
            is_superuser: self.is_superuser,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct ChangePasswordDto {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Filters for the user listing: search by email, filter by flags.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilterParams {
    /// Case-insensitive substring of the email
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_staff: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_lowercases_domain_only() {
        assert_eq!(normalize_email("John.Doe@EXAMPLE.COM"), "John.Doe@example.com");
        assert_eq!(normalize_email("  a@B.org "), "a@b.org");
        assert_eq!(normalize_email("no-at-sign"), "no-at-sign");
    }

    #[test]
    fn test_normalize_email_splits_on_last_at() {
        assert_eq!(normalize_email("\"a@b\"@Host.COM"), "\"a@b\"@host.com");
    }

    #[test]
    fn test_regular_user_defaults() {
        let flags = ExtraFields::default().resolve(UserKind::Regular).unwrap();
        assert_eq!(
            flags,
            UserFlags {
                is_staff: false,
                is_active: true,
                is_superuser: false,
            }
        );
    }

    #[test]
    fn test_regular_user_accepts_overrides() {
        let extra = ExtraFields {
            is_staff: Some(true),
            is_active: Some(false),
            is_superuser: None,
        };
        let flags = extra.resolve(UserKind::Regular).unwrap();
        assert!(flags.is_staff);
        assert!(!flags.is_active);
        assert!(!flags.is_superuser);
    }

    #[test]
    fn test_staff_user_rules() {
        let flags = ExtraFields::default().resolve(UserKind::Staff).unwrap();
        assert!(flags.is_staff && flags.is_active && !flags.is_superuser);

        let extra = ExtraFields {
            is_staff: Some(false),
            ..Default::default()
        };
        assert_eq!(
            extra.resolve(UserKind::Staff),
            Err(IdentityError::StaffWithoutStaffFlag)
        );

        let extra = ExtraFields {
            is_superuser: Some(true),
            ..Default::default()
        };
        assert_eq!(
            extra.resolve(UserKind::Staff),
            Err(IdentityError::StaffWithSuperuserFlag)
        );
    }

    #[test]
    fn test_superuser_rules() {
        let flags = ExtraFields::default().resolve(UserKind::Superuser).unwrap();
        assert!(flags.is_staff && flags.is_active && flags.is_superuser);

        let extra = ExtraFields {
            is_superuser: Some(false),
            ..Default::default()
        };
        assert_eq!(
            extra.resolve(UserKind::Superuser),
            Err(IdentityError::SuperuserWithoutSuperuserFlag)
        );

        let extra = ExtraFields {
            is_staff: Some(false),
            ..Default::default()
        };
        assert_eq!(
            extra.resolve(UserKind::Superuser),
            Err(IdentityError::SuperuserWithoutStaffFlag)
        );
    }

    #[test]
    fn test_create_user_dto_validation() {
        let dto = CreateUserDto {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            is_staff: None,
            is_active: None,
            is_superuser: None,
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }
}
