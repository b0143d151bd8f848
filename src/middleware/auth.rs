use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use aula_auth::{Claims, verify_token};
use aula_core::AppError;

use crate::state::AppState;

/// Extractor that validates the bearer token and yields its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.0
            .user_id()
            .ok_or_else(|| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn is_staff(&self) -> bool {
        self.0.is_staff
    }

    pub fn is_superuser(&self) -> bool {
        self.0.is_superuser
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Generates an extractor that requires a flag on the authenticated user.
#[macro_export]
macro_rules! require_flag {
    ($name:ident, $check:ident, $description:literal) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = aula_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                if !auth_user.$check() {
                    return Err(aula_core::AppError::forbidden(format!(
                        "Access denied. {} access required",
                        $description
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_flag!(RequireStaff, is_staff, "Staff");
require_flag!(RequireSuperuser, is_superuser, "Superuser");

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_claims(is_staff: bool, is_superuser: bool) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            email: "test@school.edu".to_string(),
            is_staff,
            is_superuser,
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_flags() {
        let auth_user = AuthUser(create_test_claims(true, false));
        assert!(auth_user.is_staff());
        assert!(!auth_user.is_superuser());
        assert_eq!(auth_user.email(), "test@school.edu");
    }

    #[test]
    fn test_user_id_parses_subject() {
        let claims = create_test_claims(false, false);
        let expected = Uuid::parse_str(&claims.sub).unwrap();
        assert_eq!(AuthUser(claims).user_id().unwrap(), expected);
    }

    #[test]
    fn test_user_id_rejects_garbage_subject() {
        let mut claims = create_test_claims(false, false);
        claims.sub = "not-a-uuid".to_string();
        let err = AuthUser(claims).user_id().unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }
}
