//! Creation and verification of access and refresh tokens.
//!
//! Both kinds are HS256 tokens signed with `JWT_SECRET`. Their claim sets are
//! disjoint enough that one kind never verifies as the other.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use aula_config::JwtConfig;
use aula_core::AppError;

use crate::claims::{Claims, RefreshTokenClaims};

/// Creates a short-lived access token carrying the user's flags.
pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    is_staff: bool,
    is_superuser: bool,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        is_staff,
        is_superuser,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry of an access token.
///
/// # Errors
///
/// Returns 401 for a malformed, expired or foreign-signed token.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}

pub fn create_refresh_token(
    user_id: Uuid,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.refresh_token_expiry as usize;

    let claims = RefreshTokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create refresh token: {}", e)))
}

pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshTokenClaims, AppError> {
    decode::<RefreshTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired refresh token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604800,
        }
    }

    #[test]
    fn test_access_token_round_trip_keeps_flags() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token =
            create_access_token(user_id, "principal@school.edu", true, true, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "principal@school.edu");
        assert!(claims.is_staff);
        assert!(claims.is_superuser);
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        let err = verify_token("invalid-token", &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token =
            create_access_token(Uuid::new_v4(), "a@b.com", false, false, &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            ..get_test_jwt_config()
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = get_test_jwt_config();
        let past = (Utc::now().timestamp() - 3600) as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "a@b.com".to_string(),
            is_staff: false,
            is_superuser: false,
            exp: past,
            iat: past - 60,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = create_refresh_token(user_id, "a@b.com", &config).unwrap();
        let claims = verify_refresh_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_token_kinds_are_not_interchangeable() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let access = create_access_token(user_id, "a@b.com", true, false, &config).unwrap();
        let refresh = create_refresh_token(user_id, "a@b.com", &config).unwrap();

        assert!(verify_refresh_token(&access, &config).is_err());
        assert!(verify_token(&refresh, &config).is_err());
    }

    #[test]
    fn test_refresh_token_expiry_longer_than_access() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let access = create_access_token(user_id, "a@b.com", false, false, &config).unwrap();
        let refresh = create_refresh_token(user_id, "a@b.com", &config).unwrap();

        let access_claims = verify_token(&access, &config).unwrap();
        let refresh_claims = verify_refresh_token(&refresh, &config).unwrap();
        assert!(refresh_claims.exp > access_claims.exp);
    }
}
