//! JWT claim structures.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// Parses the subject back into a user ID.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Claims embedded in refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
    /// Unique token identifier so two refresh tokens issued in the same
    /// second still differ
    pub jti: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "user-id-123".to_string(),
            email: "preceptor@school.edu".to_string(),
            is_staff: true,
            is_superuser: false,
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""is_staff":true"#));
        assert!(serialized.contains(r#""is_superuser":false"#));
    }

    #[test]
    fn test_claims_user_id() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id.to_string(),
            email: "a@b.com".to_string(),
            is_staff: false,
            is_superuser: false,
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.user_id(), Some(id));

        let broken = Claims {
            sub: "not-a-uuid".to_string(),
            ..claims
        };
        assert_eq!(broken.user_id(), None);
    }

    #[test]
    fn test_refresh_claims_do_not_parse_as_access_claims() {
        let json = r#"{"sub":"u","email":"a@b.com","exp":9999999999,"iat":9999999900,"jti":"x"}"#;
        assert!(serde_json::from_str::<RefreshTokenClaims>(json).is_ok());
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }
}
