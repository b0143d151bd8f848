use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use aula_auth::{create_access_token, create_refresh_token, verify_refresh_token};
use aula_config::JwtConfig;
use aula_core::{AppError, verify_dummy_password, verify_password};
use aula_db::map_db_error;
use aula_models::users::USER_COLUMNS;
use aula_models::{
    LoginRequest, LoginResponse, RefreshTokenRequest, TokenResponse, User, normalize_email,
};

use crate::metrics::{track_user_login_failure, track_user_login_success};
use crate::modules::users::UserService;

pub struct AuthService;

impl AuthService {
    /// Checks email and password, stamps `last_login` and issues tokens.
    ///
    /// Unknown email, wrong password and inactive account all answer 401
    /// with the same message.
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let email = normalize_email(&dto.email);
        let invalid = || AppError::unauthorized("Invalid email or password".to_string());

        let Some(credentials) = UserService::find_credentials(db, &email).await? else {
            verify_dummy_password(&dto.password);
            track_user_login_failure("unknown_email");
            return Err(invalid());
        };

        if !verify_password(&dto.password, &credentials.password)? {
            track_user_login_failure("wrong_password");
            return Err(invalid());
        }

        if !credentials.is_active {
            track_user_login_failure("inactive");
            return Err(invalid());
        }

        let sql = format!(
            "UPDATE users SET last_login = NOW() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(credentials.id)
            .fetch_one(db)
            .await
            .map_err(map_db_error)?;

        let access_token = create_access_token(
            user.id,
            &user.email,
            user.is_staff,
            user.is_superuser,
            jwt_config,
        )?;
        let refresh_token = create_refresh_token(user.id, &user.email, jwt_config)?;

        track_user_login_success();
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            access_token,
            refresh_token,
            user,
        })
    }

    /// Exchanges a refresh token for a new token pair. Flags are reloaded, so
    /// a user whose staff flag was removed loses it on the next refresh.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn refresh_tokens(
        db: &PgPool,
        dto: RefreshTokenRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let claims = verify_refresh_token(&dto.refresh_token, jwt_config)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))?;

        let user = UserService::get_user(db, user_id).await.map_err(|e| {
            if e.is_not_found() {
                AppError::unauthorized("Invalid or expired refresh token".to_string())
            } else {
                e
            }
        })?;

        if !user.is_active {
            return Err(AppError::unauthorized(
                "Invalid or expired refresh token".to_string(),
            ));
        }

        Ok(TokenResponse {
            access_token: create_access_token(
                user.id,
                &user.email,
                user.is_staff,
                user.is_superuser,
                jwt_config,
            )?,
            refresh_token: create_refresh_token(user.id, &user.email, jwt_config)?,
        })
    }
}
