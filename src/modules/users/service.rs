//! The identity manager: user creation, lookup and credential changes.

use sqlx::{PgConnection, PgPool};
use tracing::instrument;
use uuid::Uuid;

use aula_core::{AppError, PaginationMeta, hash_password, verify_password};
use aula_db::{map_db_error, map_unique_violation};
use aula_models::users::{USER_COLUMNS, UserCredentials};
use aula_models::{
    ChangePasswordDto, ExtraFields, IdentityError, Paginated, User, UserFilterParams, UserKind,
    normalize_email,
};

use crate::metrics::track_user_created;

pub struct UserService;

impl UserService {
    /// Creates a regular user. Flags default to non-staff, active,
    /// non-superuser and may be overridden through `extra`.
    #[instrument(skip(db, password))]
    pub async fn create_user(
        db: &PgPool,
        email: &str,
        password: &str,
        extra: ExtraFields,
    ) -> Result<User, AppError> {
        Self::create(db, email, password, extra, UserKind::Regular).await
    }

    /// Creates a staff user that is never a superuser.
    #[instrument(skip(db, password))]
    pub async fn create_staff_user(
        db: &PgPool,
        email: &str,
        password: &str,
        extra: ExtraFields,
    ) -> Result<User, AppError> {
        Self::create(db, email, password, extra, UserKind::Staff).await
    }

    #[instrument(skip(db, password))]
    pub async fn create_superuser(
        db: &PgPool,
        email: &str,
        password: &str,
        extra: ExtraFields,
    ) -> Result<User, AppError> {
        Self::create(db, email, password, extra, UserKind::Superuser).await
    }

    async fn create(
        db: &PgPool,
        email: &str,
        password: &str,
        extra: ExtraFields,
        kind: UserKind,
    ) -> Result<User, AppError> {
        let mut conn = db.acquire().await.map_err(map_db_error)?;
        Self::insert(&mut conn, email, password, extra, kind).await
    }

    /// Inserts a user on an existing connection, so callers can create the
    /// user inside their own transaction.
    #[instrument(skip(conn, password))]
    pub async fn insert(
        conn: &mut PgConnection,
        email: &str,
        password: &str,
        extra: ExtraFields,
        kind: UserKind,
    ) -> Result<User, AppError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::validation(IdentityError::EmptyEmail));
        }

        let flags = extra.resolve(kind).map_err(AppError::validation)?;
        let hashed_password = hash_password(password)?;

        let sql = format!(
            "INSERT INTO users (email, password, is_staff, is_active, is_superuser) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&email)
            .bind(&hashed_password)
            .bind(flags.is_staff)
            .bind(flags.is_active)
            .bind(flags.is_superuser)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| map_unique_violation(e, "A user with this email already exists"))?;

        track_user_created(match kind {
            UserKind::Regular => "regular",
            UserKind::Staff => "staff",
            UserKind::Superuser => "superuser",
        });
        tracing::info!(user_id = %user.id, email = %user.email, "User created");

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub async fn find_credentials(
        db: &PgPool,
        email: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        sqlx::query_as::<_, UserCredentials>(
            "SELECT id, email, password, is_staff, is_active, is_superuser \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .map_err(map_db_error)
    }

    /// Users ordered by email, optionally filtered by email substring and
    /// flags.
    #[instrument(skip(db))]
    pub async fn list_users(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<Paginated<User>, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::from(" WHERE TRUE");
        let mut index = 0;
        let search = filters.search.as_ref().map(|s| format!("%{}%", s));

        if search.is_some() {
            index += 1;
            where_clause.push_str(&format!(" AND email ILIKE ${}", index));
        }
        if filters.is_staff.is_some() {
            index += 1;
            where_clause.push_str(&format!(" AND is_staff = ${}", index));
        }
        if filters.is_active.is_some() {
            index += 1;
            where_clause.push_str(&format!(" AND is_active = ${}", index));
        }

        let count_sql = format!("SELECT COUNT(*) FROM users{}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(search) = &search {
            count_query = count_query.bind(search);
        }
        if let Some(is_staff) = filters.is_staff {
            count_query = count_query.bind(is_staff);
        }
        if let Some(is_active) = filters.is_active {
            count_query = count_query.bind(is_active);
        }
        let total = count_query.fetch_one(db).await.map_err(map_db_error)?;

        let data_sql = format!(
            "SELECT {} FROM users{} ORDER BY email LIMIT {} OFFSET {}",
            USER_COLUMNS, where_clause, limit, offset
        );
        let mut data_query = sqlx::query_as::<_, User>(&data_sql);
        if let Some(search) = &search {
            data_query = data_query.bind(search);
        }
        if let Some(is_staff) = filters.is_staff {
            data_query = data_query.bind(is_staff);
        }
        if let Some(is_active) = filters.is_active {
            data_query = data_query.bind(is_active);
        }
        let users = data_query.fetch_all(db).await.map_err(map_db_error)?;

        Ok(Paginated::new(
            users,
            PaginationMeta::new(total, &filters.pagination),
        ))
    }

    /// Replaces the stored hash with a hash of `password`.
    #[instrument(skip(db, password))]
    pub async fn set_password(db: &PgPool, user_id: Uuid, password: &str) -> Result<(), AppError> {
        let hashed_password = hash_password(password)?;

        let result = sqlx::query("UPDATE users SET password = $1 WHERE id = $2")
            .bind(&hashed_password)
            .bind(user_id)
            .execute(db)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }
        Ok(())
    }

    #[instrument(skip(db, dto))]
    pub async fn change_password(
        db: &PgPool,
        user_id: Uuid,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        let current_hash: String = sqlx::query_scalar("SELECT password FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if !verify_password(&dto.current_password, &current_hash)? {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Current password is incorrect"
            )));
        }

        Self::set_password(db, user_id, &dto.new_password).await
    }
}
