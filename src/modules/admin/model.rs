use serde::Deserialize;
use sqlx::PgPool;
use utoipa::IntoParams;
use uuid::Uuid;

use aula_core::serde::deserialize_optional_bool;
use aula_core::{AppError, PaginationParams};
use aula_db::{Liveness, Repository, SoftDeletable};

use crate::metrics::track_record_deleted;
use crate::middleware::auth::AuthUser;

/// Query string of listing endpoints.
///
/// `include_deleted=true` switches to the all-records accessor; `state`
/// narrows either accessor to alive or dead rows.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub include_deleted: Option<bool>,
    #[serde(default)]
    pub state: Option<Liveness>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl ListQuery {
    pub fn repository<'a, T: SoftDeletable>(&self, db: &'a PgPool) -> Repository<'a, T> {
        Repository::new(db, self.include_deleted.unwrap_or(false))
            .narrow(self.state.unwrap_or_default())
    }
}

/// Query string of detail endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScopeQuery {
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub include_deleted: Option<bool>,
}

impl ScopeQuery {
    pub fn repository<'a, T: SoftDeletable>(&self, db: &'a PgPool) -> Repository<'a, T> {
        Repository::new(db, self.include_deleted.unwrap_or(false))
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteQuery {
    /// Remove the row instead of marking it deleted (superuser only)
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub hard: Option<bool>,
}

/// Soft deletion reaches alive rows only. Hard deletion reaches every row,
/// so a soft-deleted record can still be purged.
pub async fn delete_with<T: SoftDeletable>(
    db: &PgPool,
    auth_user: &AuthUser,
    id: Uuid,
    query: &DeleteQuery,
) -> Result<(), AppError> {
    if query.hard.unwrap_or(false) {
        if !auth_user.is_superuser() {
            return Err(AppError::forbidden(
                "Access denied. Superuser access required for hard deletion".to_string(),
            ));
        }
        Repository::<T>::all_objects(db).hard_delete(id).await?;
        track_record_deleted(T::TABLE, true);
    } else {
        Repository::<T>::objects(db).delete(id).await?;
        track_record_deleted(T::TABLE, false);
    }
    Ok(())
}
