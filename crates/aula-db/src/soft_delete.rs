//! Soft-deletion capability.
//!
//! Every domain entity except the user identity carries a `deleted_at`
//! timestamp. "Deleting" stamps it and keeps the row; hard deletion removes the
//! row and lets the store apply its foreign-key rules (cascade or set null).
//! Soft deletion never cascades.
//!
//! Retrieval goes through an explicit [`Repository`] built with an
//! include-dead-rows flag:
//!
//! - [`Repository::objects`] sees alive rows only (the default accessor)
//! - [`Repository::all_objects`] sees every row
//!
//! Both can be narrowed further with [`Repository::alive`] and
//! [`Repository::dead`]. Narrowing the default accessor to dead rows yields an
//! empty collection.
//!
//! The filter only applies to reads made through a repository. Foreign keys
//! and joins still reach dead rows.

use std::marker::PhantomData;

use aula_core::{AppError, PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, postgres::PgRow};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::map_db_error;

/// A row type stored in a table with a `deleted_at` column.
///
/// `COLUMNS` is spliced into `SELECT` and `RETURNING` clauses and must list
/// the fields in the order `FromRow` expects them.
pub trait SoftDeletable: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: &'static str;
    const COLUMNS: &'static str;
    /// Used in not-found messages, e.g. "Course not found"
    const ENTITY: &'static str;
    const ORDER_BY: &'static str = "created_at DESC, id";

    fn id(&self) -> Uuid;
}

/// Implements [`SoftDeletable`] for a row struct with an `id` field.
#[macro_export]
macro_rules! impl_soft_deletable {
    ($ty:ty, table = $table:literal, entity = $entity:literal, columns = $columns:literal) => {
        impl $crate::soft_delete::SoftDeletable for $ty {
            const TABLE: &'static str = $table;
            const COLUMNS: &'static str = $columns;
            const ENTITY: &'static str = $entity;

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }
        }
    };
}

/// Narrowing applied on top of a repository's base visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Liveness {
    #[default]
    Any,
    Alive,
    Dead,
}

/// SQL predicate selecting the rows visible to a repository.
pub fn visibility_clause(include_deleted: bool, liveness: Liveness) -> &'static str {
    match (include_deleted, liveness) {
        (false, Liveness::Dead) => "FALSE",
        (false, _) | (true, Liveness::Alive) => "deleted_at IS NULL",
        (true, Liveness::Dead) => "deleted_at IS NOT NULL",
        (true, Liveness::Any) => "TRUE",
    }
}

pub struct Repository<'a, T> {
    db: &'a PgPool,
    include_deleted: bool,
    liveness: Liveness,
    _row: PhantomData<fn() -> T>,
}

impl<'a, T> Clone for Repository<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Repository<'a, T> {}

impl<'a, T: SoftDeletable> Repository<'a, T> {
    pub fn new(db: &'a PgPool, include_deleted: bool) -> Self {
        Self {
            db,
            include_deleted,
            liveness: Liveness::Any,
            _row: PhantomData,
        }
    }

    /// Alive rows only.
    pub fn objects(db: &'a PgPool) -> Self {
        Self::new(db, false)
    }

    /// Every row, including soft-deleted ones.
    pub fn all_objects(db: &'a PgPool) -> Self {
        Self::new(db, true)
    }

    pub fn alive(self) -> Self {
        self.narrow(Liveness::Alive)
    }

    pub fn dead(self) -> Self {
        self.narrow(Liveness::Dead)
    }

    pub fn narrow(self, liveness: Liveness) -> Self {
        Self { liveness, ..self }
    }

    fn filter(&self) -> &'static str {
        visibility_clause(self.include_deleted, self.liveness)
    }

    fn not_found(&self) -> AppError {
        AppError::not_found(anyhow::anyhow!("{} not found", T::ENTITY))
    }

    #[instrument(skip(self), fields(table = T::TABLE, filter = self.filter()))]
    pub async fn count(&self) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE {}", T::TABLE, self.filter());
        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(self.db)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self), fields(table = T::TABLE, filter = self.filter()))]
    pub async fn fetch_all(&self) -> Result<Vec<T>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {}",
            T::COLUMNS,
            T::TABLE,
            self.filter(),
            T::ORDER_BY
        );
        sqlx::query_as::<_, T>(&sql)
            .fetch_all(self.db)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self), fields(table = T::TABLE, filter = self.filter()))]
    pub async fn fetch_page(
        &self,
        params: &PaginationParams,
    ) -> Result<(Vec<T>, PaginationMeta), AppError> {
        let total = self.count().await?;

        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {} LIMIT $1 OFFSET $2",
            T::COLUMNS,
            T::TABLE,
            self.filter(),
            T::ORDER_BY
        );
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(self.db)
            .await
            .map_err(map_db_error)?;

        Ok((rows, PaginationMeta::new(total, params)))
    }

    /// Rows whose `column` equals `value`, e.g. the phones of one student.
    ///
    /// `column` must be a trusted identifier, never user input.
    #[instrument(skip(self), fields(table = T::TABLE, filter = self.filter()))]
    pub async fn fetch_by(&self, column: &'static str, value: Uuid) -> Result<Vec<T>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = $1 AND {} ORDER BY {}",
            T::COLUMNS,
            T::TABLE,
            column,
            self.filter(),
            T::ORDER_BY
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(value)
            .fetch_all(self.db)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self), fields(table = T::TABLE, filter = self.filter()))]
    pub async fn get(&self, id: Uuid) -> Result<T, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND {}",
            T::COLUMNS,
            T::TABLE,
            self.filter()
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(self.db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| self.not_found())
    }

    /// Marks the row as deleted and returns it. A row that is already dead
    /// keeps its original timestamp.
    #[instrument(skip(self), fields(table = T::TABLE, filter = self.filter()))]
    pub async fn delete(&self, id: Uuid) -> Result<T, AppError> {
        let sql = format!(
            "UPDATE {} SET deleted_at = COALESCE(deleted_at, NOW()), updated_at = NOW() \
             WHERE id = $1 AND {} RETURNING {}",
            T::TABLE,
            self.filter(),
            T::COLUMNS
        );
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(self.db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| self.not_found())?;

        tracing::info!(table = T::TABLE, %id, "Soft-deleted row");
        Ok(row)
    }

    /// Permanently removes the row. Dependent rows follow the store's
    /// cascade and set-null rules.
    #[instrument(skip(self), fields(table = T::TABLE, filter = self.filter()))]
    pub async fn hard_delete(&self, id: Uuid) -> Result<(), AppError> {
        let sql = format!(
            "DELETE FROM {} WHERE id = $1 AND {}",
            T::TABLE,
            self.filter()
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.db)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(self.not_found());
        }

        tracing::info!(table = T::TABLE, %id, "Hard-deleted row");
        Ok(())
    }

    /// Clears `deleted_at`. Only reaches dead rows through `all_objects`.
    #[instrument(skip(self), fields(table = T::TABLE, filter = self.filter()))]
    pub async fn restore(&self, id: Uuid) -> Result<T, AppError> {
        let sql = format!(
            "UPDATE {} SET deleted_at = NULL, updated_at = NOW() \
             WHERE id = $1 AND {} RETURNING {}",
            T::TABLE,
            self.filter(),
            T::COLUMNS
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(self.db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| self.not_found())
    }

    /// Soft-deletes every alive row visible to this repository.
    #[instrument(skip(self), fields(table = T::TABLE, filter = self.filter()))]
    pub async fn delete_all(&self) -> Result<u64, AppError> {
        let sql = format!(
            "UPDATE {} SET deleted_at = NOW(), updated_at = NOW() \
             WHERE deleted_at IS NULL AND {}",
            T::TABLE,
            self.filter()
        );
        let result = sqlx::query(&sql)
            .execute(self.db)
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected())
    }

    /// Permanently removes every row visible to this repository.
    #[instrument(skip(self), fields(table = T::TABLE, filter = self.filter()))]
    pub async fn hard_delete_all(&self) -> Result<u64, AppError> {
        let sql = format!("DELETE FROM {} WHERE {}", T::TABLE, self.filter());
        let result = sqlx::query(&sql)
            .execute(self.db)
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected())
    }
}
