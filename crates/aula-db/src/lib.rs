//! # Aula DB
//!
//! Database plumbing for the Aula API:
//!
//! - [`init_db_pool`] / [`run_migrations`]: PostgreSQL pool setup
//! - [`errors`]: classification of `sqlx` failures into the API error taxonomy
//! - [`soft_delete`]: the [`SoftDeletable`] capability and the explicit
//!   [`Repository`] that replaces an implicit per-model default manager
//!
//! # Example
//!
//! ```ignore
//! use aula_db::{Repository, init_db_pool};
//!
//! let pool = init_db_pool().await;
//! let alive = Repository::<Course>::objects(&pool).fetch_all().await?;
//! let everything = Repository::<Course>::all_objects(&pool).fetch_all().await?;
//! ```

pub mod errors;
pub mod soft_delete;

use std::env;

pub use errors::{map_db_error, map_unique_violation};
pub use soft_delete::{Liveness, Repository, SoftDeletable, visibility_clause};
pub use sqlx::PgPool;

/// Connects to the database named by `DATABASE_URL`.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the connection fails; call it once at
/// startup.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
