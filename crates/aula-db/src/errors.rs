//! Mapping of store failures onto [`AppError`].
//!
//! Constraint enforcement is left to PostgreSQL: unique, foreign-key and check
//! violations come back as SQLSTATE codes and surface as constraint
//! violations to the losing writer.

use aula_core::AppError;

pub fn map_db_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::not_found(anyhow::anyhow!("Record not found")),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            if db_err.is_unique_violation() {
                AppError::constraint_violation(anyhow::anyhow!(
                    "Duplicate value violates unique constraint {}",
                    constraint
                ))
            } else if db_err.is_foreign_key_violation() {
                AppError::constraint_violation(anyhow::anyhow!(
                    "Referenced record does not exist ({})",
                    constraint
                ))
            } else if db_err.is_check_violation() {
                AppError::constraint_violation(anyhow::anyhow!(
                    "Value rejected by check constraint {}",
                    constraint
                ))
            } else {
                AppError::internal(err)
            }
        }
        _ => AppError::internal(err),
    }
}

/// Replaces the generic message of a unique violation with a domain one.
pub fn map_unique_violation(err: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return AppError::constraint_violation(anyhow::anyhow!("{}", message));
    }
    map_db_error(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_not_found() {
        assert!(map_db_error(sqlx::Error::RowNotFound).is_not_found());
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err = map_db_error(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status.as_u16(), 500);

        let err = map_unique_violation(sqlx::Error::PoolClosed, "duplicate");
        assert_eq!(err.status.as_u16(), 500);
    }
}
