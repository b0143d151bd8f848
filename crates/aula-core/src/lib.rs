//! # Aula Core
//!
//! Core types, errors, and utilities for the Aula API.
//!
//! - [`errors`]: Application error taxonomy with HTTP response conversion
//! - [`pagination`]: Pagination utilities for listing endpoints
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers for query strings and
//!   update bodies
//!
//! # Example
//!
//! ```ignore
//! use aula_core::errors::AppError;
//! use aula_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_dummy_password, verify_password};
