//! # Aula Auth
//!
//! Token utilities for the Aula API.
//!
//! - [`claims`]: claim structures carried by access and refresh tokens
//! - [`jwt`]: token creation and verification
//!
//! Access tokens carry the staff and superuser flags of the user at the time
//! of issue, so authorization checks never hit the database. Refresh tokens
//! only identify the user; the refresh endpoint reloads the flags.

pub mod claims;
pub mod jwt;

pub use claims::{Claims, RefreshTokenClaims};
pub use jwt::{create_access_token, create_refresh_token, verify_refresh_token, verify_token};
