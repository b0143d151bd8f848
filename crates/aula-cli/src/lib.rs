//! # Aula CLI
//!
//! Database seeding utilities for Aula development and testing.
//!
//! ## Usage
//!
//! ```ignore
//! use aula_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(200); // 200 students with defaults
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
