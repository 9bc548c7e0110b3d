//! # Blog Infrastructure
//!
//! Concrete implementations of the [`PostRepository`](blog_core::ports::PostRepository)
//! port defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL post store via SeaORM

pub mod database;
pub mod memory;

pub use database::DatabaseConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, connect, ensure_schema};
#[cfg(feature = "postgres")]
pub use sea_orm::DbErr;
