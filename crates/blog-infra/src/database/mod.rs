//! PostgreSQL post store and connection management.

mod connections;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
mod postgres_repo;
#[cfg(feature = "postgres")]
mod schema;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use postgres_base::{PostgresBaseRepository, map_db_err};
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostRepository;
#[cfg(feature = "postgres")]
pub use schema::ensure_schema;
