//! In-memory post store - used when no database is configured, and in tests.

mod post_store;

pub use post_store::InMemoryPostRepository;
