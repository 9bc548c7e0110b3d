//! # Blog Core
//!
//! The domain layer of the blog backend.
//! This crate contains the post model, its validation rules and the
//! [`PostService`](service::PostService) that external callers go through.
//! It has zero infrastructure dependencies; storage lives behind the
//! [`PostRepository`](ports::PostRepository) port.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError, ValidationError};
pub use service::PostService;
