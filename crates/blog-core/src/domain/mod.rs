//! Domain entities - the core business objects.

mod post;
mod query;
mod validation;

pub use post::{NewPost, Post, PostId, PostPatch};
pub use query::{DeleteResult, ListOptions, PostFilter, SortField, SortOrder};
pub use validation::{ValidatedPost, validate_new_post, validate_patch};
