//! Field constraints every store enforces before writing.

use super::post::{NewPost, PostPatch};
use crate::error::ValidationError;

/// A `NewPost` that passed validation, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPost {
    pub title: String,
    pub author: Option<String>,
    pub contents: Option<String>,
    pub tags: Vec<String>,
}

pub fn validate_new_post(post: NewPost) -> Result<ValidatedPost, ValidationError> {
    let title = match post.title {
        Some(title) if !title.is_empty() => title,
        _ => return Err(ValidationError::required("title")),
    };

    Ok(ValidatedPost {
        title,
        author: post.author,
        contents: post.contents,
        tags: post.tags.unwrap_or_default(),
    })
}

/// A patch may omit `title`, but may not blank it.
pub fn validate_patch(patch: &PostPatch) -> Result<(), ValidationError> {
    match patch.title.as_deref() {
        Some("") => Err(ValidationError::required("title")),
        _ => Ok(()),
    }
}
