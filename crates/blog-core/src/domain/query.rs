//! Filtering and ordering of post listings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::post::Post;
use crate::error::DomainError;

/// Field a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Author,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
            SortField::Title => "title",
            SortField::Author => "author",
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            other => Err(DomainError::invalid_argument("sortBy", other)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" | "asc" | "1" => Ok(SortOrder::Ascending),
            "descending" | "desc" | "-1" => Ok(SortOrder::Descending),
            other => Err(DomainError::invalid_argument("sortOrder", other)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort specification for list operations. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOptions {
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl ListOptions {
    pub fn new(sort_by: SortField, sort_order: SortOrder) -> Self {
        Self { sort_by, sort_order }
    }

    /// Build options from raw caller input. Missing values fall back to the
    /// defaults; unrecognised values are an `InvalidArgument`.
    pub fn parse(sort_by: Option<&str>, sort_order: Option<&str>) -> Result<Self, DomainError> {
        Ok(Self {
            sort_by: sort_by.map(str::parse::<SortField>).transpose()?.unwrap_or_default(),
            sort_order: sort_order.map(str::parse::<SortOrder>).transpose()?.unwrap_or_default(),
        })
    }

    /// Total order used for listings.
    ///
    /// Ties on the sort key fall back to `id` ascending. Posts without an
    /// author sort last in either direction.
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let directed = |ord: Ordering| match self.sort_order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        };

        let primary = match self.sort_by {
            SortField::CreatedAt => directed(a.created_at.cmp(&b.created_at)),
            SortField::UpdatedAt => directed(a.updated_at.cmp(&b.updated_at)),
            SortField::Title => directed(a.title.cmp(&b.title)),
            SortField::Author => match (&a.author, &b.author) {
                (Some(x), Some(y)) => directed(x.cmp(y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };

        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Predicate applied by a bulk read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PostFilter {
    #[default]
    All,
    /// Exact, case-sensitive author match.
    Author(String),
    /// Posts whose tags contain the value.
    Tag(String),
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            PostFilter::All => true,
            PostFilter::Author(author) => post.author.as_deref() == Some(author.as_str()),
            PostFilter::Tag(tag) => post.has_tag(tag),
        }
    }
}

/// Outcome of a delete; `deleted_count` is 0 when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self { deleted_count }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_count > 0
    }
}
