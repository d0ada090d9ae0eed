//! Listing view state: search query, type filter and sort order.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::file::FileKind;

/// Sort order within the folder group and within the file group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "name-asc")]
    NameAsc,
    #[serde(rename = "name-desc")]
    NameDesc,
    #[serde(rename = "date-new")]
    ModifiedNewest,
    #[serde(rename = "date-old")]
    ModifiedOldest,
    #[serde(rename = "size-large")]
    SizeLargest,
    #[serde(rename = "size-small")]
    SizeSmallest,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::ModifiedNewest => "date-new",
            SortKey::ModifiedOldest => "date-old",
            SortKey::SizeLargest => "size-large",
            SortKey::SizeSmallest => "size-small",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Kind(FileKind),
}

impl TypeFilter {
    pub fn matches(&self, kind: FileKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Kind(k) => *k == kind,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Kind(k) => k.fmt(f),
        }
    }
}

/// Derived, non-persisted controls applied to the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingQuery {
    /// Case-insensitive substring matched against entry names.
    pub query: String,
    pub type_filter: TypeFilter,
    pub sort_key: SortKey,
}

impl ListingQuery {
    pub fn new(query: impl Into<String>, type_filter: TypeFilter, sort_key: SortKey) -> Self {
        Self {
            query: query.into(),
            type_filter,
            sort_key,
        }
    }
}
