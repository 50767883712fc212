//! Filter criteria
//!
//! Dropdown values arrive as strings where `"all"` disables the predicate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dropdown value that disables its predicate
pub const ALL: &str = "all";

/// A category or year dropdown selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    /// No restriction
    #[default]
    All,
    /// Exact match required
    Only(String),
}

impl Selection {
    /// Check whether `value` passes this selection
    #[inline]
    #[must_use]
    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value == Some(wanted.as_str()),
        }
    }

    /// Check if the selection is unrestricted
    #[inline]
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<Selection> for String {
    fn from(value: Selection) -> Self {
        match value {
            Selection::All => ALL.to_string(),
            Selection::Only(v) => v,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(v) => f.write_str(v),
        }
    }
}

/// Fields the search term is matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Public portfolio grid: title, client, description
    #[default]
    Portfolio,
    /// Admin manage screen: title, client, category
    Admin,
}

/// Current filter state of a catalog view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive substring; empty matches everything
    pub search_term: String,
    /// Category dropdown
    pub category: Selection,
    /// Year dropdown
    pub year: Selection,
    /// Which fields the search term covers
    pub scope: SearchScope,
}

impl FilterCriteria {
    /// Unrestricted criteria
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With search term
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// With category selection
    #[must_use]
    pub fn with_category(mut self, category: impl Into<Selection>) -> Self {
        self.category = category.into();
        self
    }

    /// With year selection
    #[must_use]
    pub fn with_year(mut self, year: impl Into<Selection>) -> Self {
        self.year = year.into();
        self
    }

    /// With search scope
    #[must_use]
    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    /// Check if no predicate restricts the result
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.search_term.is_empty() && self.category.is_all() && self.year.is_all()
    }
}
