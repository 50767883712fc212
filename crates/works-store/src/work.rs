//! Portfolio work record
//!
//! The persisted shape of one portfolio entry. Keys are camelCase on disk and
//! absent optional fields are omitted, so a file written by the store reads
//! back and re-serializes byte for byte.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned work identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkId(pub u64);

impl WorkId {
    /// Raw integer value
    #[inline]
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for WorkId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for WorkId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// One portfolio entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    /// Unique id, immutable once assigned
    pub id: WorkId,
    /// Project title
    pub title: String,
    /// Client name
    pub client: String,
    /// Free-form description
    pub description: String,
    /// Category label, e.g. "Commercial"
    pub category: String,
    /// Opaque status label, e.g. "Completed"
    pub status: String,
    /// Budget as entered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    /// Start date, conventionally `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// End date, conventionally `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Shooting location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Awards text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    /// Image URLs in display order
    #[serde(default)]
    pub images: Vec<String>,
}

impl Work {
    /// Create a work with the required fields set and everything else empty
    #[must_use]
    pub fn new(
        id: WorkId,
        title: impl Into<String>,
        client: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            client: client.into(),
            description: description.into(),
            category: category.into(),
            status: status.into(),
            budget: None,
            start_date: None,
            end_date: None,
            location: None,
            awards: None,
            images: Vec::new(),
        }
    }

    /// With start and end dates
    #[must_use]
    pub fn with_dates(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_date = start.map(str::to_string);
        self.end_date = end.map(str::to_string);
        self
    }

    /// With image URLs
    #[must_use]
    pub fn with_images<I, T>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }
}
