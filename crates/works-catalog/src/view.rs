//! Catalog view
//!
//! Holds the last fetched snapshot and the current criteria, and keeps the
//! visible projection in sync with both. The view never mutates the source
//! of truth; after a create/update/delete the caller refreshes it.

use crate::criteria::{FilterCriteria, SearchScope, Selection, ALL};
use crate::error::SourceError;
use crate::filter::{apply_filter, derived_year};
use crate::source::WorkSource;
use std::collections::BTreeSet;
use std::fmt;
use works_store::Work;

/// Counts shown under the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    /// Works passing the filter
    pub shown: usize,
    /// Works in the snapshot
    pub total: usize,
}

impl fmt::Display for FilterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} projects", self.shown, self.total)
    }
}

/// Filterable projection over a snapshot of works
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    all: Vec<Work>,
    criteria: FilterCriteria,
    visible: Vec<Work>,
}

impl CatalogView {
    /// Empty view with unrestricted criteria
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// View over an existing snapshot
    #[must_use]
    pub fn from_snapshot(works: Vec<Work>) -> Self {
        let mut view = Self::new();
        view.set_snapshot(works);
        view
    }

    /// Replace the snapshot with a fresh fetch from `source`
    ///
    /// On failure the snapshot becomes empty so the view keeps rendering,
    /// and the error is returned for the caller to report.
    ///
    /// # Errors
    /// `SourceError` from the source; the view has already fallen back
    pub async fn refresh<S>(&mut self, source: &S) -> Result<(), SourceError>
    where
        S: WorkSource + ?Sized,
    {
        match source.fetch_all().await {
            Ok(works) => {
                tracing::debug!(count = works.len(), "catalog refreshed");
                self.set_snapshot(works);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog fetch failed, showing empty collection");
                self.set_snapshot(Vec::new());
                Err(e)
            }
        }
    }

    /// Replace the snapshot
    pub fn set_snapshot(&mut self, works: Vec<Work>) {
        self.all = works;
        self.recompute();
    }

    /// Replace all criteria at once
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    /// Change the search term
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
        self.recompute();
    }

    /// Change the category dropdown
    pub fn set_category(&mut self, category: impl Into<Selection>) {
        self.criteria.category = category.into();
        self.recompute();
    }

    /// Change the year dropdown
    pub fn set_year(&mut self, year: impl Into<Selection>) {
        self.criteria.year = year.into();
        self.recompute();
    }

    /// Change which fields the search term covers
    pub fn set_scope(&mut self, scope: SearchScope) {
        self.criteria.scope = scope;
        self.recompute();
    }

    /// Works passing the current criteria
    #[inline]
    #[must_use]
    pub fn visible(&self) -> &[Work] {
        &self.visible
    }

    /// Last fetched snapshot
    #[inline]
    #[must_use]
    pub fn all(&self) -> &[Work] {
        &self.all
    }

    /// Current criteria
    #[inline]
    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Shown/total counts
    #[must_use]
    pub fn summary(&self) -> FilterSummary {
        FilterSummary {
            shown: self.visible.len(),
            total: self.all.len(),
        }
    }

    /// `"all"` followed by the snapshot's categories, sorted
    #[must_use]
    pub fn category_options(&self) -> Vec<String> {
        let categories: BTreeSet<&str> = self.all.iter().map(|w| w.category.as_str()).collect();
        std::iter::once(ALL)
            .chain(categories)
            .map(str::to_string)
            .collect()
    }

    /// `"all"` followed by the snapshot's years, newest first
    #[must_use]
    pub fn year_options(&self) -> Vec<String> {
        let years: BTreeSet<&str> = self.all.iter().filter_map(derived_year).collect();
        std::iter::once(ALL)
            .chain(years.into_iter().rev())
            .map(str::to_string)
            .collect()
    }

    fn recompute(&mut self) {
        self.visible = apply_filter(&self.all, &self.criteria);
    }
}
