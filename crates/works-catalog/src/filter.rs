//! Pure filtering over a snapshot of works

use crate::criteria::{FilterCriteria, SearchScope};
use works_store::Work;

/// Year a work is filed under
///
/// Taken from `endDate` when present and non-empty, else `startDate`. The
/// year is the date's leading four ASCII digits; a date without them yields
/// no year.
#[must_use]
pub fn derived_year(work: &Work) -> Option<&str> {
    let date = [work.end_date.as_deref(), work.start_date.as_deref()]
        .into_iter()
        .flatten()
        .find(|d| !d.is_empty())?;

    let year = date.get(..4)?;
    year.bytes().all(|b| b.is_ascii_digit()).then_some(year)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_search(work: &Work, needle_lower: &str, scope: SearchScope) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    let third = match scope {
        SearchScope::Portfolio => &work.description,
        SearchScope::Admin => &work.category,
    };
    contains_ci(&work.title, needle_lower)
        || contains_ci(&work.client, needle_lower)
        || contains_ci(third, needle_lower)
}

fn passes(work: &Work, needle_lower: &str, criteria: &FilterCriteria) -> bool {
    matches_search(work, needle_lower, criteria.scope)
        && criteria.category.admits(Some(work.category.as_str()))
        && criteria.year.admits(derived_year(work))
}

/// Check a single work against the criteria
#[must_use]
pub fn matches(work: &Work, criteria: &FilterCriteria) -> bool {
    passes(work, &criteria.search_term.to_lowercase(), criteria)
}

/// Works passing every predicate, in snapshot order
#[must_use]
pub fn apply_filter(works: &[Work], criteria: &FilterCriteria) -> Vec<Work> {
    let needle = criteria.search_term.to_lowercase();
    works
        .iter()
        .filter(|w| passes(w, &needle, criteria))
        .cloned()
        .collect()
}
