//! Catalog view over an in-process repository

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use works_catalog::{
    apply_filter, CatalogView, FilterCriteria, SearchScope, SourceError, WorkSource,
};
use works_repository::{RepositoryError, WorkPatch};
use works_store::{Work, WorkId};
use works_test_utils::{new_work, sample_works, TempStore};

fn titles(works: &[Work]) -> Vec<&str> {
    works.iter().map(|w| w.title.as_str()).collect()
}

#[tokio::test]
async fn default_view_is_the_snapshot() {
    let temp = TempStore::with_works(&sample_works());
    let repo = temp.repository();

    let mut view = CatalogView::new();
    view.refresh(&repo).await.unwrap();

    assert_eq!(view.visible(), sample_works().as_slice());
    assert_eq!(view.summary().to_string(), "Showing 5 of 5 projects");
}

#[tokio::test]
async fn combined_criteria_narrow_the_grid() {
    let temp = TempStore::with_works(&sample_works());
    let mut view = CatalogView::new();
    view.refresh(&temp.repository()).await.unwrap();

    view.set_search_term("GRAPHICS");
    assert_eq!(
        titles(view.visible()),
        vec!["Nike Air Max Campaign", "Spotify Wrapped Graphics"]
    );

    view.set_year("2023");
    assert_eq!(titles(view.visible()), vec!["Spotify Wrapped Graphics"]);

    view.set_category("Commercial");
    assert!(view.visible().is_empty());
    assert_eq!(view.summary().to_string(), "Showing 0 of 5 projects");
}

#[tokio::test]
async fn admin_scope_searches_category_instead_of_description() {
    let temp = TempStore::with_works(&sample_works());
    let mut view = CatalogView::new();
    view.refresh(&temp.repository()).await.unwrap();

    view.set_search_term("showreel");
    assert_eq!(titles(view.visible()), vec!["Studio Reel"]);
    view.set_search_term("corporate");
    assert!(view.visible().is_empty());

    view.set_scope(SearchScope::Admin);
    assert_eq!(titles(view.visible()), vec!["Studio Reel"]);
    view.set_search_term("showreel");
    assert!(view.visible().is_empty());
    view.set_search_term("blue planet");
    assert_eq!(titles(view.visible()), vec!["Ocean Conservation Documentary"]);
}

#[tokio::test]
async fn year_filter_uses_start_date_when_end_is_missing() {
    let temp = TempStore::with_works(&sample_works());
    let mut view = CatalogView::new();
    view.refresh(&temp.repository()).await.unwrap();

    view.set_year("2022");
    assert_eq!(titles(view.visible()), vec!["Ocean Conservation Documentary"]);
    assert_eq!(view.year_options(), vec!["all", "2024", "2023", "2022"]);
}

#[tokio::test]
async fn refresh_after_mutation_reflects_store() {
    let temp = TempStore::with_works(&sample_works());
    let repo = temp.repository();
    let mut view = CatalogView::new();
    view.set_category("Animation");
    view.refresh(&repo).await.unwrap();
    assert_eq!(view.visible().len(), 2);

    repo.update(WorkId(1), WorkPatch::new().category("Animation"))
        .await
        .unwrap();
    repo.create(new_work("Fresh Cut")).await.unwrap();
    view.refresh(&repo).await.unwrap();

    assert_eq!(view.summary().to_string(), "Showing 3 of 6 projects");
}

#[tokio::test]
async fn corrupt_store_falls_back_to_empty() {
    let temp = TempStore::new();
    std::fs::create_dir_all(temp.path().parent().unwrap()).unwrap();
    std::fs::write(temp.path(), "{ not an array").unwrap();
    let repo = temp.repository();

    assert!(repo.fetch_all().await.is_err());

    let mut view = CatalogView::from_snapshot(sample_works());
    let err = view.refresh(&repo).await.unwrap_err();

    assert!(matches!(
        err,
        SourceError::Repository(RepositoryError::Storage(_))
    ));
    assert!(view.visible().is_empty());
    assert_eq!(view.category_options(), vec!["all"]);
}

fn arb_work() -> impl Strategy<Value = Work> {
    (
        1u64..1000,
        "[A-Za-z ]{1,12}",
        prop::sample::select(vec!["Commercial", "Animation", "Corporate"]),
        prop::option::of(prop::sample::select(vec![
            "2022-01-01",
            "2023-06-15",
            "2024-12-31",
            "",
            "n/a",
        ])),
    )
        .prop_map(|(id, title, category, end)| {
            Work::new(WorkId(id), title, "Client", "Desc", category, "Draft").with_dates(None, end)
        })
}

proptest! {
    #[test]
    fn unrestricted_filter_is_identity(works in prop::collection::vec(arb_work(), 0..20)) {
        prop_assert_eq!(apply_filter(&works, &FilterCriteria::new()), works);
    }

    #[test]
    fn filter_result_is_ordered_subsequence(
        works in prop::collection::vec(arb_work(), 0..20),
        term in "[a-z]{0,2}",
        year in prop::sample::select(vec!["all", "2022", "2023", "2024"]),
    ) {
        let criteria = FilterCriteria::new().with_search(term).with_year(year);
        let filtered = apply_filter(&works, &criteria);

        let mut remaining = works.iter();
        for work in &filtered {
            prop_assert!(remaining.any(|w| w == work));
        }
    }
}
