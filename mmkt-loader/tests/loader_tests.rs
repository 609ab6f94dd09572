mod common;

use common::{Deal, Legs, MemoryExecutor, Tags, deal, ids};
use mmkt_loader::{LoadError, LoaderConfig, MismatchPolicy, RelationLoader};
use mmkt_types::{Criteria, Order, Page, PageRequest, Sort};
use pretty_assertions::assert_eq;

fn executor() -> MemoryExecutor {
    // Storage order differs from id order on purpose.
    MemoryExecutor::new(vec![
        deal(3, "KCB"),
        deal(1, "Absa"),
        deal(4, "Absa"),
        deal(2, "Equity"),
        deal(5, "NCBA"),
    ])
    .with_tags(&[(1, "overnight"), (3, "call"), (1, "secured"), (5, "term")])
    .with_legs(&[(2, 20), (2, 21), (4, 40)])
}

fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}

// ── load_all_with_bag ────────────────────────────────────────────

#[test]
fn load_all_orders_by_id_and_populates_bag() {
    let exec = executor();
    let loader = RelationLoader::new(&exec);

    let deals: Vec<Deal> = loader.load_all_with_bag(&Tags).unwrap();

    assert_eq!(ids(&deals), vec![1, 2, 3, 4, 5]);
    assert_eq!(sorted(deals[0].tags.clone()), vec!["overnight", "secured"]);
    assert!(deals[1].tags.is_empty());
    assert_eq!(deals[2].tags, vec!["call"]);
    assert!(deals[3].tags.is_empty());
    assert_eq!(deals[4].tags, vec!["term"]);
}

#[test]
fn load_all_issues_one_root_and_one_bag_query() {
    let exec = executor();
    let _: Vec<Deal> = RelationLoader::new(&exec).load_all_with_bag(&Tags).unwrap();
    assert_eq!(exec.queries(), (1, 0, 1));
    assert_eq!(*exec.last_bag_ids.borrow(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn each_bag_is_loaded_independently() {
    let exec = executor();
    let loader = RelationLoader::new(&exec);

    let with_legs: Vec<Deal> = loader.load_all_with_bag(&Legs).unwrap();

    assert_eq!(ids(&with_legs), vec![1, 2, 3, 4, 5]);
    let mut legs_of_2 = with_legs[1].legs.clone();
    legs_of_2.sort();
    assert_eq!(legs_of_2, vec![20, 21]);
    assert_eq!(with_legs[3].legs, vec![40]);
    assert!(with_legs.iter().all(|d| d.tags.is_empty()));
}

#[test]
fn load_all_with_no_roots_skips_bag_query() {
    let exec = MemoryExecutor::new(Vec::new());
    let deals: Vec<Deal> = RelationLoader::new(&exec).load_all_with_bag(&Tags).unwrap();
    assert!(deals.is_empty());
    assert_eq!(exec.queries(), (1, 0, 0));
}

#[test]
fn load_all_matching_filters_roots() {
    let exec = executor();
    let criteria = Criteria::none().eq("counterparty", "Absa");

    let deals: Vec<Deal> = RelationLoader::new(&exec)
        .load_all_matching_with_bag(&criteria, &Tags)
        .unwrap();

    assert_eq!(ids(&deals), vec![1, 4]);
    assert_eq!(*exec.last_bag_ids.borrow(), vec![1, 4]);
}

#[test]
fn unknown_filter_field_is_invalid_criteria() {
    let exec = executor();
    let criteria = Criteria::none().eq("desk", "fx");
    let err = RelationLoader::new(&exec)
        .load_all_matching_with_bag::<Deal, _>(&criteria, &Tags)
        .unwrap_err();
    assert!(matches!(err, LoadError::InvalidCriteria(_)));
    assert_eq!(exec.bag_queries.get(), 0);
}

// ── load_one_with_bag ────────────────────────────────────────────

#[test]
fn load_one_populates_bag() {
    let exec = executor();
    let deal: Deal = RelationLoader::new(&exec)
        .load_one_with_bag(&3, &Tags)
        .unwrap()
        .unwrap();
    assert_eq!(deal.id, 3);
    assert_eq!(deal.tags, vec!["call"]);
    assert_eq!(*exec.last_bag_ids.borrow(), vec![3]);
}

#[test]
fn load_one_with_empty_bag_is_still_returned() {
    let exec = executor();
    let deal: Option<Deal> = RelationLoader::new(&exec).load_one_with_bag(&2, &Tags).unwrap();
    assert_eq!(deal.map(|d| (d.id, d.tags.len())), Some((2, 0)));
}

#[test]
fn load_one_missing_returns_none_without_bag_query() {
    let exec = executor();
    let deal: Option<Deal> = RelationLoader::new(&exec).load_one_with_bag(&42, &Tags).unwrap();
    assert!(deal.is_none());
    assert_eq!(exec.queries(), (1, 0, 0));
}

// ── load_page_with_bag ───────────────────────────────────────────

#[test]
fn full_page_keeps_metadata_and_counts_once() {
    let exec = executor();
    let request = PageRequest::new(0, 2).unwrap();

    let page: Page<Deal> = RelationLoader::new(&exec)
        .load_page_with_bag(&Tags, &request)
        .unwrap();

    assert_eq!(ids(page.content()), vec![1, 2]);
    assert_eq!(page.offset(), 0);
    assert_eq!(page.limit(), 2);
    assert_eq!(page.total_elements(), 5);
    assert_eq!(sorted(page.content()[0].tags.clone()), vec!["overnight", "secured"]);
    assert_eq!(exec.queries(), (1, 1, 1));
    assert_eq!(*exec.last_bag_ids.borrow(), vec![1, 2]);
}

#[test]
fn last_short_page_skips_count_query() {
    let exec = executor();
    let request = PageRequest::new(4, 2).unwrap();

    let page: Page<Deal> = RelationLoader::new(&exec)
        .load_page_with_bag(&Tags, &request)
        .unwrap();

    assert_eq!(ids(page.content()), vec![5]);
    assert_eq!(page.total_elements(), 5);
    assert_eq!(exec.queries(), (1, 0, 1));
}

#[test]
fn page_past_the_end_counts_and_skips_bag_query() {
    let exec = executor();
    let request = PageRequest::new(50, 10).unwrap();

    let page: Page<Deal> = RelationLoader::new(&exec)
        .load_page_with_bag(&Tags, &request)
        .unwrap();

    assert!(page.content().is_empty());
    assert_eq!(page.total_elements(), 5);
    assert_eq!(page.offset(), 50);
    assert_eq!(exec.queries(), (1, 1, 0));
}

#[test]
fn page_respects_sort_with_id_tie_break() {
    let exec = executor();
    let request = PageRequest::new(0, 3)
        .unwrap()
        .with_sort(Sort::by(Order::asc("counterparty")));

    let page: Page<Deal> = RelationLoader::new(&exec)
        .load_page_with_bag(&Tags, &request)
        .unwrap();

    // Absa(1), Absa(4), Equity(2)
    assert_eq!(ids(page.content()), vec![1, 4, 2]);
    assert_eq!(*exec.last_bag_ids.borrow(), vec![1, 4, 2]);
}

#[test]
fn page_descending_sort() {
    let exec = executor();
    let request = PageRequest::new(1, 2)
        .unwrap()
        .with_sort(Sort::by(Order::desc("id")));

    let page: Page<Deal> = RelationLoader::new(&exec)
        .load_page_with_bag(&Tags, &request)
        .unwrap();

    assert_eq!(ids(page.content()), vec![4, 3]);
    assert_eq!(page.content()[1].tags, vec!["call"]);
}

#[test]
fn filtered_page_counts_filtered_roots() {
    let exec = executor();
    let criteria = Criteria::none().eq("counterparty", "Absa");
    let request = PageRequest::new(0, 1).unwrap();

    let page: Page<Deal> = RelationLoader::new(&exec)
        .load_page_matching_with_bag(&criteria, &Tags, &request)
        .unwrap();

    assert_eq!(ids(page.content()), vec![1]);
    assert_eq!(page.total_elements(), 2);
}

#[test]
fn page_above_max_size_is_rejected_before_any_query() {
    let exec = executor();
    let config = LoaderConfig {
        max_page_size: 10,
        ..LoaderConfig::default()
    };
    let request = PageRequest::new(0, 11).unwrap();

    let err = RelationLoader::with_config(&exec, config)
        .load_page_with_bag::<Deal, _>(&Tags, &request)
        .unwrap_err();

    assert!(matches!(err, LoadError::InvalidPageRequest(_)));
    assert_eq!(exec.queries(), (0, 0, 0));
}

#[test]
fn negative_offset_never_reaches_the_loader() {
    let err: LoadError = PageRequest::new(-5, 10).unwrap_err().into();
    assert!(matches!(err, LoadError::InvalidPageRequest(_)));
}

#[test]
fn unknown_sort_field_is_invalid_page_request() {
    let exec = executor();
    let request = PageRequest::new(0, 2)
        .unwrap()
        .with_sort(Sort::by(Order::asc("maturity")));
    let err = RelationLoader::new(&exec)
        .load_page_with_bag::<Deal, _>(&Tags, &request)
        .unwrap_err();
    assert!(matches!(err, LoadError::InvalidPageRequest(_)));
}

// ── Failure propagation ──────────────────────────────────────────

#[test]
fn root_failure_aborts_before_bag_query() {
    let mut exec = executor();
    exec.fail_roots = true;
    let err = RelationLoader::new(&exec).load_all_with_bag::<Deal, _>(&Tags).unwrap_err();
    assert!(matches!(err, LoadError::StorageUnavailable(_)));
    assert_eq!(exec.bag_queries.get(), 0);
}

#[test]
fn bag_failure_returns_no_partial_result() {
    let mut exec = executor();
    exec.fail_bags = true;
    let request = PageRequest::new(0, 2).unwrap();
    let result = RelationLoader::new(&exec).load_page_with_bag::<Deal, _>(&Tags, &request);
    assert!(matches!(result, Err(LoadError::StorageUnavailable(_))));
}

#[test]
fn stray_rows_are_dropped_by_default() {
    let mut exec = executor();
    exec.stray_tag_rows = vec![(77, "ghost".into())];
    let deals: Vec<Deal> = RelationLoader::new(&exec).load_all_with_bag(&Tags).unwrap();
    assert_eq!(deals.len(), 5);
    assert!(deals.iter().all(|d| !d.tags.contains(&"ghost".to_string())));
}

#[test]
fn stray_rows_fail_under_strict_config() {
    let mut exec = executor();
    exec.stray_tag_rows = vec![(77, "ghost".into())];
    let config = LoaderConfig {
        mismatch_policy: MismatchPolicy::Fail,
        ..LoaderConfig::default()
    };
    let err = RelationLoader::with_config(&exec, config)
        .load_all_with_bag::<Deal, _>(&Tags)
        .unwrap_err();
    assert!(matches!(err, LoadError::ReconciliationMismatch { bag: "tags", .. }));
}

// ── Configuration ────────────────────────────────────────────────

#[test]
fn config_defaults() {
    let config = LoaderConfig::default();
    assert_eq!(config.max_page_size, 2000);
    assert_eq!(config.mismatch_policy, MismatchPolicy::Drop);
}

#[test]
fn config_deserializes_with_defaults() {
    let config: LoaderConfig = serde_json::from_str(r#"{"mismatch_policy":"fail"}"#).unwrap();
    assert_eq!(config.mismatch_policy, MismatchPolicy::Fail);
    assert_eq!(config.max_page_size, 2000);
}
