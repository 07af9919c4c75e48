use ruleview_core::{
    CatalogValidator, MatchStatus, NodeKind, PatternValidationRequest, PatternValidationResult,
    RuleTreeView, TreeFilter, TypeFilter, ViewConfig, ViewConfigStore,
};
use ruleview_core::uuid::Uuid;
use ruleview_test_support::FakeValidator;
use ruleview_test_support::fixtures::{sales_result, sales_result_json, warehouse_paths};
use std::fs;

fn request() -> PatternValidationRequest {
    PatternValidationRequest::new(Uuid::new_v4(), "warehouse")
        .include("sales/public/**")
        .exclude("**/password*")
}

#[test]
fn view_loads_from_validator() {
    let validator = FakeValidator::new().with_result(sales_result());
    let mut view = RuleTreeView::default();
    let request = request();

    view.load(&validator, &request);

    assert_eq!(validator.requests(), vec![request]);
    assert_eq!(view.source().len(), 1);
    assert_eq!(view.warnings().len(), 1);

    let stats = view.stats();
    assert_eq!(stats.included, 4);
    assert_eq!(stats.excluded, 1);
    assert_eq!(stats.count(NodeKind::Table), 2);

    let ids: Vec<_> = view.visible_rows().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["sales", "sales/public"]);
}

#[test]
fn view_shows_excluded_leaves_under_matched_only() {
    let validator = FakeValidator::new().with_result(sales_result());
    let mut view = RuleTreeView::default();
    view.load(&validator, &request());
    view.expand_all();
    view.set_filter(TreeFilter::new().search("password").matched_only(true));

    let rows = view.visible_rows();
    let leaf = rows.last().unwrap();
    assert_eq!(leaf.id, "sales/public/customers/password_hash");
    assert_eq!(leaf.status, MatchStatus::Excluded);
    assert_eq!(leaf.matched_by.as_deref(), Some("exclude: **/password*"));
    assert_eq!(rows.len(), 4);
}

#[test]
fn validator_error_means_no_data() {
    let validator = FakeValidator::new().with_error("data source offline");
    let mut view = RuleTreeView::default();
    view.load(&validator, &request());

    assert!(view.is_empty());
    assert!(view.visible_rows().is_empty());
    assert_eq!(view.stats().total_nodes, 0);
}

#[test]
fn catalog_validator_feeds_view() {
    let catalog = CatalogValidator::new(warehouse_paths());
    let mut view = RuleTreeView::default();
    view.load(&catalog, &request());

    let stats = view.stats();
    assert_eq!(stats.included, 4);
    assert_eq!(stats.excluded, 1);
    assert!(view.warnings().is_empty());

    view.set_filter(TreeFilter::new().kind(TypeFilter::Kind(NodeKind::Table)));
    view.expand_all();
    let tables: Vec<_> = view
        .visible_rows()
        .into_iter()
        .filter(|r| r.kind == NodeKind::Table)
        .map(|r| r.name)
        .collect();
    assert_eq!(tables, vec!["customers", "orders"]);
}

#[test]
fn result_json_roundtrips_through_view() {
    let result: PatternValidationResult = serde_json::from_str(&sales_result_json()).unwrap();
    let mut view = RuleTreeView::default();
    view.rebuild_from_result(&result).unwrap();

    assert_eq!(view.stats().total_nodes, 9);
}

#[test]
fn config_store_saves_and_loads() {
    let dir = tempfile::tempdir().unwrap();
    let store = ViewConfigStore::from_path(dir.path().join("nested").join("config.json"));

    assert_eq!(store.load().unwrap(), ViewConfig::default());

    let config = ViewConfig {
        auto_expand_depth: 2,
        default_type_filter: TypeFilter::Kind(NodeKind::Column),
        matched_only: true,
        include_annotation: "in".to_string(),
        exclude_annotation: "out".to_string(),
    };
    store.save(&config).unwrap();

    assert_eq!(store.load().unwrap(), config);
}

#[test]
fn corrupt_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let store = ViewConfigStore::from_path(path);
    assert_eq!(store.load().unwrap(), ViewConfig::default());
}
