//! Bundled demo scenarios and config run end to end

use std::path::PathBuf;

use endless_scroll::headless::scenario::Scenario;
use endless_scroll::{DeferPolicy, InfiniteScrollConfig, IndicatorStyle};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn test_long_feed_loads_two_pages() {
    let scenario = Scenario::from_path(&demo("long_feed.json")).unwrap();
    let report = scenario.run().unwrap();

    assert_eq!(report.handler_calls, 2);
    assert!(!report.loading);
    assert_eq!(report.content_height, 4000.0);
    assert_eq!(report.content_inset.bottom, 0.0);
    assert_eq!(report.transitions.len(), 4);
}

#[test]
fn test_short_list_waits_for_settle() {
    let scenario = Scenario::from_path(&demo("short_list.json")).unwrap();
    assert_eq!(scenario.config.defer_policy, DeferPolicy::ScrollSettled);

    let report = scenario.run().unwrap();
    assert_eq!(report.handler_calls, 1);
    assert_eq!(report.content_height, 500.0);
    assert_eq!(report.content_offset.y, 0.0);
}

#[test]
fn test_demo_config_loads() {
    let config = InfiniteScrollConfig::load(&demo("endless.toml")).unwrap();

    assert_eq!(config.trigger_offset, 568.0);
    assert_eq!(config.indicator_style, IndicatorStyle::Gray);
    assert_eq!(config.defer_policy, DeferPolicy::AfterDelay { delay_ms: 100 });
    assert_eq!(config, InfiniteScrollConfig::default().trigger_offset(568.0));
}

#[test]
fn test_missing_scenario_is_io_error() {
    let err = Scenario::from_path(&demo("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, endless_scroll::EndlessError::Io(_)));
}
