// Tests for query-string configuration overrides.

use log::LevelFilter;
use ripple_core::config::{parse_query, GridConfig};
use ripple_core::constants::{RIPPLES_PATH, SNAPSHOT_LIMIT, SNAPSHOT_LIMIT_MAX};
use ripple_core::{AppConfig, ControlScheme, PlacementStrategy};

#[test]
fn defaults() {
    let config = AppConfig::default();
    assert_eq!(config.collection, RIPPLES_PATH);
    assert_eq!(config.snapshot_limit, SNAPSHOT_LIMIT);
    assert_eq!(config.controls, ControlScheme::Orbit);
    assert!(config.placement.uses_ghost());
    assert_eq!(config.grid, Some(GridConfig::default()));
    assert_eq!(config.log_level, LevelFilter::Info);
    assert!(config.auth_token.is_none());
}

#[test]
fn query_overrides_everything_it_names() {
    let config = AppConfig::from_query(
        "?db=https%3A%2F%2Fdemo.firebaseio.com&auth=t0k&path=/walls/&limit=25\
         &controls=fly&placement=raycast&grid=off&log=debug",
    );
    assert_eq!(config.database_url, "https://demo.firebaseio.com");
    assert!(config.uses_remote_store());
    assert_eq!(config.auth_token.as_deref(), Some("t0k"));
    assert_eq!(config.collection, "walls");
    assert_eq!(config.snapshot_limit, 25);
    assert_eq!(config.controls, ControlScheme::Fly);
    assert!(matches!(config.placement, PlacementStrategy::Raycast { .. }));
    assert_eq!(config.grid, None);
    assert_eq!(config.log_level, LevelFilter::Debug);
}

#[test]
fn limit_is_clamped() {
    assert_eq!(AppConfig::from_query("limit=0").snapshot_limit, 1);
    assert_eq!(
        AppConfig::from_query("limit=999999").snapshot_limit,
        SNAPSHOT_LIMIT_MAX
    );
}

#[test]
fn invalid_values_keep_defaults() {
    let config = AppConfig::from_query(
        "limit=lots&controls=joystick&placement=teleport&grid=maybe&log=loud&path=/&colour=red",
    );
    assert_eq!(config, AppConfig::default());
}

#[test]
fn empty_db_means_sandbox() {
    let config = AppConfig::from_query("?db=");
    assert!(!config.uses_remote_store());
    assert!(AppConfig::from_query("?auth=").auth_token.is_none());
}

#[test]
fn grid_can_be_turned_back_on() {
    let mut config = AppConfig::from_query("grid=off");
    config.apply_query("grid=on");
    assert_eq!(config.grid, Some(GridConfig::default()));
}

#[test]
fn query_pairs_are_decoded() {
    assert_eq!(
        parse_query("?a=hello+world%21&b&=c&&d=50%"),
        vec![
            ("a".to_string(), "hello world!".to_string()),
            ("b".to_string(), String::new()),
            (String::new(), "c".to_string()),
            ("d".to_string(), "50%".to_string()),
        ]
    );
}

#[test]
fn truncated_escapes_stay_literal() {
    assert_eq!(
        parse_query("a=%&b=%4&c=%zz1"),
        vec![
            ("a".to_string(), "%".to_string()),
            ("b".to_string(), "%4".to_string()),
            ("c".to_string(), "%zz1".to_string()),
        ]
    );
}

#[test]
fn multi_byte_escapes_decode_as_utf8() {
    assert_eq!(parse_query("t=%E2%82%AC")[0].1, "€");
    // An incomplete sequence becomes one replacement character.
    assert_eq!(parse_query("t=%E2%82")[0].1, "\u{FFFD}");
    assert_eq!(parse_query("t=%E2%82x")[0].1, "\u{FFFD}x");
}

#[test]
fn db_and_auth_are_taken_verbatim() {
    let config = AppConfig::from_query("?db=https%3A%2F%2Fdemo.firebaseio.com&auth=tok%2Ben");
    assert_eq!(config.database_url, "https://demo.firebaseio.com");
    assert_eq!(config.auth_token.as_deref(), Some("tok+en"));
    assert!(config.uses_remote_store());
}
