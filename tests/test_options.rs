//! Engine configuration tests.
//!
//! These tests do not touch any engine.

use dlk::EngineOptions;

#[test]
fn test_engine_options_defaults() {
    let opts = EngineOptions::default();
    assert_eq!(opts.initial_capacity, 256);
    assert_eq!(opts.max_objects, None);
}

#[test]
fn test_engine_options_from_json() {
    // Missing fields fall back to defaults
    let opts: EngineOptions =
        serde_json::from_str(r#"{"max_objects": 10}"#).expect("options should parse");
    assert_eq!(opts.initial_capacity, 256);
    assert_eq!(opts.max_objects, Some(10));

    let json = serde_json::to_string(&opts).expect("options should serialize");
    assert!(json.contains("\"max_objects\":10"), "unexpected json: {}", json);
}
