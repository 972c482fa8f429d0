#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn empty_document_yields_defaults() {
    let config = EngineConfig::from_json("{}").unwrap();
    assert!(config.renderer.auto_clear);
    assert_eq!(config.renderer.pixel_ratio, 1.0);
    assert_eq!(config.renderer.default_cursor, "default");
    assert_eq!(config.controls.drag_button, 2);
    assert_eq!(config.controls.rotate_button, 1);
    assert_eq!(config.controls.focus_duration_ms, FOCUS_DURATION_MS);
    assert!(config.pointer.prevent_context_menu);
}

#[test]
fn partial_override_keeps_other_defaults() {
    let config =
        EngineConfig::from_json(r#"{ "renderer": { "pixel_ratio": 2.0 }, "controls": { "allow_rotation": false } }"#)
            .unwrap();
    assert_eq!(config.renderer.pixel_ratio, 2.0);
    assert!(config.renderer.culling);
    assert!(!config.controls.allow_rotation);
    assert!(config.controls.allow_drag);
}

#[test]
fn malformed_json_is_parse_error() {
    let err = EngineConfig::from_json("{ renderer: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn zero_pixel_ratio_rejected() {
    let err = EngineConfig::from_json(r#"{ "renderer": { "pixel_ratio": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("pixel_ratio")));
}

#[test]
fn negative_selection_width_rejected() {
    let err = EngineConfig::from_json(r#"{ "renderer": { "selection_line_width": -1 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("selection_line_width")));
}

#[test]
fn negative_selection_dash_rejected() {
    let err = EngineConfig::from_json(r#"{ "renderer": { "selection_dash": -4 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("selection_dash")));
}

#[test]
fn negative_focus_duration_rejected() {
    let err = EngineConfig::from_json(r#"{ "controls": { "focus_duration_ms": -5 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("focus_duration_ms")));
}

#[test]
fn inverted_scale_range_rejected() {
    let err = EngineConfig::from_json(r#"{ "controls": { "min_scale": 10, "max_scale": 1 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("min_scale")));
}

#[test]
fn default_config_validates() {
    assert!(EngineConfig::default().validate().is_ok());
}
