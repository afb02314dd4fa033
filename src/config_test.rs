use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_stage_env() {
    unsafe {
        std::env::remove_var("TILESTAGE_WIDTH_TILES");
        std::env::remove_var("TILESTAGE_HEIGHT_TILES");
        std::env::remove_var("TILESTAGE_SCREENSHOT_KEY");
        std::env::remove_var("TILESTAGE_BACKGROUND");
    }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_matches_consts() {
    let cfg = StageConfig::default();
    assert_eq!(cfg.width_tiles, DEFAULT_STAGE_WIDTH_TILES);
    assert_eq!(cfg.height_tiles, DEFAULT_STAGE_HEIGHT_TILES);
    assert_eq!(cfg.screenshot_key, DEFAULT_SCREENSHOT_KEY);
    assert_eq!(cfg.background, DEFAULT_BACKGROUND);
}

#[test]
fn default_is_valid() {
    assert!(StageConfig::default().validate().is_ok());
}

// =============================================================
// JSON
// =============================================================

#[test]
fn from_json_fills_missing_fields() {
    let cfg = StageConfig::from_json(r#"{ "width_tiles": 8 }"#).unwrap();
    assert_eq!(cfg.width_tiles, 8);
    assert_eq!(cfg.height_tiles, DEFAULT_STAGE_HEIGHT_TILES);
    assert_eq!(cfg.screenshot_key, DEFAULT_SCREENSHOT_KEY);
}

#[test]
fn from_json_all_fields() {
    let cfg = StageConfig::from_json(
        r##"{ "width_tiles": 4, "height_tiles": 3, "screenshot_key": "p", "background": "#123456" }"##,
    )
    .unwrap();
    assert_eq!(
        cfg,
        StageConfig {
            width_tiles: 4,
            height_tiles: 3,
            screenshot_key: "p".to_string(),
            background: "#123456".to_string(),
        }
    );
}

#[test]
fn from_json_rejects_malformed() {
    let err = StageConfig::from_json("{ width_tiles: 4").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn from_json_rejects_zero_dimension() {
    let err = StageConfig::from_json(r#"{ "width_tiles": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDimension { width_tiles: 0, .. }));
    assert!(err.to_string().contains("0x"));
}

// =============================================================
// Environment
// =============================================================

#[test]
fn from_env_defaults_and_overrides() {
    unsafe {
        clear_stage_env();
    }
    let cfg = StageConfig::from_env().unwrap();
    assert_eq!(cfg, StageConfig::default());

    unsafe {
        std::env::set_var("TILESTAGE_WIDTH_TILES", "12");
        std::env::set_var("TILESTAGE_HEIGHT_TILES", "not-a-number");
        std::env::set_var("TILESTAGE_SCREENSHOT_KEY", "F12");
    }
    let cfg = StageConfig::from_env().unwrap();
    assert_eq!(cfg.width_tiles, 12);
    assert_eq!(cfg.height_tiles, DEFAULT_STAGE_HEIGHT_TILES);
    assert_eq!(cfg.screenshot_key, "F12");

    unsafe { clear_stage_env() };
}
