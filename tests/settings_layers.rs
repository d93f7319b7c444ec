use quakebrush::attribute::{Attribute, Limits};
use quakebrush::error::BrushError;
use quakebrush::settings::Settings;

#[test]
fn defaults_without_a_file() {
    let settings = Settings::load(None).expect("settings");
    assert_eq!(settings.limits, Limits::default());
    assert_eq!(settings.log.filter, "info");
    assert!(settings.catalog.path.is_none());
    assert!(settings.limits.admits(Attribute::Longitude, 359.0));
    assert!(!settings.limits.admits(Attribute::Latitude, -90.5));
}

#[test]
fn file_overrides_defaults() {
    // Use a temp path and clean up afterwards
    let path = std::env::temp_dir().join("quakebrush_settings_test.toml");
    std::fs::write(
        &path,
        "[limits.depth]\nmin = 0.0\nmax = 50.0\n\n[server]\nbind = \"0.0.0.0:9000\"\n\n[catalog]\npath = \"events.json\"\n",
    )
    .unwrap();
    let settings = Settings::load(Some(path.as_path())).expect("settings");
    let _ = std::fs::remove_file(&path);
    assert_eq!(settings.limits.depth.max, 50.0);
    assert!(!settings.limits.admits(Attribute::Depth, -1.0));
    // untouched sections keep their defaults
    assert_eq!(settings.limits.magnitude, Limits::default().magnitude);
    assert_eq!(settings.server.bind, "0.0.0.0:9000");
    assert_eq!(settings.catalog.path.unwrap().to_str(), Some("events.json"));
}

#[test]
fn missing_file_is_a_config_error() {
    let path = std::env::temp_dir().join("quakebrush_no_such_settings.toml");
    let result = Settings::load(Some(path.as_path()));
    assert!(matches!(result, Err(BrushError::Config(_))));
}
