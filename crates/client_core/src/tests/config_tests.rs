use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

#[test]
fn defaults_match_service_conventions() {
    let settings = ClientSettings::default();
    assert_eq!(settings.api_url, "http://127.0.0.1:8000");
    let timing = settings.timing();
    assert_eq!(timing.count_up, Duration::from_millis(600));
    assert_eq!(timing.gauge_delay, Duration::from_millis(200));
    assert_eq!(timing.gauge_max, 800.0);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = ClientSettings::default();
    settings
        .apply_file(
            "api_url = \"http://predictor.local:9000\"\ngauge_max = 1000\ncount_up_ms = 0\n",
            Path::new("predictor.toml"),
        )
        .expect("apply file");

    assert_eq!(settings.api_url, "http://predictor.local:9000");
    assert_eq!(settings.gauge_max, 1000.0);
    assert_eq!(settings.count_up_ms, 0);
    assert_eq!(settings.gauge_delay_ms, 200);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let mut settings = ClientSettings::default();
    let err = settings
        .apply_file("api_url = ", Path::new("broken.toml"))
        .expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn env_overrides_file_and_prefixed_name_wins() {
    let mut settings = ClientSettings::default();
    settings
        .apply_file("api_url = \"http://from-file:1\"", Path::new("predictor.toml"))
        .expect("apply file");
    settings.apply_env(env_from(&[
        ("API_URL", "http://from-env:2"),
        ("APP__API_URL", "http://from-app-env:3"),
        ("APP__GAUGE_DELAY_MS", "50"),
    ]));

    assert_eq!(settings.api_url, "http://from-app-env:3");
    assert_eq!(settings.gauge_delay_ms, 50);
}

#[test]
fn empty_and_unparseable_env_values_are_ignored() {
    let mut settings = ClientSettings::default();
    settings.apply_env(env_from(&[
        ("API_URL", "   "),
        ("APP__COUNT_UP_MS", "soon"),
        ("APP__GAUGE_MAX", "1200.5"),
    ]));

    assert_eq!(settings.api_url, "http://127.0.0.1:8000");
    assert_eq!(settings.count_up_ms, 600);
    assert_eq!(settings.gauge_max, 1200.5);
}

#[test]
fn api_url_must_parse() {
    let settings = ClientSettings {
        api_url: "not a url".into(),
        ..ClientSettings::default()
    };
    assert!(matches!(
        settings.api_url(),
        Err(ConfigError::InvalidApiUrl { .. })
    ));
}

#[test]
fn explicit_missing_file_is_a_read_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("predictor_missing_{suffix}.toml"));

    let err = load_settings_with(Some(&path), env_from(&[])).expect_err("missing file");
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn explicit_file_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("predictor_config_{suffix}.toml"));
    fs::write(&path, "fade_in_ms = 120\n").expect("write config");

    let settings = load_settings_with(Some(&path), env_from(&[])).expect("load");
    assert_eq!(settings.fade_in_ms, 120);
    assert_eq!(settings.api_url, "http://127.0.0.1:8000");

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn injected_env_overrides_explicit_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("predictor_layered_{suffix}.toml"));
    fs::write(&path, "api_url = \"http://from-file:1\"\n").expect("write config");

    let settings = load_settings_with(
        Some(&path),
        env_from(&[("APP__API_URL", "http://from-env:2")]),
    )
    .expect("load");
    assert_eq!(settings.api_url, "http://from-env:2");

    let err = load_settings_with(Some(&path), env_from(&[("API_URL", "not a url")]))
        .expect_err("invalid env url");
    assert!(matches!(err, ConfigError::InvalidApiUrl { .. }));

    fs::remove_file(path).expect("cleanup");
}
