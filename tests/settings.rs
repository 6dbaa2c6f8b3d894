use ghls::Settings;
use ghls::models::DEFAULT_LANGUAGES;
use std::time::Duration;

#[test]
fn defaults_match_the_dashboard() {
    let s = Settings::default();
    assert_eq!(s.base_url, "https://api.github.com");
    assert_eq!(s.languages, DEFAULT_LANGUAGES.map(String::from).to_vec());
    assert_eq!(s.languages.first().map(String::as_str), Some("JavaScript"));
    assert_eq!(s.languages.last().map(String::as_str), Some("Swift"));
    assert_eq!(s.per_page, 100);
    assert_eq!(s.top_count, 5);
    assert_eq!(s.delay, Duration::from_millis(700));
    assert_eq!(s.ttl_secs, 3600);
}

#[test]
fn dashboard_from_settings_uses_the_configured_languages() {
    let settings = Settings {
        base_url: "http://127.0.0.1:9/".into(),
        languages: vec!["Rust".into(), "Zig".into()],
        ..Settings::default()
    };
    let dash = ghls::Dashboard::from_settings(&settings).unwrap();
    assert_eq!(dash.languages(), ["Rust".to_string(), "Zig".to_string()]);
    assert_eq!(dash.source().base_url, "http://127.0.0.1:9");
    assert!(dash.cache_entry().is_none());
}
