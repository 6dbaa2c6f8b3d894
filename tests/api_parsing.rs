use ghls::models::{RateLimit, SearchBody};
use ghls::{LanguageStats, RawSearchResult, Unavailable};

const SAMPLE: &str = r#"
{
  "total_count": 2,
  "incomplete_results": false,
  "items": [
    {
      "id": 724712,
      "name": "rust",
      "full_name": "rust-lang/rust",
      "owner": {"login": "rust-lang", "id": 5430905},
      "html_url": "https://github.com/rust-lang/rust",
      "description": "Empowering everyone to build reliable and efficient software.",
      "stargazers_count": 100,
      "forks_count": 10,
      "language": "Rust"
    },
    {
      "id": 1,
      "name": "nodesc",
      "full_name": "someone/nodesc",
      "owner": {"login": "someone"},
      "html_url": "https://github.com/someone/nodesc",
      "description": null,
      "stargazers_count": 50,
      "forks_count": 5,
      "language": null
    }
  ]
}
"#;

#[test]
fn parse_sample_search_response() {
    let body: SearchBody = serde_json::from_str(SAMPLE).unwrap();
    assert_eq!(body.total_count, Some(2));
    let items = body.items.as_ref().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].owner_login(), "rust-lang");
    assert_eq!(items[0].full_name.as_deref(), Some("rust-lang/rust"));
    assert_eq!(items[1].description, None);

    let stats = LanguageStats::from_items("Rust", items);
    assert_eq!(stats.total_stars, 150);
    assert_eq!(stats.total_forks, 15);
    assert_eq!(stats.average_stars, 75.0);
}

#[test]
fn rate_limit_body_has_no_items() {
    let body: SearchBody = serde_json::from_str(
        r#"{"message":"API rate limit exceeded for 1.2.3.4. (But here's the good news...)","documentation_url":"https://docs.github.com/rest/overview/resources-in-the-rest-api#rate-limiting"}"#,
    )
    .unwrap();
    assert!(body.items.is_none());

    // Even with a 200 status the message alone marks it as rate limited
    let raw = RawSearchResult {
        status: 200,
        rate_limit: RateLimit::default(),
        body,
    };
    assert!(matches!(
        raw.missing_items(),
        Some(Unavailable::RateLimited { .. })
    ));
}

#[test]
fn forbidden_status_without_message_is_rate_limited() {
    let raw = RawSearchResult {
        status: 429,
        rate_limit: RateLimit::default(),
        body: SearchBody::default(),
    };
    assert!(matches!(
        raw.missing_items(),
        Some(Unavailable::RateLimited { message: None, .. })
    ));
}

#[test]
fn present_items_are_never_classified() {
    let raw = RawSearchResult {
        status: 200,
        rate_limit: RateLimit::default(),
        body: serde_json::from_str(r#"{"total_count":0,"items":[]}"#).unwrap(),
    };
    assert!(raw.missing_items().is_none());
    assert_eq!(raw.items().map(|i| i.len()), Some(0));
}

#[test]
fn unavailable_reasons_render_for_humans() {
    let failed = Unavailable::Failed {
        status: 422,
        message: "Validation Failed".into(),
    };
    assert_eq!(failed.to_string(), "failed with HTTP 422: Validation Failed");
    let limited = Unavailable::RateLimited {
        message: None,
        reset_at: chrono::DateTime::from_timestamp(3600 * 13 + 60 * 5, 0),
    };
    assert_eq!(limited.to_string(), "rate limited (resets at 13:05:00 UTC)");
}
