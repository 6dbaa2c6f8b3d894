#![allow(dead_code)]

use ghls::error::{FetchError, Result};
use ghls::models::{Owner, RateLimit, SearchBody};
use ghls::{LanguageQuery, RawSearchResult, RepositorySource, RepositorySummary};
use std::cell::RefCell;
use std::collections::HashMap;

/// What the fake source answers for one language.
#[derive(Clone)]
pub enum Reply {
    Items(Vec<(u64, u64)>),
    Limited,
    Invalid,
    Broken,
}

/// In-memory search source that records every query it receives.
#[derive(Default)]
pub struct FakeSource {
    replies: RefCell<HashMap<String, Reply>>,
    pub queries: RefCell<Vec<LanguageQuery>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, language: &str, reply: Reply) -> Self {
        self.set(language, reply);
        self
    }

    /// Change the answer for `language` on later requests.
    pub fn set(&self, language: &str, reply: Reply) {
        self.replies
            .borrow_mut()
            .insert(language.to_string(), reply);
    }

    pub fn calls(&self) -> usize {
        self.queries.borrow().len()
    }
}

pub fn repo(name: &str, stars: u64, forks: u64) -> RepositorySummary {
    RepositorySummary {
        name: name.to_string(),
        full_name: Some(format!("octo/{name}")),
        owner: Owner {
            login: "octo".to_string(),
        },
        html_url: format!("https://github.com/octo/{name}"),
        stargazers_count: stars,
        forks_count: forks,
        description: None,
        language: None,
    }
}

pub fn ok_result(items: Vec<RepositorySummary>) -> RawSearchResult {
    RawSearchResult {
        status: 200,
        rate_limit: RateLimit::default(),
        body: SearchBody {
            total_count: Some(items.len() as u64),
            incomplete_results: Some(false),
            items: Some(items),
            ..SearchBody::default()
        },
    }
}

pub fn limited_result() -> RawSearchResult {
    RawSearchResult {
        status: 403,
        rate_limit: RateLimit {
            limit: Some(10),
            remaining: Some(0),
            reset_at: None,
        },
        body: SearchBody {
            message: Some("API rate limit exceeded for 127.0.0.1.".to_string()),
            ..SearchBody::default()
        },
    }
}

pub fn invalid_result() -> RawSearchResult {
    RawSearchResult {
        status: 422,
        rate_limit: RateLimit::default(),
        body: SearchBody {
            message: Some("Validation Failed".to_string()),
            ..SearchBody::default()
        },
    }
}

impl RepositorySource for FakeSource {
    fn search(&self, query: &LanguageQuery) -> Result<RawSearchResult> {
        self.queries.borrow_mut().push(query.clone());
        let reply = self.replies.borrow().get(&query.language).cloned();
        match reply {
            Some(Reply::Items(pairs)) => Ok(ok_result(
                pairs
                    .iter()
                    .enumerate()
                    .map(|(i, (s, f))| repo(&format!("{}-{i}", query.language), *s, *f))
                    .collect(),
            )),
            Some(Reply::Limited) => Ok(limited_result()),
            Some(Reply::Invalid) => Ok(invalid_result()),
            Some(Reply::Broken) => Err(FetchError::Decode {
                url: "fake://search".to_string(),
                source: serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
            }),
            None => Ok(ok_result(vec![])),
        }
    }
}
