//! Navigable URL state: the `q` and `page` query parameters that let a
//! search survive reload and back-navigation.

use reqwest::Url;
use serde::Serialize;

const PARSE_BASE: &str = "http://localhost/";

/// Search text and page as carried in the query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlState {
    pub query: String,
    pub page: usize,
}

impl Default for UrlState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
        }
    }
}

impl UrlState {
    pub fn new(query: impl Into<String>, page: usize) -> Self {
        Self {
            query: query.into(),
            page: page.max(1),
        }
    }

    /// Parse `?q=...&page=...` (leading `?` optional). Missing or invalid
    /// pages read as 1.
    pub fn parse(query_string: &str) -> Self {
        let Ok(mut url) = Url::parse(PARSE_BASE) else {
            return Self::default();
        };
        url.set_query(Some(query_string.trim_start_matches('?')));

        let mut state = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "q" => state.query = value.into_owned(),
                "page" => state.page = value.parse().ok().filter(|p| *p >= 1).unwrap_or(1),
                _ => {}
            }
        }
        state
    }

    /// Render as `?q=...&page=...`, omitting `q` when empty and `page` when 1.
    /// Returns an empty string when both are omitted.
    pub fn to_query_string(&self) -> String {
        let Ok(mut url) = Url::parse(PARSE_BASE) else {
            return String::new();
        };
        {
            let mut pairs = url.query_pairs_mut();
            if !self.query.is_empty() {
                pairs.append_pair("q", &self.query);
            }
            if self.page > 1 {
                pairs.append_pair("page", &self.page.to_string());
            }
        }

        match url.query() {
            Some(query) if !query.is_empty() => format!("?{query}"),
            _ => String::new(),
        }
    }
}

/// Receives every URL state the controller navigates to.
pub trait Navigator {
    fn push(&mut self, state: UrlState);
}

/// [`Navigator`] that keeps the full navigation history in memory.
#[derive(Debug, Clone, Default)]
pub struct HistoryNavigator {
    entries: Vec<UrlState>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&UrlState> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[UrlState] {
        &self.entries
    }
}

impl Navigator for HistoryNavigator {
    fn push(&mut self, state: UrlState) {
        self.entries.push(state);
    }
}
