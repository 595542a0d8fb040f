// file: src/models/search_result.rs
// description: web search result record returned by the search client
// reference: https://docs.exa.ai/reference/search

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,

    pub url: String,

    /// Page text or snippet, empty when the service returned none
    pub content: String,

    pub published_date: Option<NaiveDate>,

    pub author: Option<String>,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
            published_date: None,
            author: None,
        }
    }

    pub fn with_published_date(mut self, date: NaiveDate) -> Self {
        self.published_date = Some(date);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Case-insensitive check whether the url mentions `domain`
    pub fn url_contains(&self, domain: &str) -> bool {
        self.url.to_lowercase().contains(&domain.to_lowercase())
    }

    /// First path segment of the url, e.g. the account handle of a tweet
    pub fn first_path_segment(&self) -> Option<&str> {
        self.url
            .split('/')
            .nth(3)
            .map(|segment| segment.split(['?', '#']).next().unwrap_or(segment))
            .filter(|segment| !segment.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_contains_is_case_insensitive() {
        let result = SearchResult::new("Rust", "https://EN.Wikipedia.org/wiki/Rust", "");
        assert!(result.url_contains("en.wikipedia.org"));
        assert!(!result.url_contains("rust-lang.org"));
    }

    #[test]
    fn test_first_path_segment() {
        let tweet = SearchResult::new("", "https://x.com/karpathy/status/123", "");
        assert_eq!(tweet.first_path_segment(), Some("karpathy"));

        let bare = SearchResult::new("", "https://x.com", "");
        assert_eq!(bare.first_path_segment(), None);

        let query = SearchResult::new("", "https://x.com/someone?lang=en", "");
        assert_eq!(query.first_path_segment(), Some("someone"));
    }
}
