// file: src/pipeline/filter.rs
// description: domain-based filtering of search results

use crate::models::{SearchRequest, SearchResult};
use tracing::debug;

/// Drops results whose url mentions an excluded domain and, when include
/// domains are set, results that mention none of them. Order is preserved.
#[derive(Debug, Clone, Default)]
pub struct ResultFilter {
    exclude: Vec<String>,
    include: Vec<String>,
}

impl ResultFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_request(request: &SearchRequest) -> Self {
        Self::new()
            .exclude_domains(request.exclude_domains.iter().cloned())
            .include_domains(request.include_domains.iter().cloned())
    }

    pub fn exclude_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(domains.into_iter().map(Into::into));
        self
    }

    pub fn include_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(domains.into_iter().map(Into::into));
        self
    }

    pub fn keep(&self, result: &SearchResult) -> bool {
        if self.exclude.iter().any(|domain| result.url_contains(domain)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|domain| result.url_contains(domain))
    }

    pub fn apply(&self, results: Vec<SearchResult>) -> Vec<SearchResult> {
        let before = results.len();
        let kept: Vec<SearchResult> = results.into_iter().filter(|r| self.keep(r)).collect();

        debug!("Filter kept {} of {} results", kept.len(), before);
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn corpus() -> Vec<SearchResult> {
        [
            "https://en.wikipedia.org/wiki/Rust",
            "https://blog.rust-lang.org/2025/01/01/post.html",
            "https://EN.WIKIPEDIA.ORG/wiki/Ferris",
            "https://news.ycombinator.com/item?id=1",
            "https://www.bloomberg.com/news/thrive",
            "https://de.wikipedia.org/wiki/Rust",
            "https://github.com/rust-lang/rust",
        ]
        .iter()
        .enumerate()
        .map(|(i, url)| SearchResult::new(format!("Result {}", i), *url, ""))
        .collect()
    }

    #[test]
    fn test_exclusion_removes_matches_and_preserves_order() {
        let domains = [
            "wikipedia.org",
            "en.wikipedia.org",
            "rust-lang.org",
            "bloomberg.com",
            "nothing.example",
        ];

        for domain in domains {
            let input = corpus();
            let expected: Vec<SearchResult> = input
                .iter()
                .filter(|r| !r.url.to_lowercase().contains(domain))
                .cloned()
                .collect();

            let kept = ResultFilter::new().exclude_domains([domain]).apply(input);

            assert!(kept.iter().all(|r| !r.url_contains(domain)), "{}", domain);
            assert_eq!(kept, expected, "order changed for {}", domain);
        }
    }

    #[test]
    fn test_include_domains_restrict_results() {
        let kept = ResultFilter::new()
            .include_domains(["github.com", "bloomberg.com"])
            .apply(corpus());

        let urls: Vec<&str> = kept.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.bloomberg.com/news/thrive",
                "https://github.com/rust-lang/rust",
            ]
        );
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        assert_eq!(ResultFilter::new().apply(corpus()), corpus());
        assert!(ResultFilter::new().apply(Vec::new()).is_empty());
    }

    #[test]
    fn test_from_request() {
        let request = SearchRequest::builder("rust")
            .exclude_domains(["en.wikipedia.org"])
            .build()
            .unwrap();

        let kept = ResultFilter::from_request(&request).apply(corpus());
        assert_eq!(kept.len(), 5);
        assert!(kept.iter().any(|r| r.url.contains("de.wikipedia.org")));
    }
}
