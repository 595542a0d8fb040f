// file: src/exporter/markdown.rs
// description: markdown rendering of search results and tweets
// reference: https://commonmark.org

use crate::extractor::TweetCleaner;
use crate::models::SearchResult;
use crate::utils::validation::Validator;
use chrono::{DateTime, Local, NaiveDate};

pub const DISPLAY_DATE_FORMAT: &str = "%B %d, %Y";

#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    preview_chars: usize,
}

impl MarkdownFormatter {
    pub fn new(preview_chars: usize) -> Self {
        Self { preview_chars }
    }

    pub fn search_header(&self, query: &str, performed_at: DateTime<Local>) -> String {
        format!(
            "# Search Results: {}\n\n*Search performed on: {}*\n\n",
            query,
            performed_at.format("%Y-%m-%d %H:%M:%S")
        )
    }

    /// One `##` section per result; `index` is 1-based.
    pub fn format_result(&self, index: usize, result: &SearchResult) -> String {
        let preview = if result.content.trim().is_empty() {
            "No text content available".to_string()
        } else {
            Validator::truncate_text(&result.content, self.preview_chars)
        };

        let mut section = format!("## {}. {}\n\n", index, result.title);
        section.push_str(&format!("**URL:** [{0}]({0})\n\n", result.url));
        section.push_str(&format!("**Date:** {}\n\n", display_date(result.published_date)));
        if let Some(author) = &result.author {
            section.push_str(&format!("**Author:** {}\n\n", author));
        }
        section.push_str(&format!("**Preview:**\n\n{}\n\n", preview));
        section.push_str("---\n\n");

        section
    }

    pub fn search_footer(&self, total: usize) -> String {
        format!("*Total results: {}*", total)
    }

    pub fn tweets_header(&self, title: &str, collected_on: NaiveDate) -> String {
        format!(
            "# {}\n\n*Collected on {}*\n\n",
            title,
            collected_on.format(DISPLAY_DATE_FORMAT)
        )
    }

    pub fn format_tweet(&self, index: usize, result: &SearchResult) -> String {
        let author = result.first_path_segment().unwrap_or("Unknown");
        let content = TweetCleaner::clean(&result.content);

        format!(
            "## Tweet {index}: @{author}\n\n**Date:** {date}\n\n**URL:** [{url}]({url})\n\n**Content:**\n\n{content}\n\n---\n\n",
            index = index,
            author = author,
            date = display_date(result.published_date),
            url = result.url,
            content = content,
        )
    }

    pub fn tweets_footer(&self, total: usize) -> String {
        format!("*Total tweets collected: {}*", total)
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new(500)
    }
}

pub fn display_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_else(|| "Unknown date".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MarkdownParser;
    use pretty_assertions::assert_eq;

    fn sample() -> SearchResult {
        SearchResult::new(
            "Thrive Capital raises [fund] *IV*",
            "https://example.com/news?id=1&b=2",
            "Thrive Capital closed its latest fund.",
        )
        .with_published_date(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap())
    }

    #[test]
    fn test_section_contains_title_and_url_verbatim() {
        let formatter = MarkdownFormatter::default();
        let result = sample();
        let section = formatter.format_result(1, &result);

        assert!(section.contains(&result.title));
        assert!(section.contains(&result.url));
        assert!(section.contains("**Date:** March 04, 2025"));
        assert!(!section.contains("**Author:**"));
    }

    #[test]
    fn test_format_result_is_idempotent() {
        let formatter = MarkdownFormatter::new(10);
        let result = sample().with_author("Jane Doe");

        let first = formatter.format_result(2, &result);
        let second = formatter.format_result(2, &result);
        assert_eq!(first, second);
    }

    #[test]
    fn test_preview_truncation_and_placeholder() {
        let formatter = MarkdownFormatter::new(7);
        let section = formatter.format_result(1, &sample());
        assert!(section.contains("Thrive ..."));

        let empty = SearchResult::new("Empty", "https://e.com", "   ");
        let section = formatter.format_result(1, &empty);
        assert!(section.contains("No text content available"));
        assert!(section.contains("**Date:** Unknown date"));
    }

    #[test]
    fn test_rendered_structure() {
        let formatter = MarkdownFormatter::default();
        let result = SearchResult::new("Rust 2024", "https://blog.rust-lang.org/", "Edition.");
        let section = formatter.format_result(1, &result);

        let parsed = MarkdownParser::new().parse(&section);
        assert_eq!(parsed.headings[0].text, "1. Rust 2024");
        assert_eq!(parsed.links[0].url, "https://blog.rust-lang.org/");
    }

    #[test]
    fn test_format_tweet() {
        let formatter = MarkdownFormatter::default();
        let tweet = SearchResult::new(
            "",
            "https://x.com/sama/status/1",
            "We just shipped it https://t.co/xyz",
        );

        assert_eq!(
            formatter.format_tweet(3, &tweet),
            "## Tweet 3: @sama\n\n**Date:** Unknown date\n\n**URL:** [https://x.com/sama/status/1](https://x.com/sama/status/1)\n\n**Content:**\n\nWe just shipped it\n\n---\n\n"
        );
    }

    #[test]
    fn test_headers_and_footers() {
        let formatter = MarkdownFormatter::default();
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(
            formatter.tweets_header("AI Breakthrough Tweets", date),
            "# AI Breakthrough Tweets\n\n*Collected on January 09, 2025*\n\n"
        );
        assert_eq!(formatter.search_footer(2), "*Total results: 2*");
        assert_eq!(formatter.tweets_footer(0), "*Total tweets collected: 0*");
    }
}
