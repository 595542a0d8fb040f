// file: src/utils/validation.rs
// description: user input validation and text helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use chrono::{DateTime, NaiveDate};
use std::path::Path;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Page size ceiling of the video search api
pub const MAX_VIDEO_RESULTS: u32 = 50;

pub struct Validator;

impl Validator {
    pub fn validate_query(query: &str) -> Result<String> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(PipelineError::InvalidArgument(
                "Search query cannot be empty".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }

    pub fn validate_num_results(num_results: i64) -> Result<u32> {
        if num_results <= 0 {
            return Err(PipelineError::InvalidArgument(format!(
                "Number of results must be a positive integer, got {}",
                num_results
            )));
        }

        u32::try_from(num_results).map_err(|_| {
            PipelineError::InvalidArgument(format!("Number of results too large: {}", num_results))
        })
    }

    pub fn validate_max_results(max_results: u32) -> Result<u32> {
        if !(1..=MAX_VIDEO_RESULTS).contains(&max_results) {
            return Err(PipelineError::InvalidArgument(format!(
                "Max results must be between 1 and {}, got {}",
                MAX_VIDEO_RESULTS, max_results
            )));
        }
        Ok(max_results)
    }

    pub fn parse_date(value: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
            PipelineError::InvalidArgument(format!(
                "Invalid date format: {}. Use YYYY-MM-DD.",
                value
            ))
        })
    }

    pub fn normalize_domain(domain: &str) -> Result<String> {
        let normalized = domain.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(PipelineError::InvalidArgument(
                "Domain cannot be empty".to_string(),
            ));
        }

        if normalized.chars().any(char::is_whitespace) {
            return Err(PipelineError::InvalidArgument(format!(
                "Invalid domain: {}",
                domain
            )));
        }

        Ok(normalized)
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::InvalidArgument(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_content_not_empty(content: &str, path: &Path) -> Result<()> {
        if content.trim().is_empty() {
            return Err(PipelineError::InvalidArgument(format!(
                "File is empty: {}",
                path.display()
            )));
        }
        Ok(())
    }

    /// Replaces every non-alphanumeric character with `_`, optionally capped at `max_chars`.
    pub fn safe_file_stem(text: &str, max_chars: Option<usize>) -> String {
        let stem = text
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' });

        match max_chars {
            Some(limit) => stem.take(limit).collect(),
            None => stem.collect(),
        }
    }

    /// Truncates on a char boundary and appends `...` when anything was cut.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
            None => text.to_string(),
        }
    }

    /// Accepts full RFC 3339 timestamps as well as bare `YYYY-MM-DD` dates.
    pub fn parse_published_date(value: &str) -> Option<NaiveDate> {
        let value = value.trim();

        if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
            return Some(timestamp.date_naive());
        }

        value
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_num_results() {
        assert_eq!(Validator::validate_num_results(3).unwrap(), 3);
        for bad in [0, -1, -100, i64::MIN] {
            assert!(Validator::validate_num_results(bad)
                .unwrap_err()
                .is_invalid_argument());
        }
    }

    #[test]
    fn test_validate_max_results() {
        assert_eq!(Validator::validate_max_results(1).unwrap(), 1);
        assert_eq!(Validator::validate_max_results(50).unwrap(), 50);
        assert!(Validator::validate_max_results(0).unwrap_err().is_invalid_argument());
        assert!(Validator::validate_max_results(51).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_parse_date() {
        let date = Validator::parse_date("2025-02-28").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());

        assert!(Validator::parse_date("2025-02-30").is_err());
        assert!(Validator::parse_date("28/02/2025").is_err());
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(
            Validator::normalize_domain("  Example.COM ").unwrap(),
            "example.com"
        );
        assert!(Validator::normalize_domain("   ").is_err());
        assert!(Validator::normalize_domain("bad domain.com").is_err());
    }

    #[test]
    fn test_safe_file_stem() {
        assert_eq!(
            Validator::safe_file_stem("Thrive Capital Valuation 2025", Some(30)),
            "Thrive_Capital_Valuation_2025"
        );
        assert_eq!(Validator::safe_file_stem("a/b:c", None), "a_b_c");
        assert_eq!(Validator::safe_file_stem(&"x".repeat(50), Some(30)).len(), 30);
    }

    #[test]
    fn test_truncate_text_respects_char_boundaries() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(Validator::truncate_text("abcdef", 3), "abc...");
        assert_eq!(Validator::truncate_text("ééééé", 2), "éé...");
    }

    #[test]
    fn test_parse_published_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 11, 16).unwrap();
        assert_eq!(
            Validator::parse_published_date("2024-11-16T01:36:32.547Z"),
            Some(expected)
        );
        assert_eq!(Validator::parse_published_date("2024-11-16"), Some(expected));
        assert_eq!(Validator::parse_published_date("yesterday"), None);
    }

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://youtu.be/dQw4w9WgXcQ").is_ok());
        assert!(Validator::validate_url("youtu.be/dQw4w9WgXcQ").is_err());
    }
}
