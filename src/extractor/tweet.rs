// file: src/extractor/tweet.rs
// description: cleanup of scraped tweet text for markdown output
// reference: tweet payloads returned by web search crawls

use crate::extractor::patterns::{EMBEDDED_JSON, JSON_SYMBOLS, TWEET_METADATA, URL, WHITESPACE};
use serde_json::{Map, Value};

pub const NO_TEXT: &str = "No text available";
pub const UNPARSEABLE: &str =
    "Complex tweet data that couldn't be parsed cleanly. Please check the original tweet.";

const MAX_PLAIN_LENGTH: usize = 500;

pub struct TweetCleaner;

impl TweetCleaner {
    pub fn clean(text: &str) -> String {
        if text.is_empty() {
            return NO_TEXT.to_string();
        }

        let mut text = URL.replace_all(text, "").into_owned();
        for pattern in TWEET_METADATA.iter() {
            text = pattern.replace_all(&text, "").into_owned();
        }

        if looks_like_json(&text)
            && let Some(extracted) = extract_profile_fields(&text)
        {
            return extracted;
        }

        let text = text.replace("\\n", " ").replace("\\r", " ");
        let text = WHITESPACE.replace_all(&text, " ").trim().to_string();

        if text.chars().count() > MAX_PLAIN_LENGTH && JSON_SYMBOLS.is_match(&text) {
            return UNPARSEABLE.to_string();
        }

        text
    }
}

fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim();
    (trimmed.starts_with('{') && text.contains('}'))
        || (trimmed.starts_with("\"{\"") && text.contains("}\""))
}

/// Pulls name, bio and tweet body out of an embedded profile/tweet object.
fn extract_profile_fields(text: &str) -> Option<String> {
    let json = EMBEDDED_JSON.captures(text)?.get(1)?.as_str();
    let parsed: Value = serde_json::from_str(json).ok()?;
    let object = parsed.as_object()?;

    let fields = [
        ("Name", lookup(object, "name")),
        ("Bio", lookup(object, "description")),
        ("Tweet", lookup(object, "full_text")),
    ];

    let useful: Vec<String> = fields
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| format!("**{}:** {}", label, v)))
        .collect();

    if useful.is_empty() {
        None
    } else {
        Some(useful.join("\n\n"))
    }
}

/// Top-level key first, then the same key under `legacy`.
fn lookup(object: &Map<String, Value>, key: &str) -> Option<String> {
    let value = match object.get(key) {
        Some(value) => value,
        None => object.get("legacy")?.as_object()?.get(key)?,
    };

    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(false) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_text() {
        assert_eq!(TweetCleaner::clean(""), NO_TEXT);
    }

    #[test]
    fn test_urls_and_whitespace_removed() {
        let cleaned = TweetCleaner::clean("Big news   https://t.co/abc123\\n today\n\n!");
        assert_eq!(cleaned, "Big news today !");
    }

    #[test]
    fn test_metadata_stripped() {
        let cleaned = TweetCleaner::clean("New model beats SOTA | created_at: Tue Mar 04 2025");
        assert_eq!(cleaned, "New model beats SOTA");

        let cleaned = TweetCleaner::clean("friends_count: 120\nShipping today");
        assert_eq!(cleaned, "Shipping today");
    }

    #[test]
    fn test_embedded_json_fields() {
        let raw = r#"{"legacy": {"name": "Ada", "description": "builder", "full_text": "shipped it"}}"#;
        assert_eq!(
            TweetCleaner::clean(raw),
            "**Name:** Ada\n\n**Bio:** builder\n\n**Tweet:** shipped it"
        );
    }

    #[test]
    fn test_long_unparseable_json_placeholder() {
        let raw = format!("{{\"broken\": [{}", "\"x\", ".repeat(200));
        assert_eq!(TweetCleaner::clean(&raw), UNPARSEABLE);
    }
}
