// file: src/extractor/patterns.rs
// description: compiled regex patterns for video ids, tweet cleanup and caption markup
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Video identifiers
    pub static ref VIDEO_ID: Regex = Regex::new(
        r"(?:v=|/)([0-9A-Za-z_-]{11})"
    ).expect("VIDEO_ID regex is valid");

    pub static ref SHORT_VIDEO_ID: Regex = Regex::new(
        r"youtu\.be/([0-9A-Za-z_-]{11})"
    ).expect("SHORT_VIDEO_ID regex is valid");

    // Tweet text
    pub static ref URL: Regex = Regex::new(
        r"https?://\S+"
    ).expect("URL regex is valid");

    pub static ref EMBEDDED_JSON: Regex = Regex::new(
        r"(\{.*\})"
    ).expect("EMBEDDED_JSON regex is valid");

    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).expect("WHITESPACE regex is valid");

    pub static ref JSON_SYMBOLS: Regex = Regex::new(
        r#"[{}\[\]"\\]"#
    ).expect("JSON_SYMBOLS regex is valid");

    /// Profile metadata scraped alongside tweet bodies, removed in order
    pub static ref TWEET_METADATA: Vec<Regex> = [
        r"\|\s*created_at:.*?(\||$)",
        r"\|\s*favorite_count:.*?(\||$)",
        r"\|\s*lang:.*?(\||$)",
        r"\|\s*profile_url:.*?(\||$)",
        r"\|\s*name:.*?(\||$)",
        r"\|\s*favourites_count:.*?(\||$)",
        r"\|\s*followers_count:.*?(\||$)",
        r"\|\s*friends_count:.*?(\||$)",
        r"\|\s*statuses_count:.*?(\||$)",
        r"\|\s*media_count:.*?(\||$)",
        r"created_at:.*?(\n|$)",
        r"favourites_count:.*?(\n|$)",
        r"friends_count:.*?(\n|$)",
        r"name:.*?(\n|$)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("TWEET_METADATA regex is valid"))
    .collect();

    // Caption markup
    pub static ref CAPTION_LINE: Regex = Regex::new(
        r#"(?s)<text start="([^"]*)"[^>]*>(.*?)</text>"#
    ).expect("CAPTION_LINE regex is valid");

    pub static ref MARKUP_TAG: Regex = Regex::new(
        r"<[^>]+>"
    ).expect("MARKUP_TAG regex is valid");

    pub static ref NUMERIC_ENTITY: Regex = Regex::new(
        r"&#(x[0-9a-fA-F]+|[0-9]+);"
    ).expect("NUMERIC_ENTITY regex is valid");
}
