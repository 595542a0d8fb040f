// file: src/extractor/captions.rs
// description: caption track discovery in watch pages and timed-text xml decoding
// reference: timed-text caption format served by the video platform

use crate::error::{PipelineError, Result};
use crate::extractor::patterns::{CAPTION_LINE, MARKUP_TAG, NUMERIC_ENTITY};
use serde::Deserialize;

const CAPTION_TRACKS_KEY: &str = "\"captionTracks\":";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    #[serde(default)]
    pub language_code: String,
    /// `asr` for auto-generated tracks
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Finds the `captionTracks` array embedded in a watch page.
pub fn find_caption_tracks(html: &str) -> Result<Vec<CaptionTrack>> {
    let start = html
        .find(CAPTION_TRACKS_KEY)
        .map(|idx| idx + CAPTION_TRACKS_KEY.len())
        .ok_or_else(|| {
            PipelineError::Transcript("Transcripts are disabled or unavailable".to_string())
        })?;

    let array = balanced_array(&html[start..]).ok_or_else(|| {
        PipelineError::Serialization("Malformed captionTracks array".to_string())
    })?;

    let tracks: Vec<CaptionTrack> = serde_json::from_str(array)?;
    Ok(tracks)
}

/// Returns the leading `[...]` of `input`, honouring nested brackets and string literals.
fn balanced_array(input: &str) -> Option<&str> {
    let input = input.trim_start();
    if !input.starts_with('[') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in input.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&input[..=idx]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Manual track in the first preferred language, then a generated one, then whatever comes first.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Option<&'a CaptionTrack> {
    let matches_language = |track: &CaptionTrack, lang: &str| {
        track.language_code == lang || track.language_code.starts_with(&format!("{}-", lang))
    };

    for lang in languages {
        if let Some(track) = tracks
            .iter()
            .find(|t| !t.is_generated() && matches_language(t, lang))
        {
            return Some(track);
        }
    }

    for lang in languages {
        if let Some(track) = tracks.iter().find(|t| matches_language(t, lang)) {
            return Some(track);
        }
    }

    tracks.first()
}

/// Decodes timed-text xml into one plain line per caption.
pub fn parse_timed_text(xml: &str) -> Vec<String> {
    CAPTION_LINE
        .captures_iter(xml)
        .filter_map(|caps| caps.get(2))
        .map(|body| {
            // bodies are escaped twice, e.g. `&amp;#39;`
            let once = decode_entities(body.as_str());
            let decoded = decode_entities(&once);
            MARKUP_TAG.replace_all(&decoded, "").trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn decode_entities(text: &str) -> String {
    let text = NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures| {
        let raw = &caps[1];
        let code = match raw.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => raw.parse().ok(),
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    text.replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn track(code: &str, kind: Option<&str>) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://captions.example/{}", code),
            language_code: code.to_string(),
            kind: kind.map(String::from),
        }
    }

    #[test]
    fn test_find_caption_tracks_with_nested_json() {
        let html = r#"var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://x/api?lang=en","name":{"runs":[{"text":"English [auto]"}]},"languageCode":"en","kind":"asr"}],"audioTracks":[]}}};"#;

        let tracks = find_caption_tracks(html).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].base_url, "https://x/api?lang=en");
        assert!(tracks[0].is_generated());
    }

    #[test]
    fn test_missing_caption_tracks() {
        let err = find_caption_tracks("<html>no captions</html>").unwrap_err();
        assert!(matches!(err, PipelineError::Transcript(_)));
    }

    #[test]
    fn test_select_track_prefers_manual_language_match() {
        let tracks = vec![
            track("de", None),
            track("en", Some("asr")),
            track("en-GB", None),
        ];
        let languages = vec!["en".to_string()];

        assert_eq!(select_track(&tracks, &languages).unwrap().language_code, "en-GB");

        let generated_only = vec![track("de", None), track("en", Some("asr"))];
        assert_eq!(
            select_track(&generated_only, &languages).unwrap().language_code,
            "en"
        );

        let fallback = vec![track("fr", None)];
        assert_eq!(select_track(&fallback, &languages).unwrap().language_code, "fr");
        assert!(select_track(&[], &languages).is_none());
    }

    #[test]
    fn test_parse_timed_text() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0" dur="2.1">it&amp;#39;s &lt;b&gt;great&lt;/b&gt;</text><text start="2.1" dur="1">   </text><text start="3.1" dur="1.5">Tom &amp;amp; Jerry</text></transcript>"#;

        assert_eq!(parse_timed_text(xml), vec!["it's great", "Tom & Jerry"]);
    }
}
