// file: src/extractor/video_id.rs
// description: video id extraction from watch, embed and short urls
// reference: https://developers.google.com/youtube/player_parameters

use crate::extractor::patterns::{SHORT_VIDEO_ID, VIDEO_ID};

pub fn extract_video_id(url: &str) -> Option<String> {
    [&*VIDEO_ID, &*SHORT_VIDEO_ID]
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        let cases = [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", Some("dQw4w9WgXcQ")),
            ("https://youtu.be/dQw4w9WgXcQ?si=abc", Some("dQw4w9WgXcQ")),
            ("https://www.youtube.com/embed/dQw4w9WgXcQ", Some("dQw4w9WgXcQ")),
            ("https://www.youtube.com/watch?feature=share&v=a-b_c1234XY", Some("a-b_c1234XY")),
            ("https://example.com/", None),
            ("not a url", None),
        ];

        for (url, expected) in cases {
            assert_eq!(extract_video_id(url).as_deref(), expected, "url: {}", url);
        }
    }
}
