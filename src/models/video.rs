// file: src/models/video.rs
// description: video, transcript and analysis records for the video research pipeline
// reference: https://developers.google.com/youtube/v3/docs/videos

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub url: String,
    pub view_count: u64,
}

impl Video {
    pub fn new(id: impl Into<String>, title: impl Into<String>, view_count: u64) -> Self {
        let id = id.into();
        Self {
            url: format!("https://www.youtube.com/watch?v={}", id),
            id,
            title: title.into(),
            view_count,
        }
    }
}

/// A title/url pair read back from a listing file.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRef {
    pub title: String,
    pub url: String,
}

impl From<&Video> for VideoRef {
    fn from(video: &Video) -> Self {
        Self {
            title: video.title.clone(),
            url: video.url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoTranscript {
    pub title: String,
    pub url: String,
    pub transcript: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoAnalysis {
    pub title: String,
    pub url: String,
    pub analysis: String,
}
