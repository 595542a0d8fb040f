// file: src/clients/captions.rs
// description: caption transcript retrieval through the public watch page
// reference: timed-text endpoint advertised in the player response

use super::{TranscriptSource, ensure_success, request_error};
use crate::error::{PipelineError, Result};
use crate::extractor::captions::{find_caption_tracks, parse_timed_text, select_track};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

const SERVICE: &str = "YouTube captions";

pub struct CaptionClient {
    client: Client,
    watch_url: String,
    languages: Vec<String>,
}

impl CaptionClient {
    pub fn new(client: Client, watch_url: impl Into<String>, languages: Vec<String>) -> Self {
        Self {
            client,
            watch_url: watch_url.into(),
            languages,
        }
    }

    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| request_error(SERVICE, e))?;

        let response = ensure_success(SERVICE, response).await?;

        response
            .text()
            .await
            .map_err(|e| PipelineError::network(SERVICE, format!("failed to read body: {}", e)))
    }
}

#[async_trait]
impl TranscriptSource for CaptionClient {
    async fn fetch_transcript(&self, video_id: &str) -> Result<String> {
        let page = self.get_text(&self.watch_url, &[("v", video_id)]).await?;

        let tracks = find_caption_tracks(&page).map_err(|e| match e {
            PipelineError::Transcript(reason) => {
                PipelineError::Transcript(format!("{} for video {}", reason, video_id))
            }
            other => other,
        })?;

        let track = select_track(&tracks, &self.languages).ok_or_else(|| {
            PipelineError::Transcript(format!("No caption tracks listed for video {}", video_id))
        })?;

        debug!(
            "Using {} caption track for {}",
            track.language_code, video_id
        );

        let xml = self.get_text(&track.base_url, &[]).await?;
        let lines = parse_timed_text(&xml);

        if lines.is_empty() {
            return Err(PipelineError::Transcript(format!(
                "Caption track for video {} is empty",
                video_id
            )));
        }

        Ok(lines.join("\n"))
    }
}
