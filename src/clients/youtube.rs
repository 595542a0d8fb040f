// file: src/clients/youtube.rs
// description: YouTube Data API v3 video search with view statistics
// reference: https://developers.google.com/youtube/v3/docs/search/list

use super::{VideoSource, ensure_success, request_error};
use crate::error::{PipelineError, Result};
use crate::models::Video;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

const SERVICE: &str = "YouTube";

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: VideoSnippet,
    #[serde(default)]
    statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    /// the api encodes counts as strings
    #[serde(default)]
    view_count: Option<String>,
}

impl From<VideoItem> for Video {
    fn from(item: VideoItem) -> Self {
        let view_count = item
            .statistics
            .and_then(|s| s.view_count)
            .and_then(|count| count.parse().ok())
            .unwrap_or(0);

        Video::new(item.id, item.snippet.title, view_count)
    }
}

pub struct YoutubeClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl YoutubeClient {
    pub fn new(client: Client, api_url: impl Into<String>, api_key: String) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.api_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| request_error(SERVICE, e))?;

        let response = ensure_success(SERVICE, response).await?;

        response.json().await.map_err(|e| {
            PipelineError::Serialization(format!("Failed to parse YouTube {} response: {}", endpoint, e))
        })
    }
}

#[async_trait]
impl VideoSource for YoutubeClient {
    async fn search_videos(&self, term: &str, max_results: u32) -> Result<Vec<Video>> {
        let max_results = max_results.to_string();

        let search: SearchListResponse = self
            .get(
                "search",
                &[
                    ("q", term),
                    ("part", "id,snippet"),
                    ("maxResults", max_results.as_str()),
                    ("type", "video"),
                ],
            )
            .await?;

        let video_ids: Vec<String> = search
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();

        debug!("Search for {:?} matched {} videos", term, video_ids.len());

        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = video_ids.join(",");
        let details: VideoListResponse = self
            .get("videos", &[("part", "snippet,statistics"), ("id", ids.as_str())])
            .await?;

        let videos: Vec<Video> = details.items.into_iter().map(Video::from).collect();
        info!("Fetched details for {} videos", videos.len());

        Ok(videos)
    }
}
