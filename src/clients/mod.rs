// file: src/clients/mod.rs
// description: external api clients and the traits the pipelines depend on
// reference: internal module structure

pub mod assemblyai;
pub mod captions;
pub mod exa;
pub mod gemini;
pub mod youtube;
pub mod yt_dlp;

pub use assemblyai::AssemblyAiClient;
pub use captions::CaptionClient;
pub use exa::ExaClient;
pub use gemini::GeminiClient;
pub use youtube::YoutubeClient;
pub use yt_dlp::AudioDownloader;

use crate::config::{GenerationSettings, HttpConfig};
use crate::error::{PipelineError, Result};
use crate::models::{AudioTranscript, SearchRequest, SearchResult, Video};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>>;
}

#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn search_videos(&self, term: &str, max_results: u32) -> Result<Vec<Video>>;
}

#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Plain transcript text, one caption line per line
    async fn fetch_transcript(&self, video_id: &str) -> Result<String>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, settings: &GenerationSettings) -> Result<String>;
}

#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Returns the hosted url of the uploaded audio
    async fn upload(&self, audio: Vec<u8>) -> Result<String>;

    /// Returns the transcript id
    async fn request_transcription(&self, audio_url: &str, chapters: bool) -> Result<String>;

    async fn get_transcript(&self, transcript_id: &str) -> Result<AudioTranscript>;
}

pub fn build_http_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| PipelineError::Config(format!("Failed to build HTTP client: {}", e)))
}

pub(crate) fn request_error(service: &str, err: reqwest::Error) -> PipelineError {
    if err.is_timeout() {
        PipelineError::network(service, format!("request timed out: {}", err))
    } else {
        PipelineError::network(service, format!("failed to send request: {}", err))
    }
}

/// Maps rejected credentials to `Auth` and every other non-success status to `Network`.
pub(crate) async fn ensure_success(service: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(classify_failure(service, status, &body))
}

fn classify_failure(service: &str, status: StatusCode, body: &str) -> PipelineError {
    let rejected_key = body.contains("API_KEY_INVALID") || body.contains("keyInvalid");

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN || rejected_key {
        PipelineError::auth(
            service,
            format!("credential rejected with status {}: {}", status, body),
        )
    } else {
        PipelineError::network(
            service,
            format!("request failed with status {}: {}", status, body),
        )
    }
}
