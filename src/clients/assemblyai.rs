// file: src/clients/assemblyai.rs
// description: AssemblyAI upload, transcription request and status lookup
// reference: https://www.assemblyai.com/docs/api-reference/transcripts

use super::{SpeechToText, ensure_success, request_error};
use crate::error::{PipelineError, Result};
use crate::models::AudioTranscript;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const SERVICE: &str = "AssemblyAI";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Debug, Serialize)]
struct TranscriptRequest<'a> {
    audio_url: &'a str,
    speaker_labels: bool,
    auto_chapters: bool,
}

pub struct AssemblyAiClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl AssemblyAiClient {
    pub fn new(client: Client, api_url: impl Into<String>, api_key: String) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl SpeechToText for AssemblyAiClient {
    async fn upload(&self, audio: Vec<u8>) -> Result<String> {
        info!("Uploading {} bytes of audio", audio.len());

        let response = self
            .client
            .post(format!("{}/upload", self.api_url))
            .header("authorization", &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .body(audio)
            .send()
            .await
            .map_err(|e| request_error(SERVICE, e))?;

        let response = ensure_success(SERVICE, response).await?;
        let upload: UploadResponse = response.json().await.map_err(|e| {
            PipelineError::Serialization(format!("Failed to parse upload response: {}", e))
        })?;

        Ok(upload.upload_url)
    }

    async fn request_transcription(&self, audio_url: &str, chapters: bool) -> Result<String> {
        let request = TranscriptRequest {
            audio_url,
            speaker_labels: true,
            auto_chapters: chapters,
        };

        let response = self
            .client
            .post(format!("{}/transcript", self.api_url))
            .header("authorization", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| request_error(SERVICE, e))?;

        let response = ensure_success(SERVICE, response).await?;
        let transcript: AudioTranscript = response.json().await.map_err(|e| {
            PipelineError::Serialization(format!("Failed to parse transcript response: {}", e))
        })?;

        Ok(transcript.id)
    }

    async fn get_transcript(&self, transcript_id: &str) -> Result<AudioTranscript> {
        let response = self
            .client
            .get(format!("{}/transcript/{}", self.api_url, transcript_id))
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| request_error(SERVICE, e))?;

        let response = ensure_success(SERVICE, response).await?;

        response.json().await.map_err(|e| {
            PipelineError::Serialization(format!("Failed to parse transcript response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_request_body() {
        let body = serde_json::to_value(TranscriptRequest {
            audio_url: "https://cdn.assemblyai.com/upload/abc",
            speaker_labels: true,
            auto_chapters: false,
        })
        .unwrap();

        assert_eq!(body["audio_url"], "https://cdn.assemblyai.com/upload/abc");
        assert_eq!(body["speaker_labels"], true);
        assert_eq!(body["auto_chapters"], false);
    }

    #[test]
    fn test_upload_response() {
        let parsed: UploadResponse =
            serde_json::from_str(r#"{"upload_url": "https://cdn/x"}"#).unwrap();
        assert_eq!(parsed.upload_url, "https://cdn/x");
    }
}
