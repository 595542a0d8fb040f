// file: src/models/transcript.rs
// description: speech-to-text transcript returned by the transcription service
// reference: https://www.assemblyai.com/docs/api-reference/transcripts/get

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptStatus {
    Queued,
    Processing,
    Completed,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioTranscript {
    pub id: String,
    pub status: TranscriptStatus,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub utterances: Option<Vec<Utterance>>,
    #[serde(default)]
    pub chapters: Option<Vec<Chapter>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    #[serde(default)]
    pub speaker: Option<String>,
    /// milliseconds
    pub start: u64,
    pub end: u64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub start: u64,
    pub end: u64,
    #[serde(default)]
    pub gist: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}
