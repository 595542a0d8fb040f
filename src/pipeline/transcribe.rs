// file: src/pipeline/transcribe.rs
// description: video url -> audio -> speech-to-text -> speaker-labelled markdown

use crate::clients::assemblyai::SERVICE;
use crate::clients::{AudioDownloader, SpeechToText};
use crate::error::{PipelineError, Result};
use crate::exporter::{FileWriter, render_audio_transcript};
use crate::models::{AudioTranscript, TranscriptStatus};
use crate::utils::validation::Validator;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_polls: u32,
}

pub struct TranscribePipeline<S: SpeechToText> {
    downloader: AudioDownloader,
    client: S,
    writer: FileWriter,
    audio_dir: PathBuf,
    polling: PollSettings,
}

impl<S: SpeechToText> TranscribePipeline<S> {
    pub fn new(
        downloader: AudioDownloader,
        client: S,
        writer: FileWriter,
        audio_dir: impl Into<PathBuf>,
        polling: PollSettings,
    ) -> Self {
        Self {
            downloader,
            client,
            writer,
            audio_dir: audio_dir.into(),
            polling,
        }
    }

    pub async fn run(&self, url: &str, output: &Path, chapters: bool) -> Result<PathBuf> {
        Validator::validate_url(url)?;

        let audio_path = self.downloader.download_mp3(url, &self.audio_dir).await?;
        info!("Audio downloaded to {}", audio_path.display());

        let audio = tokio::fs::read(&audio_path)
            .await
            .map_err(|e| PipelineError::file(&audio_path, e))?;

        let upload_url = self.client.upload(audio).await?;
        info!("Audio uploaded");

        let transcript_id = self.client.request_transcription(&upload_url, chapters).await?;
        info!("Transcription requested, id {}", transcript_id);

        let transcript = wait_for_completion(&self.client, &transcript_id, &self.polling).await?;

        let markdown = render_audio_transcript(&transcript, chapters);
        self.writer.write_text(output, &markdown)
    }
}

/// Polls until the transcript completes, fails, or `max_polls` is exhausted.
pub async fn wait_for_completion(
    client: &dyn SpeechToText,
    transcript_id: &str,
    polling: &PollSettings,
) -> Result<AudioTranscript> {
    for attempt in 1..=polling.max_polls {
        let transcript = client.get_transcript(transcript_id).await?;

        match transcript.status {
            TranscriptStatus::Completed => return Ok(transcript),
            TranscriptStatus::Error => {
                return Err(PipelineError::network(
                    SERVICE,
                    format!(
                        "transcription failed: {}",
                        transcript.error.as_deref().unwrap_or("unknown error")
                    ),
                ));
            }
            status => {
                debug!("Poll {}/{}: status {:?}", attempt, polling.max_polls, status);
                info!("Transcription status: {:?}", status);
                tokio::time::sleep(polling.interval).await;
            }
        }
    }

    Err(PipelineError::network(
        SERVICE,
        format!(
            "transcript {} not completed after {} polls",
            transcript_id, polling.max_polls
        ),
    ))
}
