// file: src/pipeline/video.rs
// description: video search, caption transcripts and generative summaries chained through listing files

use crate::clients::{TextGenerator, TranscriptSource, VideoSource};
use crate::config::GenerationSettings;
use crate::error::Result;
use crate::exporter::listing::{
    parse_transcript_listing, parse_video_listing, render_transcript_listing,
    render_video_listing,
};
use crate::exporter::{FileWriter, SummaryFormatter};
use crate::extractor::extract_video_id;
use crate::models::{OutputDocument, Video, VideoAnalysis, VideoRef, VideoTranscript};
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::pipeline::prompts::summary_prompt;
use crate::utils::validation::Validator;
use chrono::Local;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct VideoSettings {
    pub max_results: u32,
    pub request_delay: Duration,
    pub focus_topics: Vec<String>,
    pub generation: GenerationSettings,
    pub show_progress: bool,
    pub colored: bool,
}

#[derive(Debug, Clone)]
pub struct StageReport {
    pub stats: PipelineStats,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub videos: usize,
    pub listing: PathBuf,
    pub transcripts: StageReport,
    pub summaries: StageReport,
}

pub struct VideoPipeline {
    writer: FileWriter,
    settings: VideoSettings,
}

impl VideoPipeline {
    pub fn new(writer: FileWriter, settings: VideoSettings) -> Self {
        Self { writer, settings }
    }

    pub fn videos_path(&self, term: &str) -> PathBuf {
        self.term_path(term, "videos.txt")
    }

    pub fn transcripts_path(&self, term: &str) -> PathBuf {
        self.term_path(term, "transcripts.txt")
    }

    pub fn summaries_path(&self, term: &str) -> PathBuf {
        self.term_path(term, "summaries.md")
    }

    fn term_path(&self, term: &str, suffix: &str) -> PathBuf {
        self.writer.named_path(format!(
            "{}_{}",
            Validator::safe_file_stem(term, None),
            suffix
        ))
    }

    fn tracker(&self, total: usize) -> ProgressTracker {
        if self.settings.show_progress {
            ProgressTracker::with_color(total, self.settings.colored)
        } else {
            ProgressTracker::hidden(total)
        }
    }

    pub async fn search_videos(
        &self,
        source: &dyn VideoSource,
        term: &str,
    ) -> Result<(Vec<Video>, PathBuf)> {
        let term = Validator::validate_query(term)?;
        let max_results = Validator::validate_max_results(self.settings.max_results)?;
        info!("Searching videos for '{}'", term);

        let videos = source.search_videos(&term, max_results).await?;
        info!("Found {} videos", videos.len());

        let listing = render_video_listing(&term, &videos, Local::now());
        let path = self.writer.write_text(&self.videos_path(&term), &listing)?;

        Ok((videos, path))
    }

    /// A video whose captions cannot be fetched is recorded inline and counted as failed.
    pub async fn collect_transcripts(
        &self,
        source: &dyn TranscriptSource,
        term: &str,
    ) -> Result<StageReport> {
        let term = Validator::validate_query(term)?;
        let listing = self.writer.read_text(&self.videos_path(&term))?;
        let videos = parse_video_listing(&listing);
        info!("Fetching transcripts for {} videos", videos.len());

        let progress = self.tracker(videos.len());
        let mut transcripts = Vec::with_capacity(videos.len());

        for video in &videos {
            progress.set_message(video.title.clone());

            let (transcript, fetched) = self.fetch_one(source, video).await;
            if fetched {
                progress.inc_succeeded();
            } else {
                progress.inc_failed();
            }

            transcripts.push(VideoTranscript {
                title: video.title.clone(),
                url: video.url.clone(),
                transcript,
            });
        }

        let stats = progress.get_stats();
        progress.finish();

        let content = render_transcript_listing(&term, &transcripts);
        let path = self
            .writer
            .write_text(&self.transcripts_path(&term), &content)?;

        Ok(StageReport { stats, path })
    }

    async fn fetch_one(&self, source: &dyn TranscriptSource, video: &VideoRef) -> (String, bool) {
        let Some(video_id) = extract_video_id(&video.url) else {
            warn!("No video id in {}", video.url);
            return ("Could not extract video ID from URL".to_string(), false);
        };

        match source.fetch_transcript(&video_id).await {
            Ok(transcript) => (transcript, true),
            Err(e) => {
                warn!("Transcript for {} failed: {}", video_id, e);
                (format!("Could not fetch transcript: {}", e), false)
            }
        }
    }

    /// Sleeps the configured delay between requests, never after the last one.
    pub async fn summarize(&self, generator: &dyn TextGenerator, term: &str) -> Result<StageReport> {
        let term = Validator::validate_query(term)?;
        let content = self.writer.read_text(&self.transcripts_path(&term))?;
        let videos = parse_transcript_listing(&content);
        info!("Analyzing {} transcripts", videos.len());

        let progress = self.tracker(videos.len());
        let mut analyses = Vec::with_capacity(videos.len());

        for (i, video) in videos.iter().enumerate() {
            progress.set_message(format!("{}/{}: {}", i + 1, videos.len(), video.title));

            let prompt = summary_prompt(video, &self.settings.focus_topics);
            let analysis = match generator.generate(&prompt, &self.settings.generation).await {
                Ok(text) => {
                    progress.inc_succeeded();
                    text
                }
                Err(e) => {
                    warn!("Analysis of '{}' failed: {}", video.title, e);
                    progress.inc_failed();
                    format!("Error analyzing transcript: {}", e)
                }
            };

            analyses.push(VideoAnalysis {
                title: video.title.clone(),
                url: video.url.clone(),
                analysis,
            });

            if i + 1 < videos.len() && !self.settings.request_delay.is_zero() {
                debug!("Waiting {:?} before next analysis", self.settings.request_delay);
                tokio::time::sleep(self.settings.request_delay).await;
            }
        }

        let stats = progress.get_stats();
        progress.finish();

        let formatter = SummaryFormatter::new();
        let mut document =
            OutputDocument::new(self.summaries_path(&term)).with_header(formatter.header(&term));
        document.extend_sections(
            analyses
                .iter()
                .enumerate()
                .map(|(i, analysis)| formatter.format_analysis(i + 1, analysis)),
        );

        let path = self.writer.write(&document)?;
        Ok(StageReport { stats, path })
    }

    /// videos -> transcripts -> summaries, stopping at the first fatal error.
    pub async fn workflow(
        &self,
        videos: &dyn VideoSource,
        transcripts: &dyn TranscriptSource,
        generator: &dyn TextGenerator,
        term: &str,
    ) -> Result<WorkflowReport> {
        info!("[1/3] Searching videos");
        let (found, listing) = self.search_videos(videos, term).await?;

        info!("[2/3] Fetching transcripts");
        let transcripts = self.collect_transcripts(transcripts, term).await?;

        info!("[3/3] Summarizing transcripts");
        let summaries = self.summarize(generator, term).await?;

        Ok(WorkflowReport {
            videos: found.len(),
            listing,
            transcripts,
            summaries,
        })
    }
}
