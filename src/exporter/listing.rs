// file: src/exporter/listing.rs
// description: plain-text video and transcript listings exchanged between the video commands
// reference: internal file formats

use crate::models::{Video, VideoRef, VideoTranscript};
use chrono::{DateTime, Local};

const RULE_WIDTH: usize = 80;

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

pub fn render_video_listing(term: &str, videos: &[Video], generated_at: DateTime<Local>) -> String {
    let mut output = format!(
        "YouTube Search Results for: '{}'\nGenerated on: {}\n{}\n\n",
        term,
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        heavy_rule()
    );

    for (i, video) in videos.iter().enumerate() {
        output.push_str(&format!(
            "Video #{}\nTitle: {}\nURL: {}\nView Count: {}\n{}\n\n",
            i + 1,
            video.title,
            video.url,
            group_thousands(video.view_count),
            light_rule()
        ));
    }

    output
}

/// Short form echoed to the terminal after a video search.
pub fn render_video_summary(term: &str, videos: &[Video]) -> String {
    let mut output = format!(
        "Top {} most viewed videos containing '{}':\n{}\n",
        videos.len(),
        term,
        light_rule()
    );

    for (i, video) in videos.iter().enumerate() {
        output.push_str(&format!(
            "{}. Title: {}\n   URL: {}\n   Views: {}\n{}\n",
            i + 1,
            video.title,
            video.url,
            group_thousands(video.view_count),
            light_rule()
        ));
    }

    output
}

/// Reads `Title:`/`URL:` pairs back; a video is recorded once its URL line is seen.
pub fn parse_video_listing(content: &str) -> Vec<VideoRef> {
    let mut videos = Vec::new();
    let mut title: Option<String> = None;

    for line in content.lines().map(str::trim) {
        if let Some(value) = line.strip_prefix("Title: ") {
            title = Some(value.to_string());
        } else if let Some(url) = line.strip_prefix("URL: ") {
            videos.push(VideoRef {
                title: title.clone().unwrap_or_default(),
                url: url.to_string(),
            });
        }
    }

    videos
}

pub fn render_transcript_listing(term: &str, transcripts: &[VideoTranscript]) -> String {
    let mut output = format!(
        "YouTube Video Transcripts for Search Term: '{}'\n{}\n\n",
        term,
        heavy_rule()
    );

    for (i, entry) in transcripts.iter().enumerate() {
        output.push_str(&format!(
            "Video #{}\nTitle: {}\nURL: {}\n{}\n\nTRANSCRIPT:\n{}\n{}\n\n",
            i + 1,
            entry.title,
            entry.url,
            light_rule(),
            entry.transcript,
            heavy_rule()
        ));
    }

    output
}

/// Reads the transcript listing back. Videos without any transcript line are dropped.
pub fn parse_transcript_listing(content: &str) -> Vec<VideoTranscript> {
    #[derive(Default)]
    struct Pending {
        title: String,
        url: String,
        lines: Vec<String>,
        in_transcript: bool,
    }

    fn finish(pending: Pending, out: &mut Vec<VideoTranscript>) {
        if !pending.lines.is_empty() {
            out.push(VideoTranscript {
                title: pending.title,
                url: pending.url,
                transcript: pending.lines.join("\n"),
            });
        }
    }

    let mut videos = Vec::new();
    let mut current: Option<Pending> = None;

    for line in content.lines().map(str::trim) {
        if line.starts_with("Video #") {
            if let Some(done) = current.take() {
                finish(done, &mut videos);
            }
            current = Some(Pending::default());
            continue;
        }

        let Some(pending) = current.as_mut() else {
            continue;
        };

        if let Some(title) = line.strip_prefix("Title: ") {
            pending.title = title.to_string();
        } else if let Some(url) = line.strip_prefix("URL: ") {
            pending.url = url.to_string();
        } else if line == "TRANSCRIPT:" {
            pending.in_transcript = true;
        } else if pending.in_transcript && !line.is_empty() && !line.starts_with('=') {
            pending.lines.push(line.to_string());
        }
    }

    if let Some(done) = current {
        finish(done, &mut videos);
    }

    videos
}
