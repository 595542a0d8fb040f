// file: src/exporter/transcript.rs
// description: markdown rendering of speaker-labelled audio transcripts
// reference: https://www.assemblyai.com/docs/speech-understanding/speaker-diarization

use crate::models::AudioTranscript;

/// Milliseconds as `mm:ss`, or `hh:mm:ss` once past an hour.
pub fn format_ms(ms: u64) -> String {
    let seconds = ms / 1000;
    let (minutes, secs) = (seconds / 60, seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

pub fn render_audio_transcript(transcript: &AudioTranscript, include_chapters: bool) -> String {
    let mut lines: Vec<String> = vec![
        "# Transcript for YouTube Video".to_string(),
        String::new(),
        "## Transcript Segments".to_string(),
        String::new(),
    ];

    match transcript.utterances.as_deref() {
        Some(utterances) if !utterances.is_empty() => {
            lines.extend(utterances.iter().map(|utterance| {
                format!(
                    "- **[{} - {}] Speaker {}:** {}",
                    format_ms(utterance.start),
                    format_ms(utterance.end),
                    utterance.speaker.as_deref().unwrap_or("Unknown"),
                    utterance.text
                )
            }));
        }
        _ => lines.push(
            transcript
                .text
                .clone()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| "No transcript available.".to_string()),
        ),
    }
    lines.push(String::new());

    if include_chapters
        && let Some(chapters) = transcript.chapters.as_deref()
        && !chapters.is_empty()
    {
        lines.push("## Chapters".to_string());
        lines.push(String::new());

        for (i, chapter) in chapters.iter().enumerate() {
            lines.push(format!("### Chapter {}", i + 1));
            lines.push(format!(
                "- **Time:** {} - {}",
                format_ms(chapter.start),
                format_ms(chapter.end)
            ));
            lines.push(format!(
                "- **Gist:** {}",
                chapter.gist.as_deref().unwrap_or("No gist")
            ));
            lines.push(format!(
                "- **Summary:** {}",
                chapter.summary.as_deref().unwrap_or("No summary")
            ));
            lines.push(String::new());
        }
    }

    lines.join("\n")
}
