// file: src/pipeline/prompts.rs
// description: prompt templates for transcript analysis
// reference: https://ai.google.dev/gemini-api/docs/prompting-strategies

use crate::models::VideoTranscript;

const QUOTE_SLOTS: usize = 10;

fn topic_list(focus_topics: &[String]) -> String {
    focus_topics
        .iter()
        .map(|topic| format!("    - {}\n", topic))
        .collect()
}

fn quote_slots() -> String {
    (1..=QUOTE_SLOTS)
        .map(|i| format!("{}. \"[ quote]\"\n", i))
        .collect()
}

/// Asks for SUMMARY, QUOTES and URL sections for one video of a search.
pub fn summary_prompt(video: &VideoTranscript, focus_topics: &[String]) -> String {
    format!(
        "Analyze the following transcript from a YouTube video and provide:\n\
         1. A concise summary (1 paragraph) of the main points and key ideas of the video.\n\
         2. 10 or more relevant and impactful quotes from the transcript about the ideas below.\n\
         \x20  Any time the transcript mentions one of the keywords below, extract the exact quote and include it.\n\
         \x20  Please search for quotes about these ideas:\n\
         {topics}\
         3. Include the URL of the video in the analysis\n\
         \n\
         Title: {title}\n\
         Transcript:\n\
         {transcript}\n\
         \n\
         Please format your response as follows:\n\
         SUMMARY:\n\
         [Your summary here]\n\
         \n\
         QUOTES:\n\
         {quotes}\
         \n\
         URL:\n\
         {url}\n",
        topics = topic_list(focus_topics),
        title = video.title,
        transcript = video.transcript,
        quotes = quote_slots(),
        url = video.url,
    )
}

/// Same analysis for a standalone transcript file, without title or url.
pub fn single_file_prompt(transcript: &str, focus_topics: &[String]) -> String {
    format!(
        "Analyze the following transcript from a YouTube video and provide:\n\
         1. A concise summary (1 paragraph) of the main points and key ideas.\n\
         2. 10 or more relevant and impactful quotes from the transcript about the ideas below.\n\
         \x20  Any time the transcript mentions one of the keywords below, extract the exact quote and include it.\n\
         \x20  Please search for quotes about these ideas:\n\
         {topics}\
         \n\
         Transcript:\n\
         {transcript}\n\
         \n\
         Please format your response as follows:\n\
         SUMMARY:\n\
         [Your summary here]\n\
         \n\
         QUOTES:\n\
         {quotes}\
         {next}. [...]\n",
        topics = topic_list(focus_topics),
        transcript = transcript,
        quotes = quote_slots(),
        next = QUOTE_SLOTS + 1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics() -> Vec<String> {
        vec!["Hiring".to_string(), "Leadership".to_string()]
    }

    #[test]
    fn test_summary_prompt_carries_video_fields() {
        let video = VideoTranscript {
            title: "Startup School".to_string(),
            url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            transcript: "we hire slowly".to_string(),
        };

        let prompt = summary_prompt(&video, &topics());
        assert!(prompt.contains("Title: Startup School\n"));
        assert!(prompt.contains("Transcript:\nwe hire slowly\n"));
        assert!(prompt.contains("    - Hiring\n    - Leadership\n"));
        assert!(prompt.contains("10. \"[ quote]\"\n"));
        assert!(prompt.ends_with("URL:\nhttps://www.youtube.com/watch?v=dQw4w9WgXcQ\n"));
    }

    #[test]
    fn test_single_file_prompt() {
        let prompt = single_file_prompt("a long podcast", &topics());
        assert!(prompt.contains("Transcript:\na long podcast\n"));
        assert!(prompt.contains("SUMMARY:\n"));
        assert!(prompt.ends_with("11. [...]\n"));
        assert!(!prompt.contains("URL:"));
    }
}
