// file: src/pipeline/tweets.rs
// description: collects recent tweets through the search client into a fixed markdown file

use crate::clients::SearchClient;
use crate::config::TweetsConfig;
use crate::error::{PipelineError, Result};
use crate::exporter::{FileWriter, MarkdownFormatter};
use crate::models::{OutputDocument, SearchRequest};
use crate::pipeline::filter::ResultFilter;
use chrono::{Duration, Local, NaiveDate};
use std::path::PathBuf;
use tracing::info;

pub struct TweetsPipeline<C: SearchClient> {
    client: C,
    settings: TweetsConfig,
    formatter: MarkdownFormatter,
    writer: FileWriter,
}

impl<C: SearchClient> TweetsPipeline<C> {
    pub fn new(
        client: C,
        settings: TweetsConfig,
        formatter: MarkdownFormatter,
        writer: FileWriter,
    ) -> Self {
        Self {
            client,
            settings,
            formatter,
            writer,
        }
    }

    pub fn build_request(&self, today: NaiveDate) -> Result<SearchRequest> {
        let published_after = Duration::try_days(self.settings.lookback_days)
            .and_then(|window| today.checked_sub_signed(window))
            .ok_or_else(|| {
                PipelineError::InvalidArgument(format!(
                    "Lookback of {} days is out of range",
                    self.settings.lookback_days
                ))
            })?;

        SearchRequest::builder(self.settings.query.clone())
            .num_results(self.settings.num_results)
            .include_domains(self.settings.include_domains.iter().cloned())
            .published_after(published_after)
            .build()
    }

    /// Writes the tweet file even when nothing was found.
    pub async fn run(&self) -> Result<(usize, PathBuf)> {
        let today = Local::now().date_naive();
        let request = self.build_request(today)?;

        info!("Searching for tweets: {}", request.query);
        let results = self.client.search(&request).await?;
        let tweets = ResultFilter::from_request(&request).apply(results);
        info!("Found {} tweets", tweets.len());

        let mut document = OutputDocument::new(self.writer.named_path(&self.settings.output_file))
            .with_header(self.formatter.tweets_header(&self.settings.title, today))
            .with_footer(self.formatter.tweets_footer(tweets.len()));
        document.extend_sections(
            tweets
                .iter()
                .enumerate()
                .map(|(i, tweet)| self.formatter.format_tweet(i + 1, tweet)),
        );

        let path = self.writer.write(&document)?;
        Ok((tweets.len(), path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::SearchResult;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingClient {
        seen: Mutex<Option<SearchRequest>>,
    }

    #[async_trait]
    impl SearchClient for RecordingClient {
        async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
            *self.seen.lock().unwrap() = Some(request.clone());
            Ok(vec![
                SearchResult::new("", "https://x.com/karpathy/status/1", "New model https://t.co/a"),
                SearchResult::new("", "https://example.com/blog", "not a tweet"),
            ])
        }
    }

    #[test]
    fn test_request_uses_lookback_window() {
        let temp = TempDir::new().unwrap();
        let settings = Config::default_config().tweets;
        let pipeline = TweetsPipeline::new(
            RecordingClient::default(),
            settings,
            MarkdownFormatter::default(),
            FileWriter::new(temp.path()),
        );

        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let request = pipeline.build_request(today).unwrap();

        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2025, 3, 5));
        assert!(request.include_domains.contains("x.com"));
        assert!(request.exclude_domains.is_empty());
    }

    #[test]
    fn test_oversized_lookback_is_rejected() {
        let temp = TempDir::new().unwrap();
        let mut settings = Config::default_config().tweets;
        settings.lookback_days = 1_000_000_000;
        let pipeline = TweetsPipeline::new(
            RecordingClient::default(),
            settings,
            MarkdownFormatter::default(),
            FileWriter::new(temp.path()),
        );

        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let err = pipeline.build_request(today).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn test_run_writes_fixed_file() {
        let temp = TempDir::new().unwrap();
        let settings = Config::default_config().tweets;
        let output_file = settings.output_file.clone();
        let pipeline = TweetsPipeline::new(
            RecordingClient::default(),
            settings,
            MarkdownFormatter::default(),
            FileWriter::new(temp.path()),
        );

        let (count, path) = pipeline.run().await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(path, temp.path().join(output_file));

        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("# AI Breakthrough Tweets\n\n*Collected on "));
        assert!(content.contains("## Tweet 1: @karpathy"));
        assert!(content.contains("New model\n\n"));
        assert!(!content.contains("example.com"));
        assert!(content.ends_with("*Total tweets collected: 1*"));
        assert!(pipeline.client.seen.lock().unwrap().is_some());
    }
}
