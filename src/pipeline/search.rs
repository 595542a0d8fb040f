// file: src/pipeline/search.rs
// description: query -> fetch -> filter -> format -> write for web search exports

use crate::clients::SearchClient;
use crate::error::Result;
use crate::exporter::{FileWriter, JsonExporter, MarkdownFormatter};
use crate::models::{OutputDocument, SearchRequest};
use crate::pipeline::filter::ResultFilter;
use chrono::Local;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub fetched: usize,
    pub retained: usize,
    /// `None` when nothing survived filtering and no file was written
    pub path: Option<PathBuf>,
}

impl SearchOutcome {
    pub fn excluded(&self) -> usize {
        self.fetched - self.retained
    }
}

pub struct SearchPipeline<C: SearchClient> {
    client: C,
    formatter: MarkdownFormatter,
    writer: FileWriter,
}

impl<C: SearchClient> SearchPipeline<C> {
    pub fn new(client: C, formatter: MarkdownFormatter, writer: FileWriter) -> Self {
        Self {
            client,
            formatter,
            writer,
        }
    }

    pub async fn run(&self, request: &SearchRequest, format: OutputFormat) -> Result<SearchOutcome> {
        info!("Searching for: {}", request.query);

        let results = self.client.search(request).await?;
        let fetched = results.len();

        let retained = ResultFilter::from_request(request).apply(results);
        info!(
            "Fetched {} results, {} after filtering",
            fetched,
            retained.len()
        );

        if retained.is_empty() {
            warn!("No results found for '{}'", request.query);
            return Ok(SearchOutcome {
                fetched,
                retained: 0,
                path: None,
            });
        }

        let now = Local::now();
        let path = self
            .writer
            .timestamped_path(&request.query, format.extension(), now);

        let document = match format {
            OutputFormat::Markdown => {
                let mut document = OutputDocument::new(path)
                    .with_header(self.formatter.search_header(&request.query, now))
                    .with_footer(self.formatter.search_footer(retained.len()));
                document.extend_sections(
                    retained
                        .iter()
                        .enumerate()
                        .map(|(i, result)| self.formatter.format_result(i + 1, result)),
                );
                document
            }
            OutputFormat::Json => {
                OutputDocument::new(path).with_header(JsonExporter::default().render(&retained)?)
            }
        };

        let written = self.writer.write(&document)?;

        Ok(SearchOutcome {
            fetched,
            retained: retained.len(),
            path: Some(written),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::PipelineError;
    use crate::models::SearchResult;
    use crate::parser::MarkdownParser;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    struct StubClient {
        results: Vec<SearchResult>,
    }

    #[async_trait]
    impl SearchClient for StubClient {
        async fn search(&self, _request: &SearchRequest) -> Result<Vec<SearchResult>> {
            Ok(self.results.clone())
        }
    }

    struct RejectingClient;

    #[async_trait]
    impl SearchClient for RejectingClient {
        async fn search(&self, _request: &SearchRequest) -> Result<Vec<SearchResult>> {
            Err(PipelineError::auth("Exa", "invalid api key"))
        }
    }

    fn fixed_results() -> Vec<SearchResult> {
        vec![
            SearchResult::new("Thrive raises fund", "https://www.bloomberg.com/thrive", "First."),
            SearchResult::new("Thrive Capital", "https://en.wikipedia.org/wiki/Thrive", "Wiki."),
            SearchResult::new("Thrive valuation", "https://techcrunch.com/thrive", "Third."),
        ]
    }

    fn pipeline(client: StubClient, dir: &TempDir) -> SearchPipeline<StubClient> {
        SearchPipeline::new(client, MarkdownFormatter::default(), FileWriter::new(dir.path()))
    }

    #[tokio::test]
    async fn test_excluded_domain_is_absent_from_output() {
        let temp = TempDir::new().unwrap();
        let pipeline = pipeline(StubClient { results: fixed_results() }, &temp);

        let request = SearchRequest::builder("thrive capital")
            .num_results(3)
            .exclude_domains(["en.wikipedia.org"])
            .build()
            .unwrap();

        let outcome = pipeline.run(&request, OutputFormat::Markdown).await.unwrap();
        assert_eq!(outcome.fetched, 3);
        assert_eq!(outcome.retained, 2);
        assert_eq!(outcome.excluded(), 1);

        let path = outcome.path.unwrap();
        assert!(path.starts_with(temp.path()));
        assert_eq!(path.extension().unwrap(), "md");

        let content = fs::read_to_string(&path).unwrap();
        let parsed = MarkdownParser::new().parse(&content);

        let titles: Vec<&str> = parsed
            .headings
            .iter()
            .filter(|h| h.level == 2)
            .map(|h| h.text.as_str())
            .collect();
        assert_eq!(titles, vec!["1. Thrive raises fund", "2. Thrive valuation"]);

        let urls: Vec<&str> = parsed.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://www.bloomberg.com/thrive", "https://techcrunch.com/thrive"]
        );

        assert!(!content.contains("wikipedia"));
        assert!(content.starts_with("# Search Results: thrive capital"));
        assert!(content.ends_with("*Total results: 2*"));
    }

    #[tokio::test]
    async fn test_configured_exclusions_apply_unless_included() {
        let temp = TempDir::new().unwrap();
        let always_exclude = Config::default_config().search.always_exclude;

        let default_run = pipeline(StubClient { results: fixed_results() }, &temp);
        let request = SearchRequest::builder("thrive capital")
            .always_exclude(always_exclude.iter().cloned())
            .build()
            .unwrap();
        let outcome = default_run.run(&request, OutputFormat::Json).await.unwrap();
        let written: Vec<SearchResult> =
            serde_json::from_str(&fs::read_to_string(outcome.path.unwrap()).unwrap()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|r| !r.url.contains("wikipedia")));

        let included_run = pipeline(StubClient { results: fixed_results() }, &temp);
        let request = SearchRequest::builder("thrive capital wiki")
            .include_domains(["en.wikipedia.org"])
            .always_exclude(always_exclude.iter().cloned())
            .build()
            .unwrap();
        let outcome = included_run.run(&request, OutputFormat::Json).await.unwrap();
        let written: Vec<SearchResult> =
            serde_json::from_str(&fs::read_to_string(outcome.path.unwrap()).unwrap()).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].url, "https://en.wikipedia.org/wiki/Thrive");
    }

    #[tokio::test]
    async fn test_json_output() {
        let temp = TempDir::new().unwrap();
        let pipeline = pipeline(StubClient { results: fixed_results() }, &temp);
        let request = SearchRequest::builder("thrive")
            .exclude_domains(["wikipedia.org"])
            .build()
            .unwrap();

        let outcome = pipeline.run(&request, OutputFormat::Json).await.unwrap();
        let path = outcome.path.unwrap();
        assert_eq!(path.extension().unwrap(), "json");

        let written: Vec<SearchResult> =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[1].url, "https://techcrunch.com/thrive");
    }

    #[tokio::test]
    async fn test_no_results_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let pipeline = pipeline(StubClient { results: Vec::new() }, &temp);
        let request = SearchRequest::builder("nothing").build().unwrap();

        let outcome = pipeline.run(&request, OutputFormat::Markdown).await.unwrap();
        assert_eq!(outcome.path, None);
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_client_errors_surface_unchanged() {
        let temp = TempDir::new().unwrap();
        let pipeline = SearchPipeline::new(
            RejectingClient,
            MarkdownFormatter::default(),
            FileWriter::new(temp.path()),
        );
        let request = SearchRequest::builder("rust").build().unwrap();

        let err = pipeline
            .run(&request, OutputFormat::Markdown)
            .await
            .unwrap_err();
        assert!(err.is_auth());
    }
}
