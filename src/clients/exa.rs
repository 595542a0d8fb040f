// file: src/clients/exa.rs
// description: Exa web search API integration
// reference: https://docs.exa.ai/reference/search

use super::{SearchClient, ensure_success, request_error};
use crate::error::{PipelineError, Result};
use crate::models::{SearchRequest, SearchResult};
use crate::utils::validation::Validator;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const SERVICE: &str = "Exa";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaSearchRequest<'a> {
    query: &'a str,
    num_results: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    include_domains: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exclude_domains: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_published_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_published_date: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    use_autoprompt: bool,
    contents: ExaContents,
}

#[derive(Debug, Serialize)]
struct ExaContents {
    text: bool,
}

#[derive(Debug, Deserialize)]
struct ExaSearchResponse {
    #[serde(default)]
    results: Vec<ExaResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExaResult {
    #[serde(default)]
    title: Option<String>,
    url: String,
    #[serde(default)]
    published_date: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl From<ExaResult> for SearchResult {
    fn from(raw: ExaResult) -> Self {
        let title = raw
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "No Title".to_string());

        SearchResult {
            title,
            url: raw.url,
            content: raw.text.unwrap_or_default(),
            published_date: raw
                .published_date
                .as_deref()
                .and_then(Validator::parse_published_date),
            author: raw.author.filter(|a| !a.trim().is_empty()),
        }
    }
}

pub struct ExaClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ExaClient {
    pub fn new(client: Client, api_url: impl Into<String>, api_key: String) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key,
        }
    }

    fn build_body<'a>(request: &'a SearchRequest) -> ExaSearchRequest<'a> {
        ExaSearchRequest {
            query: &request.query,
            num_results: request.num_results,
            include_domains: request.include_domains.iter().map(String::as_str).collect(),
            exclude_domains: request.exclude_domains.iter().map(String::as_str).collect(),
            start_published_date: request.start_date.map(iso_midnight),
            end_published_date: request.end_date.map(iso_midnight),
            use_autoprompt: request.autoprompt,
            contents: ExaContents { text: true },
        }
    }
}

fn iso_midnight(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

#[async_trait]
impl SearchClient for ExaClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        let body = Self::build_body(request);

        debug!(
            "Requesting {} results from Exa for query {:?}",
            request.num_results, request.query
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| request_error(SERVICE, e))?;

        let response = ensure_success(SERVICE, response).await?;

        let parsed: ExaSearchResponse = response.json().await.map_err(|e| {
            PipelineError::Serialization(format!("Failed to parse Exa response: {}", e))
        })?;

        info!("Exa returned {} results", parsed.results.len());

        Ok(parsed.results.into_iter().map(SearchResult::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = SearchRequest::builder("rust async")
            .num_results(5)
            .exclude_domains(["en.wikipedia.org"])
            .start_date(Some("2025-01-02"))
            .build()
            .unwrap();

        let body = serde_json::to_value(ExaClient::build_body(&request)).unwrap();
        assert_eq!(body["query"], "rust async");
        assert_eq!(body["numResults"], 5);
        assert_eq!(body["excludeDomains"][0], "en.wikipedia.org");
        assert_eq!(body["startPublishedDate"], "2025-01-02T00:00:00.000Z");
        assert_eq!(body["contents"]["text"], true);
        assert!(body.get("includeDomains").is_none());
        assert!(body.get("useAutoprompt").is_none());
    }

    #[test]
    fn test_result_conversion() {
        let raw = r#"{"results": [
            {"title": "  ", "url": "https://a.com", "publishedDate": "2024-06-01T10:00:00.000Z", "text": "body"},
            {"url": "https://b.com", "author": ""}
        ]}"#;
        let parsed: ExaSearchResponse = serde_json::from_str(raw).unwrap();
        let results: Vec<SearchResult> = parsed.results.into_iter().map(Into::into).collect();

        assert_eq!(results[0].title, "No Title");
        assert_eq!(results[0].published_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(results[0].content, "body");
        assert_eq!(results[1].content, "");
        assert_eq!(results[1].author, None);
    }
}
