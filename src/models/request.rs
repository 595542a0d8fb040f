// file: src/models/request.rs
// description: validated search request and the builder that assembles it from user input
// reference: internal data structures

use crate::error::{PipelineError, Result};
use crate::utils::validation::Validator;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// A validated, immutable search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub num_results: u32,
    pub include_domains: BTreeSet<String>,
    pub exclude_domains: BTreeSet<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub autoprompt: bool,
}

impl SearchRequest {
    pub fn builder(query: impl Into<String>) -> SearchRequestBuilder {
        SearchRequestBuilder::new(query)
    }
}

/// Collects raw arguments; nothing is checked until [`SearchRequestBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct SearchRequestBuilder {
    query: String,
    num_results: i64,
    include_domains: Vec<String>,
    exclude_domains: Vec<String>,
    always_exclude: Vec<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    start_date_value: Option<NaiveDate>,
    autoprompt: bool,
}

impl SearchRequestBuilder {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            num_results: 10,
            ..Default::default()
        }
    }

    pub fn num_results(mut self, num_results: i64) -> Self {
        self.num_results = num_results;
        self
    }

    pub fn include_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_domains.extend(domains.into_iter().map(Into::into));
        self
    }

    pub fn exclude_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_domains.extend(domains.into_iter().map(Into::into));
        self
    }

    /// Configured exclusions, skipped for any domain the caller explicitly includes
    pub fn always_exclude<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.always_exclude.extend(domains.into_iter().map(Into::into));
        self
    }

    /// Raw `YYYY-MM-DD` string, parsed during `build`
    pub fn start_date(mut self, date: Option<impl Into<String>>) -> Self {
        self.start_date = date.map(Into::into);
        self
    }

    pub fn end_date(mut self, date: Option<impl Into<String>>) -> Self {
        self.end_date = date.map(Into::into);
        self
    }

    /// Already-computed start date, used by exports that derive it from a lookback window
    pub fn published_after(mut self, date: NaiveDate) -> Self {
        self.start_date_value = Some(date);
        self
    }

    pub fn autoprompt(mut self, enabled: bool) -> Self {
        self.autoprompt = enabled;
        self
    }

    pub fn build(self) -> Result<SearchRequest> {
        let query = Validator::validate_query(&self.query)?;
        let num_results = Validator::validate_num_results(self.num_results)?;

        let include_domains = normalize_domains(&self.include_domains)?;
        let mut exclude_domains = normalize_domains(&self.exclude_domains)?;

        if let Some(domain) = include_domains.intersection(&exclude_domains).next() {
            return Err(PipelineError::InvalidArgument(format!(
                "Domain {} is both included and excluded",
                domain
            )));
        }

        let always_excluded = normalize_domains(&self.always_exclude)?;
        exclude_domains.extend(
            always_excluded
                .into_iter()
                .filter(|domain| !include_domains.contains(domain)),
        );

        let start_date = match self.start_date.as_deref() {
            Some(raw) => Some(Validator::parse_date(raw)?),
            None => self.start_date_value,
        };
        let end_date = self
            .end_date
            .as_deref()
            .map(Validator::parse_date)
            .transpose()?;

        if let (Some(start), Some(end)) = (start_date, end_date)
            && start > end
        {
            return Err(PipelineError::InvalidArgument(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }

        Ok(SearchRequest {
            query,
            num_results,
            include_domains,
            exclude_domains,
            start_date,
            end_date,
            autoprompt: self.autoprompt,
        })
    }
}

fn normalize_domains(domains: &[String]) -> Result<BTreeSet<String>> {
    domains
        .iter()
        .map(|domain| Validator::normalize_domain(domain))
        .collect()
}
