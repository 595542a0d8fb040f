// file: src/exporter/summaries.rs
// description: markdown report of per-video analyses
// reference: https://commonmark.org

use crate::models::VideoAnalysis;
use crate::parser::MarkdownParser;

const SUMMARY_LABEL: &str = "SUMMARY:";
const QUOTES_LABEL: &str = "QUOTES:";
const URL_LABEL: &str = "URL:";

#[derive(Debug, PartialEq)]
enum Section<'a> {
    Summary(String),
    Quotes(String),
    Url,
    Other(&'a str),
}

pub struct SummaryFormatter {
    parser: MarkdownParser,
}

impl SummaryFormatter {
    pub fn new() -> Self {
        Self {
            parser: MarkdownParser::new(),
        }
    }

    pub fn header(&self, term: &str) -> String {
        format!("# YouTube Video Summaries for '{}'\n\n", term)
    }

    /// Renders one video; `index` is 1-based.
    pub fn format_analysis(&self, index: usize, analysis: &VideoAnalysis) -> String {
        let mut output = format!(
            "## Video #{}: [{}]({})\n\n",
            index, analysis.title, analysis.url
        );

        for block in analysis.analysis.split("\n\n") {
            if block.trim().is_empty() {
                continue;
            }

            match self.classify(block) {
                Section::Summary(body) => {
                    output.push_str("### Summary\n\n");
                    output.push_str(body.trim());
                    output.push_str("\n\n");
                }
                Section::Quotes(body) => {
                    output.push_str("### Key Quotes\n\n");
                    for quote in body.lines().map(str::trim).filter(|q| !q.is_empty()) {
                        output.push_str(&format!("- {}\n", quote));
                    }
                    output.push('\n');
                }
                Section::Url => {}
                Section::Other(raw) => {
                    output.push_str(raw);
                    output.push_str("\n\n");
                }
            }
        }

        output.push_str("---\n\n");
        output
    }

    /// Labels may come back decorated, e.g. `**SUMMARY:**` or `## QUOTES:`.
    fn classify<'a>(&self, block: &'a str) -> Section<'a> {
        let trimmed = block.trim_start();
        let (first_line, rest) = match trimmed.split_once('\n') {
            Some((first, rest)) => (first, rest),
            None => (trimmed, ""),
        };

        let label_line = self.parser.inline_text(first_line);
        let body = |label: &str| {
            let inline = label_line[label.len()..].trim();
            match (inline.is_empty(), rest.is_empty()) {
                (true, _) => rest.to_string(),
                (false, true) => inline.to_string(),
                (false, false) => format!("{}\n{}", inline, rest),
            }
        };

        if label_line.starts_with(SUMMARY_LABEL) {
            Section::Summary(body(SUMMARY_LABEL))
        } else if label_line.starts_with(QUOTES_LABEL) {
            Section::Quotes(body(QUOTES_LABEL))
        } else if label_line.starts_with(URL_LABEL) {
            Section::Url
        } else {
            Section::Other(block)
        }
    }
}

impl Default for SummaryFormatter {
    fn default() -> Self {
        Self::new()
    }
}
