// file: src/parser/markdown.rs
// description: markdown inspection with pulldown-cmark
// reference: https://docs.rs/pulldown-cmark

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

pub struct MarkdownParser;

#[derive(Debug, Clone, Default)]
pub struct ParsedMarkdown {
    pub headings: Vec<Heading>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub text: String,
    pub url: String,
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, content: &str) -> ParsedMarkdown {
        let mut parsed = ParsedMarkdown::default();

        let mut current_heading: Option<(u32, String)> = None;
        let mut current_link: Option<(String, String)> = None;

        for event in Parser::new(content) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    current_heading = Some((level as u32, String::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, text)) = current_heading.take() {
                        parsed.headings.push(Heading {
                            level,
                            text: text.trim().to_string(),
                        });
                    }
                }
                Event::Start(Tag::Link { dest_url, .. }) => {
                    current_link = Some((dest_url.to_string(), String::new()));
                }
                Event::End(TagEnd::Link) => {
                    if let Some((url, text)) = current_link.take() {
                        parsed.links.push(Link { text, url });
                    }
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some((_, ref mut heading_text)) = current_heading {
                        heading_text.push_str(&text);
                    }
                    if let Some((_, ref mut link_text)) = current_link {
                        link_text.push_str(&text);
                    }
                }
                _ => {}
            }
        }

        parsed
    }

    /// Renders one line of inline markdown as plain text, e.g. `**SUMMARY:**` -> `SUMMARY:`.
    pub fn inline_text(&self, line: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(line.trim()) {
            match event {
                Event::Text(chunk) | Event::Code(chunk) => text.push_str(&chunk),
                Event::SoftBreak | Event::HardBreak => text.push(' '),
                _ => {}
            }
        }

        text.trim().to_string()
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}
