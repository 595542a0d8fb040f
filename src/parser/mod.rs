// file: src/parser/mod.rs
// description: markdown parsing module exports
// reference: internal module structure

pub mod markdown;

pub use markdown::{Heading, Link, MarkdownParser, ParsedMarkdown};
