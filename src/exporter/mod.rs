// file: src/exporter/mod.rs
// description: output rendering and file writing
// reference: internal module structure

pub mod json;
pub mod listing;
pub mod markdown;
pub mod summaries;
pub mod transcript;
pub mod writer;

pub use json::JsonExporter;
pub use markdown::MarkdownFormatter;
pub use summaries::SummaryFormatter;
pub use transcript::{format_ms, render_audio_transcript};
pub use writer::FileWriter;
