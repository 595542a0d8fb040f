// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod clients;
pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod utils;

pub use clients::{
    AssemblyAiClient, AudioDownloader, CaptionClient, ExaClient, GeminiClient, SearchClient,
    SpeechToText, TextGenerator, TranscriptSource, VideoSource, YoutubeClient,
};
pub use config::{Config, Credentials, GenerationSettings};
pub use error::{PipelineError, Result};
pub use exporter::{FileWriter, JsonExporter, MarkdownFormatter, SummaryFormatter};
pub use models::{OutputDocument, SearchRequest, SearchResult, Video, VideoTranscript};
pub use parser::{MarkdownParser, ParsedMarkdown};
pub use pipeline::{
    AnalyzePipeline, OutputFormat, PipelineStats, ProgressTracker, ResultFilter, SearchPipeline,
    TranscribePipeline, TweetsPipeline, VideoPipeline,
};
pub use utils::Validator;
