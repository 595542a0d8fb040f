// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod request;
pub mod search_result;
pub mod transcript;
pub mod video;

pub use document::OutputDocument;
pub use request::{SearchRequest, SearchRequestBuilder};
pub use search_result::SearchResult;
pub use transcript::{AudioTranscript, Chapter, TranscriptStatus, Utterance};
pub use video::{Video, VideoAnalysis, VideoRef, VideoTranscript};
