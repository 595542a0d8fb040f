// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

pub mod analyze;
pub mod filter;
pub mod progress;
pub mod prompts;
pub mod search;
pub mod transcribe;
pub mod tweets;
pub mod video;

pub use analyze::AnalyzePipeline;
pub use filter::ResultFilter;
pub use progress::{PipelineStats, ProgressTracker};
pub use search::{OutputFormat, SearchOutcome, SearchPipeline};
pub use transcribe::{PollSettings, TranscribePipeline};
pub use tweets::TweetsPipeline;
pub use video::{StageReport, VideoPipeline, VideoSettings, WorkflowReport};
