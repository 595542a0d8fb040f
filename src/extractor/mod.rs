// file: src/extractor/mod.rs
// description: text extraction module exports
// reference: internal module structure

pub mod captions;
pub mod patterns;
pub mod tweet;
pub mod video_id;

pub use captions::{CaptionTrack, find_caption_tracks, parse_timed_text, select_track};
pub use tweet::TweetCleaner;
pub use video_id::extract_video_id;
