// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::validation::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const MAX_LOOKBACK_DAYS: i64 = 3650;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub output: OutputConfig,
    pub http: HttpConfig,
    pub search: SearchConfig,
    pub tweets: TweetsConfig,
    pub youtube: YoutubeConfig,
    pub gemini: GeminiConfig,
    pub assemblyai: AssemblyAiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub results_dir: PathBuf,
    pub single_file_dir: PathBuf,
    pub preview_chars: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub api_url: String,
    pub default_num_results: i64,
    #[serde(default)]
    pub always_exclude: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TweetsConfig {
    pub query: String,
    pub title: String,
    pub include_domains: Vec<String>,
    pub num_results: i64,
    pub lookback_days: i64,
    pub output_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YoutubeConfig {
    pub api_url: String,
    pub watch_url: String,
    pub max_results: u32,
    #[serde(default)]
    pub transcript_languages: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_url: String,
    pub request_delay_secs: u64,
    #[serde(default)]
    pub focus_topics: Vec<String>,
    pub summaries: GenerationSettings,
    pub single_file: GenerationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssemblyAiConfig {
    pub api_url: String,
    pub poll_interval_secs: u64,
    pub max_polls: u32,
    pub yt_dlp_binary: String,
    pub audio_dir: PathBuf,
    pub output_file: PathBuf,
}

/// API keys, read from the environment once at startup.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub exa_api_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub assemblyai_api_key: Option<String>,
}

impl Credentials {
    pub const EXA: &'static str = "EXA_API_KEY";
    pub const YOUTUBE: &'static str = "YOUTUBE_API_KEY";
    pub const GEMINI: &'static str = "GEMINI_API_KEY";
    pub const ASSEMBLYAI: &'static str = "ASSEMBLYAI_API_KEY";

    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            exa_api_key: read_key(Self::EXA),
            youtube_api_key: read_key(Self::YOUTUBE),
            gemini_api_key: read_key(Self::GEMINI),
            assemblyai_api_key: read_key(Self::ASSEMBLYAI),
        }
    }

    pub fn exa(&self) -> Result<String> {
        require(&self.exa_api_key, "Exa", Self::EXA)
    }

    pub fn youtube(&self) -> Result<String> {
        require(&self.youtube_api_key, "YouTube", Self::YOUTUBE)
    }

    pub fn gemini(&self) -> Result<String> {
        require(&self.gemini_api_key, "Gemini", Self::GEMINI)
    }

    pub fn assemblyai(&self) -> Result<String> {
        require(&self.assemblyai_api_key, "AssemblyAI", Self::ASSEMBLYAI)
    }
}

fn read_key(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn require(key: &Option<String>, service: &str, var: &str) -> Result<String> {
    key.clone().ok_or_else(|| {
        PipelineError::auth(
            service,
            format!("{} environment variable not found. Please set it in your .env file.", var),
        )
    })
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("RESEARCH_EXPORT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            output: OutputConfig {
                results_dir: PathBuf::from("results"),
                single_file_dir: PathBuf::from("results_from_single_files"),
                preview_chars: 500,
            },
            http: HttpConfig {
                timeout_secs: 120,
                user_agent: concat!("research_export/", env!("CARGO_PKG_VERSION")).to_string(),
            },
            search: SearchConfig {
                api_url: "https://api.exa.ai/search".to_string(),
                default_num_results: 10,
                always_exclude: vec!["en.wikipedia.org".to_string()],
            },
            tweets: TweetsConfig {
                query: "here's an exciting breakthrough in artificial intelligence:".to_string(),
                title: "AI Breakthrough Tweets".to_string(),
                include_domains: vec!["twitter.com".to_string(), "x.com".to_string()],
                num_results: 10,
                lookback_days: 5,
                output_file: PathBuf::from("ai_breakthrough_tweets.md"),
            },
            youtube: YoutubeConfig {
                api_url: "https://www.googleapis.com/youtube/v3".to_string(),
                watch_url: "https://www.youtube.com/watch".to_string(),
                max_results: 20,
                transcript_languages: vec!["en".to_string()],
            },
            gemini: GeminiConfig {
                api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                request_delay_secs: 10,
                focus_topics: default_focus_topics(),
                summaries: GenerationSettings {
                    model: "gemini-2.0-pro-exp-02-05".to_string(),
                    temperature: 0.7,
                    top_p: 0.95,
                    top_k: 64,
                    max_output_tokens: 8192,
                },
                single_file: GenerationSettings {
                    model: "gemini-2.0-flash-thinking-exp-01-21".to_string(),
                    temperature: 0.7,
                    top_p: 1.0,
                    top_k: 1,
                    max_output_tokens: 2048,
                },
            },
            assemblyai: AssemblyAiConfig {
                api_url: "https://api.assemblyai.com/v2".to_string(),
                poll_interval_secs: 10,
                max_polls: 360,
                yt_dlp_binary: "yt-dlp".to_string(),
                audio_dir: PathBuf::from("."),
                output_file: PathBuf::from("transcript.md"),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            return Err(PipelineError::Config(
                "http.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.output.preview_chars == 0 {
            return Err(PipelineError::Config(
                "output.preview_chars must be greater than 0".to_string(),
            ));
        }

        if self.search.default_num_results <= 0 || self.tweets.num_results <= 0 {
            return Err(PipelineError::Config(
                "result counts must be greater than 0".to_string(),
            ));
        }

        if !(1..=MAX_LOOKBACK_DAYS).contains(&self.tweets.lookback_days) {
            return Err(PipelineError::Config(format!(
                "tweets.lookback_days must be between 1 and {}",
                MAX_LOOKBACK_DAYS
            )));
        }

        Validator::validate_max_results(self.youtube.max_results)
            .map_err(|e| PipelineError::Config(format!("youtube.max_results: {}", e)))?;

        if self.assemblyai.max_polls == 0 {
            return Err(PipelineError::Config(
                "assemblyai.max_polls must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_focus_topics() -> Vec<String> {
    [
        "Product Management",
        "Culture",
        "Hiring",
        "AI",
        "Teams",
        "Success",
        "User Feedback",
        "Business Strategies",
        "Learning from Mistakes",
        "Storytelling",
        "Procrastination",
        "Market Dynamics",
        "Product Development",
        "Sales & Go-to-Market Tactics",
        "Design",
        "SaaS = Software Fragmentation",
        "Leadership",
    ]
    .iter()
    .map(|topic| topic.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.always_exclude, vec!["en.wikipedia.org"]);
        assert_eq!(config.gemini.focus_topics.len(), 17);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default_config();
        config.http.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_validate_bounds_tweet_lookback() {
        let mut config = Config::default_config();
        config.tweets.lookback_days = 1_000_000_000;
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));

        config.tweets.lookback_days = 0;
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_youtube_max_results_over_limit() {
        let mut config = Config::default_config();
        config.youtube.max_results = 51;
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let mut raw = String::from(include_str!("../config/default.toml"));
        raw = raw.replace("preview_chars = 500", "preview_chars = 120");
        fs::write(&path, raw).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.output.preview_chars, 120);
        assert_eq!(config.youtube.max_results, 20);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("partial.toml");
        fs::write(&path, "[youtube]\nmax_results = 5\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.youtube.max_results, 5);
        assert_eq!(config.output.preview_chars, 500);
        assert_eq!(config.gemini.summaries.top_k, 64);
    }

    #[test]
    fn test_missing_credential_is_auth_error() {
        let credentials = Credentials::default();
        let err = credentials.exa().unwrap_err();
        assert!(err.is_auth());
        assert!(err.to_string().contains("EXA_API_KEY"));
    }
}
