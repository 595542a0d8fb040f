// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use research_export::clients::build_http_client;
use research_export::exporter::listing::render_video_summary;
use research_export::pipeline::{PollSettings, StageReport, VideoSettings};
use research_export::utils::logging::{
    format_error, format_info, format_step, format_success, format_warning, init_logger,
};
use research_export::{
    AnalyzePipeline, AssemblyAiClient, AudioDownloader, CaptionClient, Config, Credentials,
    ExaClient, FileWriter, GeminiClient, MarkdownFormatter, OutputFormat, SearchPipeline,
    SearchRequest, TranscribePipeline, TweetsPipeline, VideoPipeline, YoutubeClient,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "research_export")]
#[command(version)]
#[command(about = "Search, fetch, format and export research material to markdown", long_about = None)]
struct Cli {
    /// Configuration file, defaults to config/default.toml when present
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set, global = true)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue, global = true)]
    verbose: bool,

    /// Overrides output.results_dir
    #[arg(long, value_name = "DIR", global = true)]
    results_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the web and save the results
    Search {
        /// Search query, prompted for when omitted
        query: Option<String>,

        #[arg(short = 'n', long, allow_negative_numbers = true)]
        num_results: Option<i64>,

        #[arg(short, long, num_args = 1..)]
        include_domains: Vec<String>,

        #[arg(short, long, num_args = 1..)]
        exclude_domains: Vec<String>,

        /// YYYY-MM-DD
        #[arg(long)]
        start_date: Option<String>,

        /// YYYY-MM-DD
        #[arg(long)]
        end_date: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        #[arg(long)]
        autoprompt: bool,
    },

    /// Collect recent tweets into a markdown file
    Tweets,

    /// Search videos and write the listing file
    Videos {
        term: Option<String>,

        #[arg(long)]
        max_results: Option<u32>,
    },

    /// Fetch captions for every video in the listing file
    Transcripts { term: Option<String> },

    /// Summarize every transcript with the generative model
    Summarize { term: Option<String> },

    /// Run videos, transcripts and summarize in sequence
    Workflow {
        term: Option<String>,

        #[arg(long)]
        max_results: Option<u32>,
    },

    /// Analyze a single transcript text file
    Analyze { file: PathBuf },

    /// Transcribe a video's audio with speaker labels
    Transcribe {
        url: String,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[arg(long)]
        chapters: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logger(cli.color, cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format_error(&format!("{:#}", err)));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = cli.results_dir {
        config.output.results_dir = dir;
    }
    debug!("Results directory: {}", config.output.results_dir.display());

    let credentials = Credentials::from_env();

    match cli.command {
        Commands::Search {
            query,
            num_results,
            include_domains,
            exclude_domains,
            start_date,
            end_date,
            format,
            autoprompt,
        } => {
            let query = resolve_input(query, "Enter your search query: ")?;
            let request = build_search_request(
                &config,
                query,
                num_results,
                include_domains,
                exclude_domains,
                start_date,
                end_date,
                autoprompt,
            )?;
            cmd_search(&config, &credentials, &request, format).await?;
        }
        Commands::Tweets => {
            cmd_tweets(&config, &credentials).await?;
        }
        Commands::Videos { term, max_results } => {
            let term = resolve_input(term, "Enter the term to search for in video titles: ")?;
            cmd_videos(&config, &credentials, &term, max_results).await?;
        }
        Commands::Transcripts { term } => {
            let term = resolve_input(term, "Enter the search term used for the video search: ")?;
            let pipeline = video_pipeline(&config, cli.color, None);
            let captions = caption_client(&config)?;
            let report = pipeline.collect_transcripts(&captions, &term).await?;
            print_report("Transcripts", &report);
        }
        Commands::Summarize { term } => {
            let term = resolve_input(term, "Enter the search term used in previous steps: ")?;
            let pipeline = video_pipeline(&config, cli.color, None);
            let gemini = gemini_client(&config, &credentials)?;
            let report = pipeline.summarize(&gemini, &term).await?;
            print_report("Summaries", &report);
        }
        Commands::Workflow { term, max_results } => {
            let term = resolve_input(term, "Enter the term to search for in video titles: ")?;
            cmd_workflow(&config, &credentials, cli.color, &term, max_results).await?;
        }
        Commands::Analyze { file } => {
            cmd_analyze(&config, &credentials, &file).await?;
        }
        Commands::Transcribe {
            url,
            output,
            chapters,
        } => {
            cmd_transcribe(&config, &credentials, &url, output, chapters).await?;
        }
    }

    Ok(())
}

/// Uses the positional value when given, otherwise asks on stdin.
fn resolve_input(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = value
        && !value.trim().is_empty()
    {
        return Ok(value);
    }

    print!("{}", prompt);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    Ok(line.trim().to_string())
}

#[allow(clippy::too_many_arguments)]
fn build_search_request(
    config: &Config,
    query: String,
    num_results: Option<i64>,
    include_domains: Vec<String>,
    exclude_domains: Vec<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    autoprompt: bool,
) -> Result<SearchRequest> {
    let request = SearchRequest::builder(query)
        .num_results(num_results.unwrap_or(config.search.default_num_results))
        .include_domains(include_domains)
        .exclude_domains(exclude_domains)
        .always_exclude(config.search.always_exclude.iter().cloned())
        .start_date(start_date)
        .end_date(end_date)
        .autoprompt(autoprompt)
        .build()?;

    Ok(request)
}

fn exa_client(config: &Config, credentials: &Credentials) -> Result<ExaClient> {
    let http = build_http_client(&config.http)?;
    Ok(ExaClient::new(http, &config.search.api_url, credentials.exa()?))
}

fn gemini_client(config: &Config, credentials: &Credentials) -> Result<GeminiClient> {
    let http = build_http_client(&config.http)?;
    Ok(GeminiClient::new(
        http,
        &config.gemini.api_url,
        credentials.gemini()?,
    ))
}

fn caption_client(config: &Config) -> Result<CaptionClient> {
    let http = build_http_client(&config.http)?;
    Ok(CaptionClient::new(
        http,
        &config.youtube.watch_url,
        config.youtube.transcript_languages.clone(),
    ))
}

fn youtube_client(config: &Config, credentials: &Credentials) -> Result<YoutubeClient> {
    let http = build_http_client(&config.http)?;
    Ok(YoutubeClient::new(
        http,
        &config.youtube.api_url,
        credentials.youtube()?,
    ))
}

fn video_pipeline(config: &Config, color: bool, max_results: Option<u32>) -> VideoPipeline {
    VideoPipeline::new(
        FileWriter::new(&config.output.results_dir),
        VideoSettings {
            max_results: max_results.unwrap_or(config.youtube.max_results),
            request_delay: Duration::from_secs(config.gemini.request_delay_secs),
            focus_topics: config.gemini.focus_topics.clone(),
            generation: config.gemini.summaries.clone(),
            show_progress: true,
            colored: color,
        },
    )
}

async fn cmd_search(
    config: &Config,
    credentials: &Credentials,
    request: &SearchRequest,
    format: OutputFormat,
) -> Result<()> {
    println!("Searching for: {}", request.query);

    let pipeline = SearchPipeline::new(
        exa_client(config, credentials)?,
        MarkdownFormatter::new(config.output.preview_chars),
        FileWriter::new(&config.output.results_dir),
    );

    let outcome = pipeline.run(request, format).await?;
    info!(
        "Fetched {}, excluded {}, kept {}",
        outcome.fetched,
        outcome.excluded(),
        outcome.retained
    );

    match outcome.path {
        Some(path) => println!(
            "{}",
            format_success(&format!(
                "Found {} results. Saved to: {}",
                outcome.retained,
                path.display()
            ))
        ),
        None => println!("{}", format_warning("No results found.")),
    }

    Ok(())
}

async fn cmd_tweets(config: &Config, credentials: &Credentials) -> Result<()> {
    let pipeline = TweetsPipeline::new(
        exa_client(config, credentials)?,
        config.tweets.clone(),
        MarkdownFormatter::new(config.output.preview_chars),
        FileWriter::new(&config.output.results_dir),
    );

    let (count, path) = pipeline.run().await?;
    println!(
        "{}",
        format_success(&format!(
            "Successfully saved {} tweets to {}",
            count,
            path.display()
        ))
    );

    Ok(())
}

async fn cmd_videos(
    config: &Config,
    credentials: &Credentials,
    term: &str,
    max_results: Option<u32>,
) -> Result<()> {
    let pipeline = video_pipeline(config, false, max_results);
    let youtube = youtube_client(config, credentials)?;

    let (videos, path) = pipeline.search_videos(&youtube, term).await?;
    println!(
        "{}",
        format_success(&format!("Results have been saved to: {}", path.display()))
    );
    println!();
    print!("{}", render_video_summary(term, &videos));

    Ok(())
}

async fn cmd_workflow(
    config: &Config,
    credentials: &Credentials,
    color: bool,
    term: &str,
    max_results: Option<u32>,
) -> Result<()> {
    let youtube = youtube_client(config, credentials)?;
    let gemini = gemini_client(config, credentials)?;
    let captions = caption_client(config)?;
    let pipeline = video_pipeline(config, color, max_results);

    let report = pipeline
        .workflow(&youtube, &captions, &gemini, term)
        .await?;

    println!("{}", format_step(1, 3, "Videos"));
    println!(
        "{}",
        format_info(&format!(
            "{} videos listed in {}",
            report.videos,
            report.listing.display()
        ))
    );

    println!("{}", format_step(2, 3, "Transcripts"));
    print_report("Transcripts", &report.transcripts);

    println!("{}", format_step(3, 3, "Summaries"));
    print_report("Summaries", &report.summaries);

    Ok(())
}

async fn cmd_analyze(config: &Config, credentials: &Credentials, file: &Path) -> Result<()> {
    let gemini = gemini_client(config, credentials)?;
    let pipeline = AnalyzePipeline::new(
        FileWriter::new(&config.output.single_file_dir),
        config.gemini.single_file.clone(),
        config.gemini.focus_topics.clone(),
    );

    println!("Analyzing transcript from: {}", file.display());
    let path = pipeline.run(&gemini, file).await?;
    println!(
        "{}",
        format_success(&format!("Analysis saved successfully to: {}", path.display()))
    );

    Ok(())
}

async fn cmd_transcribe(
    config: &Config,
    credentials: &Credentials,
    url: &str,
    output: Option<PathBuf>,
    chapters: bool,
) -> Result<()> {
    let settings = &config.assemblyai;
    let http = build_http_client(&config.http)?;
    let client = AssemblyAiClient::new(http, &settings.api_url, credentials.assemblyai()?);

    let pipeline = TranscribePipeline::new(
        AudioDownloader::new(&settings.yt_dlp_binary),
        client,
        FileWriter::new(&config.output.results_dir),
        &settings.audio_dir,
        PollSettings {
            interval: Duration::from_secs(settings.poll_interval_secs),
            max_polls: settings.max_polls,
        },
    );

    let output = output.unwrap_or_else(|| settings.output_file.clone());
    let path = pipeline.run(url, &output, chapters).await?;
    println!(
        "{}",
        format_success(&format!("Transcript saved to {}", path.display()))
    );

    Ok(())
}

fn print_report(stage: &str, report: &StageReport) {
    let stats = &report.stats;
    let summary = format!(
        "{} saved to {} ({} ok, {} failed, {:.0}% success, {}s)",
        stage,
        report.path.display(),
        stats.items_succeeded,
        stats.items_failed,
        stats.success_rate(),
        stats.duration_secs
    );

    if stats.items_failed > 0 {
        println!("{}", format_warning(&summary));
    } else {
        println!("{}", format_success(&summary));
    }
}
