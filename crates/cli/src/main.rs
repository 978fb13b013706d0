mod settings;

use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::Parser;
use signal_hook::consts::SIGINT;

use subcue_core::captions::domain::segmenter::Segmenter;
use subcue_core::pipeline::generate_captions_use_case::GenerateCaptionsUseCase;
use subcue_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use subcue_core::pipeline::poll_policy::{CancellationToken, PollPolicy, SystemClock};
use subcue_core::pipeline::workflow_parameters::WorkflowParameters;
use subcue_core::shared::aws_context::AwsContext;
use subcue_core::shared::constants::{
    CAPTION_EXTENSION, DEFAULT_LANGUAGE_CODE, DEFAULT_MAX_WAIT, DEFAULT_POLL_INTERVAL,
    DEFAULT_REGION, MAX_CUE_DURATION_SECS,
};
use subcue_core::storage::infrastructure::s3_object_store::S3ObjectStore;
use subcue_core::transcription::domain::media_format::MediaFormat;
use subcue_core::transcription::infrastructure::aws_transcription_service::AwsTranscriptionService;
use subcue_core::transcription::infrastructure::http_transcript_fetcher::HttpTranscriptFetcher;

use settings::Settings;

/// Generate SRT subtitles for a media file with Amazon Transcribe.
#[derive(Parser)]
#[command(name = "subcue")]
struct Cli {
    /// Input audio or video file.
    input: PathBuf,

    /// Output caption file (default: input with an .srt extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// S3 bucket to upload the media to (created if missing).
    #[arg(short, long)]
    bucket: Option<String>,

    /// AWS region [default: us-east-1].
    #[arg(short, long)]
    region: Option<String>,

    /// Spoken language of the media [default: en-US].
    #[arg(long)]
    language_code: Option<String>,

    /// Delete the uploaded media from the bucket after a successful run.
    #[arg(long)]
    delete: bool,

    /// Seconds between job status polls [default: 30].
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Give up on the job after this many seconds [default: 7200].
    #[arg(long)]
    max_wait: Option<u64>,

    /// Longest span of a single caption in seconds [default: 5].
    #[arg(long)]
    max_cue_duration: Option<f64>,

    /// Log progress to stderr.
    #[arg(short, long)]
    verbose: bool,
}

/// Command line merged with the settings file.
#[derive(Debug, PartialEq)]
struct RunConfig {
    input: PathBuf,
    output: PathBuf,
    bucket: String,
    region: String,
    language_code: String,
    delete_after: bool,
    poll_interval: Duration,
    max_wait: Duration,
    max_cue_duration: f64,
}

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve(cli, Settings::load());
    validate(&config)?;

    // First Ctrl-C cancels the run; a second one exits immediately.
    let cancel = CancellationToken::new();
    signal_hook::flag::register_conditional_shutdown(SIGINT, 1, cancel.flag())?;
    signal_hook::flag::register(SIGINT, cancel.flag())?;

    let context = AwsContext::load(&config.region)?;
    let params = WorkflowParameters::new(
        &config.bucket,
        &config.input,
        &config.output,
        config.delete_after,
        &config.language_code,
    );
    let policy = PollPolicy::default()
        .with_interval(config.poll_interval)
        .with_max_wait(config.max_wait);

    let mut use_case = GenerateCaptionsUseCase::new(
        Box::new(S3ObjectStore::new(context.clone())),
        Box::new(AwsTranscriptionService::new(context)),
        Box::new(HttpTranscriptFetcher::new()),
        Box::new(SystemClock::new()),
        Box::new(StdoutPipelineLogger::new()),
    )
    .with_poll_policy(policy)
    .with_segmenter(Segmenter::new(config.max_cue_duration))
    .with_cancellation(cancel);

    let report = use_case.execute(&params)?;
    log::info!(
        "Job {} produced {} cues in {}",
        report.job_name,
        report.cue_count,
        report.output_path.display()
    );
    Ok(())
}

fn resolve(cli: Cli, settings: Settings) -> RunConfig {
    let output = cli
        .output
        .unwrap_or_else(|| default_output_path(&cli.input));
    RunConfig {
        output,
        bucket: cli.bucket.or(settings.bucket).unwrap_or_default(),
        region: cli
            .region
            .or(settings.region)
            .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        language_code: cli
            .language_code
            .or(settings.language_code)
            .unwrap_or_else(|| DEFAULT_LANGUAGE_CODE.to_string()),
        delete_after: cli.delete,
        poll_interval: cli
            .poll_interval
            .or(settings.poll_interval_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL),
        max_wait: cli
            .max_wait
            .or(settings.max_wait_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_MAX_WAIT),
        max_cue_duration: cli
            .max_cue_duration
            .or(settings.max_cue_duration_secs)
            .unwrap_or(MAX_CUE_DURATION_SECS),
        input: cli.input,
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(CAPTION_EXTENSION)
}

fn validate(config: &RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    if !config.input.exists() {
        return Err(format!("Input file not found: {}", config.input.display()).into());
    }
    if MediaFormat::from_path(&config.input).is_none() {
        return Err(format!(
            "Unsupported media format: {} (expected mp3, mp4, m4a, wav, flac, ogg, amr or webm)",
            config.input.display()
        )
        .into());
    }
    if config.bucket.trim_end_matches('/').is_empty() {
        return Err("A bucket is required (--bucket or \"bucket\" in settings.json)".into());
    }
    if config.output == config.input {
        return Err("Output path must differ from the input file".into());
    }
    if config.poll_interval.is_zero() {
        return Err("Poll interval must be at least 1 second".into());
    }
    if !(config.max_cue_duration.is_finite() && config.max_cue_duration > 0.0) {
        return Err(format!(
            "Max cue duration must be a positive number of seconds, got {}",
            config.max_cue_duration
        )
        .into());
    }
    if config.max_wait < config.poll_interval {
        return Err(format!(
            "Max wait ({}s) must be at least the poll interval ({}s)",
            config.max_wait.as_secs(),
            config.poll_interval.as_secs()
        )
        .into());
    }
    Ok(())
}
