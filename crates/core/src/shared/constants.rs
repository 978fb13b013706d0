use std::time::Duration;

/// A cue is closed once the next word would end more than this many seconds
/// after the cue started.
pub const MAX_CUE_DURATION_SECS: f64 = 5.0;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";
pub const CAPTION_EXTENSION: &str = "srt";

pub const INITIAL_POLL_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(2 * 60 * 60);

/// Longest single sleep between cancellation checks.
pub const CANCEL_CHECK_SLICE: Duration = Duration::from_millis(250);

/// Amazon Transcribe limits job names to 200 characters.
pub const MAX_JOB_NAME_LEN: usize = 200;
