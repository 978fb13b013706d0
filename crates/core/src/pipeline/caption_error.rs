use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::captions::domain::transcript_error::TranscriptError;
use crate::shared::remote_error::RemoteError;

/// Why a caption run was aborted.
#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("input file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("unsupported media format: {}", .0.display())]
    UnsupportedMediaFormat(PathBuf),
    #[error("{operation} failed: {source}")]
    RemoteOperationFailed {
        operation: &'static str,
        #[source]
        source: RemoteError,
    },
    #[error("transcription job {job_name} failed: {reason}")]
    JobFailed { job_name: String, reason: String },
    #[error("transcription job {job_name} did not finish within {}s", .waited.as_secs())]
    PollingTimeout { job_name: String, waited: Duration },
    #[error("run cancelled")]
    Cancelled,
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error("failed to write captions to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CaptionError {
    pub(crate) fn remote(operation: &'static str) -> impl FnOnce(RemoteError) -> Self {
        move |source| CaptionError::RemoteOperationFailed { operation, source }
    }
}
