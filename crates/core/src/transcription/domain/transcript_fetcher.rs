use crate::shared::remote_error::RemoteError;

/// Downloads a completed job's result document.
pub trait TranscriptFetcher: Send {
    fn fetch(&self, result_uri: &str) -> Result<String, RemoteError>;
}
