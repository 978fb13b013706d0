use super::media_format::MediaFormat;
use super::transcription_job::TranscriptionJob;
use crate::shared::remote_error::RemoteError;

/// Everything the service needs to start one job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRequest {
    pub job_name: String,
    pub media_uri: String,
    pub language_code: String,
    pub media_format: MediaFormat,
}

/// Domain interface for the remote batch transcription service.
pub trait TranscriptionService: Send {
    fn submit_job(&self, request: &JobRequest) -> Result<TranscriptionJob, RemoteError>;

    fn get_job(&self, job_name: &str) -> Result<TranscriptionJob, RemoteError>;
}
