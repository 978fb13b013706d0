use aws_sdk_transcribe::error::DisplayErrorContext;
use aws_sdk_transcribe::types::{
    LanguageCode, Media, MediaFormat as AwsMediaFormat,
    TranscriptionJob as AwsTranscriptionJob, TranscriptionJobStatus,
};
use aws_sdk_transcribe::Client;

use crate::shared::aws_context::AwsContext;
use crate::shared::remote_error::RemoteError;
use crate::transcription::domain::transcription_job::{JobStatus, TranscriptionJob};
use crate::transcription::domain::transcription_service::{JobRequest, TranscriptionService};

/// Transcription service backed by Amazon Transcribe batch jobs.
pub struct AwsTranscriptionService {
    context: AwsContext,
    client: Client,
}

impl AwsTranscriptionService {
    pub fn new(context: AwsContext) -> Self {
        let client = Client::new(context.config());
        Self { context, client }
    }
}

impl TranscriptionService for AwsTranscriptionService {
    fn submit_job(&self, request: &JobRequest) -> Result<TranscriptionJob, RemoteError> {
        let output = self
            .context
            .block_on(
                self.client
                    .start_transcription_job()
                    .transcription_job_name(&request.job_name)
                    .language_code(LanguageCode::from(request.language_code.as_str()))
                    .media_format(AwsMediaFormat::from(request.media_format.as_str()))
                    .media(Media::builder().media_file_uri(&request.media_uri).build())
                    .send(),
            )
            .map_err(|e| format!("StartTranscriptionJob: {}", DisplayErrorContext(e)))?;

        match output.transcription_job() {
            Some(job) => to_domain_job(&request.job_name, job),
            None => Ok(TranscriptionJob::new(&request.job_name, JobStatus::Submitted)),
        }
    }

    fn get_job(&self, job_name: &str) -> Result<TranscriptionJob, RemoteError> {
        let output = self
            .context
            .block_on(
                self.client
                    .get_transcription_job()
                    .transcription_job_name(job_name)
                    .send(),
            )
            .map_err(|e| format!("GetTranscriptionJob: {}", DisplayErrorContext(e)))?;

        let job = output
            .transcription_job()
            .ok_or_else(|| format!("GetTranscriptionJob: no job named {job_name} in response"))?;
        to_domain_job(job_name, job)
    }
}

fn map_status(status: Option<&TranscriptionJobStatus>) -> Result<JobStatus, RemoteError> {
    match status {
        Some(TranscriptionJobStatus::Queued) => Ok(JobStatus::Submitted),
        Some(TranscriptionJobStatus::InProgress) => Ok(JobStatus::InProgress),
        Some(TranscriptionJobStatus::Completed) => Ok(JobStatus::Completed),
        Some(TranscriptionJobStatus::Failed) => Ok(JobStatus::Failed),
        Some(other) => Err(format!("unrecognized job status '{}'", other.as_str()).into()),
        None => Err("job status missing from response".into()),
    }
}

fn to_domain_job(
    requested_name: &str,
    job: &AwsTranscriptionJob,
) -> Result<TranscriptionJob, RemoteError> {
    Ok(TranscriptionJob {
        name: job
            .transcription_job_name()
            .unwrap_or(requested_name)
            .to_string(),
        status: map_status(job.transcription_job_status())?,
        result_uri: job
            .transcript()
            .and_then(|t| t.transcript_file_uri())
            .map(str::to_string),
        failure_reason: job.failure_reason().map(str::to_string),
    })
}
