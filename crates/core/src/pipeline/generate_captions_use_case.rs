use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::caption_error::CaptionError;
use super::pipeline_logger::PipelineLogger;
use super::poll_policy::{CancellationToken, Clock, PollPolicy};
use super::workflow_parameters::WorkflowParameters;
use super::workflow_stage::WorkflowStage;
use crate::captions::domain::segmenter::Segmenter;
use crate::captions::domain::subtitle_cue::render_srt;
use crate::captions::infrastructure::transcript_parser::parse_transcript;
use crate::shared::constants::CANCEL_CHECK_SLICE;
use crate::storage::domain::object_store::ObjectStore;
use crate::transcription::domain::job_name::generate_job_name;
use crate::transcription::domain::media_format::MediaFormat;
use crate::transcription::domain::transcript_fetcher::TranscriptFetcher;
use crate::transcription::domain::transcription_job::{JobStatus, TranscriptionJob};
use crate::transcription::domain::transcription_service::{JobRequest, TranscriptionService};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionReport {
    pub job_name: String,
    pub cue_count: usize,
    pub output_path: PathBuf,
}

/// Drives one media file through upload, remote transcription, segmentation
/// and caption output.
///
/// Stages run strictly in [`WorkflowStage`] order. Nothing is retried: the
/// first failing step aborts the run, and the caption file is only written
/// once segmentation has fully succeeded. Resources created before the
/// failure (bucket, uploaded object) are left in place.
pub struct GenerateCaptionsUseCase {
    store: Box<dyn ObjectStore>,
    transcriber: Box<dyn TranscriptionService>,
    fetcher: Box<dyn TranscriptFetcher>,
    clock: Box<dyn Clock>,
    logger: Box<dyn PipelineLogger>,
    segmenter: Segmenter,
    policy: PollPolicy,
    cancel: CancellationToken,
}

impl GenerateCaptionsUseCase {
    pub fn new(
        store: Box<dyn ObjectStore>,
        transcriber: Box<dyn TranscriptionService>,
        fetcher: Box<dyn TranscriptFetcher>,
        clock: Box<dyn Clock>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            store,
            transcriber,
            fetcher,
            clock,
            logger,
            segmenter: Segmenter::default(),
            policy: PollPolicy::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_segmenter(mut self, segmenter: Segmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn execute(&mut self, params: &WorkflowParameters) -> Result<CaptionReport, CaptionError> {
        self.logger.stage(WorkflowStage::Start);
        let result = self.run_stages(params);
        match &result {
            Ok(report) => {
                self.logger.info(&format!(
                    "Wrote {} cues to {}",
                    report.cue_count,
                    report.output_path.display()
                ));
                self.logger.stage(WorkflowStage::Done);
            }
            Err(e) => {
                self.logger.info(&format!("Run aborted: {e}"));
                self.logger.stage(WorkflowStage::Aborted);
            }
        }
        self.logger.summary();
        result
    }

    fn run_stages(&mut self, params: &WorkflowParameters) -> Result<CaptionReport, CaptionError> {
        // Local checks happen before any remote call.
        if !params.input().exists() {
            return Err(CaptionError::FileNotFound(params.input().to_path_buf()));
        }
        let media_format = MediaFormat::from_path(params.input())
            .ok_or_else(|| CaptionError::UnsupportedMediaFormat(params.input().to_path_buf()))?;

        let bucket = params.bucket();
        let key = params.object_key();

        let buckets = self.timed(WorkflowStage::BucketCheck, |uc| {
            uc.store
                .list_bucket_names()
                .map_err(CaptionError::remote("list buckets"))
        })?;
        if !buckets.contains(bucket) {
            self.timed(WorkflowStage::BucketCreate, |uc| {
                uc.logger.info(&format!("Creating bucket {bucket}"));
                uc.store
                    .create_bucket(bucket)
                    .map_err(CaptionError::remote("create bucket"))
            })?;
        }

        self.timed(WorkflowStage::Upload, |uc| {
            uc.logger
                .info(&format!("Uploading {} to {bucket}/{key}", params.input().display()));
            uc.store
                .put_object(bucket, &key, params.input())
                .map_err(CaptionError::remote("upload"))
        })?;

        let request = JobRequest {
            job_name: generate_job_name(&key),
            media_uri: params.media_uri(),
            language_code: params.language_code().to_string(),
            media_format,
        };
        self.timed(WorkflowStage::JobSubmit, |uc| {
            uc.logger
                .info(&format!("Submitting transcription job {}", request.job_name));
            uc.transcriber
                .submit_job(&request)
                .map_err(CaptionError::remote("submit transcription job"))
        })?;

        let job = self.timed(WorkflowStage::Polling, |uc| {
            uc.await_completion(&request.job_name)
        })?;
        let result_uri = match job.status {
            JobStatus::Completed => job.result_uri.ok_or_else(|| {
                CaptionError::remote("get transcription job")(
                    "completed job has no result URI".into(),
                )
            })?,
            _ => {
                return Err(CaptionError::JobFailed {
                    job_name: request.job_name,
                    reason: job
                        .failure_reason
                        .unwrap_or_else(|| "no reason reported".to_string()),
                })
            }
        };

        let body = self.timed(WorkflowStage::Fetch, |uc| {
            uc.fetcher
                .fetch(&result_uri)
                .map_err(CaptionError::remote("fetch transcript"))
        })?;

        let cues = self.timed(WorkflowStage::Convert, |uc| {
            let items = parse_transcript(&body)?;
            Ok(uc.segmenter.segment(&items)?)
        })?;

        self.timed(WorkflowStage::Persist, |_| {
            write_atomically(params.output(), &render_srt(&cues))
        })?;

        if params.delete_after() {
            self.timed(WorkflowStage::Cleanup, |uc| {
                uc.logger.info(&format!("Deleting {bucket}/{key}"));
                uc.store
                    .delete_object(bucket, &key)
                    .map_err(CaptionError::remote("delete object"))
            })?;
        }

        Ok(CaptionReport {
            job_name: request.job_name,
            cue_count: cues.len(),
            output_path: params.output().to_path_buf(),
        })
    }

    /// Poll until the job reaches a terminal status or the policy's
    /// `max_wait` has elapsed.
    fn await_completion(&mut self, job_name: &str) -> Result<TranscriptionJob, CaptionError> {
        let started = self.clock.elapsed();
        self.wait(self.policy.initial_delay)?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let job = self
                .transcriber
                .get_job(job_name)
                .map_err(CaptionError::remote("get transcription job"))?;
            self.logger.poll(attempt, job.status);
            if job.status.is_terminal() {
                return Ok(job);
            }

            let waited = self.clock.elapsed().saturating_sub(started);
            if waited >= self.policy.max_wait {
                return Err(CaptionError::PollingTimeout {
                    job_name: job_name.to_string(),
                    waited,
                });
            }
            self.wait(self.policy.interval.min(self.policy.max_wait - waited))?;
        }
    }

    /// Sleep in short slices so cancellation is noticed promptly.
    fn wait(&self, duration: Duration) -> Result<(), CaptionError> {
        let mut remaining = duration;
        loop {
            if self.cancel.is_cancelled() {
                return Err(CaptionError::Cancelled);
            }
            if remaining.is_zero() {
                return Ok(());
            }
            let slice = remaining.min(CANCEL_CHECK_SLICE);
            self.clock.sleep(slice);
            remaining -= slice;
        }
    }

    fn timed<T>(
        &mut self,
        stage: WorkflowStage,
        step: impl FnOnce(&mut Self) -> Result<T, CaptionError>,
    ) -> Result<T, CaptionError> {
        if self.cancel.is_cancelled() {
            return Err(CaptionError::Cancelled);
        }
        self.logger.stage(stage);
        let before = self.clock.elapsed();
        let result = step(self);
        let elapsed = self.clock.elapsed().saturating_sub(before);
        self.logger.timing(stage, elapsed.as_secs_f64() * 1000.0);
        result
    }
}

/// Write to `<dest>.part`, then rename over `dest`.
fn write_atomically(dest: &Path, contents: &str) -> Result<(), CaptionError> {
    let mut temp_name = dest.as_os_str().to_os_string();
    temp_name.push(".part");
    let temp_path = PathBuf::from(temp_name);
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| CaptionError::Write { path, source }
    };

    if let Err(e) = fs::write(&temp_path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(&temp_path)(e));
    }
    fs::rename(&temp_path, dest).map_err(write_err(dest))
}
