/// Lifecycle state of a remote transcription job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Submitted,
    InProgress,
    Completed,
    Failed,
}

impl JobStatus {
    /// `Completed` and `Failed` never transition again.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Submitted => write!(f, "submitted"),
            JobStatus::InProgress => write!(f, "in progress"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Snapshot of a remote job as last reported by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionJob {
    pub name: String,
    pub status: JobStatus,
    /// Set once the job has completed.
    pub result_uri: Option<String>,
    /// Set once the job has failed.
    pub failure_reason: Option<String>,
}

impl TranscriptionJob {
    pub fn new(name: &str, status: JobStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
            result_uri: None,
            failure_reason: None,
        }
    }

    pub fn completed(name: &str, result_uri: &str) -> Self {
        Self {
            result_uri: Some(result_uri.to_string()),
            ..Self::new(name, JobStatus::Completed)
        }
    }

    pub fn failed(name: &str, reason: &str) -> Self {
        Self {
            failure_reason: Some(reason.to_string()),
            ..Self::new(name, JobStatus::Failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::submitted(JobStatus::Submitted, false)]
    #[case::in_progress(JobStatus::InProgress, false)]
    #[case::completed(JobStatus::Completed, true)]
    #[case::failed(JobStatus::Failed, true)]
    fn test_is_terminal(#[case] status: JobStatus, #[case] expected: bool) {
        assert_eq!(status.is_terminal(), expected);
    }

    #[test]
    fn test_completed_carries_uri_only() {
        let job = TranscriptionJob::completed("j", "https://example.com/r.json");
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.result_uri.as_deref(), Some("https://example.com/r.json"));
        assert!(job.failure_reason.is_none());
    }

    #[test]
    fn test_failed_carries_reason_only() {
        let job = TranscriptionJob::failed("j", "unsupported codec");
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.failure_reason.as_deref(), Some("unsupported codec"));
        assert!(job.result_uri.is_none());
    }
}
