/// Steps of a caption run, in the only order they can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkflowStage {
    Start,
    BucketCheck,
    BucketCreate,
    Upload,
    JobSubmit,
    Polling,
    Fetch,
    Convert,
    Persist,
    Cleanup,
    Done,
    Aborted,
}

impl WorkflowStage {
    pub fn name(self) -> &'static str {
        match self {
            WorkflowStage::Start => "start",
            WorkflowStage::BucketCheck => "bucket_check",
            WorkflowStage::BucketCreate => "bucket_create",
            WorkflowStage::Upload => "upload",
            WorkflowStage::JobSubmit => "job_submit",
            WorkflowStage::Polling => "polling",
            WorkflowStage::Fetch => "fetch",
            WorkflowStage::Convert => "convert",
            WorkflowStage::Persist => "persist",
            WorkflowStage::Cleanup => "cleanup",
            WorkflowStage::Done => "done",
            WorkflowStage::Aborted => "aborted",
        }
    }
}

impl std::fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
