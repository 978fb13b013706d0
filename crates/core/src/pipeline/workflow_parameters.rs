use std::path::{Path, PathBuf};

/// Immutable input of one caption run.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowParameters {
    bucket: String,
    input: PathBuf,
    output: PathBuf,
    delete_after: bool,
    language_code: String,
}

impl WorkflowParameters {
    pub fn new(
        bucket: &str,
        input: &Path,
        output: &Path,
        delete_after: bool,
        language_code: &str,
    ) -> Self {
        Self {
            bucket: bucket.trim_end_matches('/').to_string(),
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            delete_after,
            language_code: language_code.to_string(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn delete_after(&self) -> bool {
        self.delete_after
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Object key for the upload: the input's file name.
    pub fn object_key(&self) -> String {
        self.input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn media_uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.object_key())
    }
}
