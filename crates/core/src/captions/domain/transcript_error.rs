use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TranscriptError {
    #[error("transcript contains no items")]
    Empty,
    #[error("malformed transcript: {0}")]
    Malformed(String),
}
