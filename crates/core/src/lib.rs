//! Media-to-subtitle pipeline: upload to S3, transcribe with Amazon
//! Transcribe, and segment the word-level result into SRT cues.

pub mod captions;
pub mod pipeline;
pub mod shared;
pub mod storage;
pub mod transcription;
