pub mod job_name;
pub mod media_format;
pub mod transcript_fetcher;
pub mod transcription_job;
pub mod transcription_service;
