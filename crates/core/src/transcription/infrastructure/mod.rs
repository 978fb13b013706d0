pub mod aws_transcription_service;
pub mod http_transcript_fetcher;
