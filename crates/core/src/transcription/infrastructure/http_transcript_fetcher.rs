use crate::shared::remote_error::RemoteError;
use crate::transcription::domain::transcript_fetcher::TranscriptFetcher;

/// Fetches result documents over plain HTTP(S).
pub struct HttpTranscriptFetcher {
    client: reqwest::blocking::Client,
}

impl HttpTranscriptFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpTranscriptFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptFetcher for HttpTranscriptFetcher {
    fn fetch(&self, result_uri: &str) -> Result<String, RemoteError> {
        let body = self
            .client
            .get(result_uri)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())?;
        Ok(body)
    }
}
