use serde::Deserialize;

use crate::captions::domain::transcript_error::TranscriptError;
use crate::captions::domain::transcript_item::{ItemKind, TranscriptItem};

#[derive(Deserialize)]
struct ResultDocument {
    results: Results,
}

#[derive(Deserialize)]
struct Results {
    items: Vec<RawItem>,
}

#[derive(Deserialize)]
struct RawItem {
    #[serde(rename = "type")]
    kind: String,
    start_time: Option<String>,
    end_time: Option<String>,
    alternatives: Vec<Alternative>,
}

#[derive(Deserialize)]
struct Alternative {
    content: String,
    confidence: Option<String>,
}

/// Parse an Amazon Transcribe result document into transcript items.
///
/// Only the first (most confident) alternative of each item is kept.
/// Punctuation items normally carry no timestamps; they take the end time
/// of the item before them so the sequence stays monotonic.
pub fn parse_transcript(json: &str) -> Result<Vec<TranscriptItem>, TranscriptError> {
    let document: ResultDocument =
        serde_json::from_str(json).map_err(|e| TranscriptError::Malformed(e.to_string()))?;

    let mut items = Vec::with_capacity(document.results.items.len());
    let mut last_end = 0.0;

    for (position, raw) in document.results.items.into_iter().enumerate() {
        let kind = match raw.kind.as_str() {
            "pronunciation" => ItemKind::Word,
            "punctuation" => ItemKind::Punctuation,
            other => {
                return Err(TranscriptError::Malformed(format!(
                    "item {position}: unknown type '{other}'"
                )))
            }
        };

        let top = raw.alternatives.into_iter().next().ok_or_else(|| {
            TranscriptError::Malformed(format!("item {position}: no alternatives"))
        })?;

        let (start_time, end_time) = match (kind, raw.start_time, raw.end_time) {
            (_, Some(start), Some(end)) => (
                parse_seconds(&start, position, "start_time")?,
                parse_seconds(&end, position, "end_time")?,
            ),
            (ItemKind::Punctuation, _, _) => (last_end, last_end),
            (ItemKind::Word, _, _) => {
                return Err(TranscriptError::Malformed(format!(
                    "item {position}: word '{}' has no timestamps",
                    top.content
                )))
            }
        };

        let confidence = match top.confidence {
            Some(c) => c.parse::<f32>().map_err(|_| {
                TranscriptError::Malformed(format!("item {position}: invalid confidence '{c}'"))
            })?,
            None => 0.0,
        };

        last_end = end_time;
        items.push(TranscriptItem {
            kind,
            text: top.content,
            start_time,
            end_time,
            confidence,
        });
    }

    Ok(items)
}

fn parse_seconds(value: &str, position: usize, field: &str) -> Result<f64, TranscriptError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s >= 0.0)
        .ok_or_else(|| {
            TranscriptError::Malformed(format!("item {position}: invalid {field} '{value}'"))
        })
}
