/// Whether a transcript token was spoken or inserted as punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Word,
    Punctuation,
}

/// One token of a transcription result, carrying only its top alternative.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptItem {
    pub kind: ItemKind,
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
    pub confidence: f32,
}

impl TranscriptItem {
    pub fn word(text: &str, start_time: f64, end_time: f64) -> Self {
        Self {
            kind: ItemKind::Word,
            text: text.to_string(),
            start_time,
            end_time,
            confidence: 1.0,
        }
    }

    pub fn punctuation(text: &str, start_time: f64, end_time: f64) -> Self {
        Self {
            kind: ItemKind::Punctuation,
            text: text.to_string(),
            start_time,
            end_time,
            confidence: 0.0,
        }
    }

    pub fn is_punctuation(&self) -> bool {
        self.kind == ItemKind::Punctuation
    }
}
