use crate::shared::timestamp::format_timestamp;

/// One timed caption entry.
#[derive(Clone, Debug, PartialEq)]
pub struct SubtitleCue {
    /// 1-based position in the caption file.
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl SubtitleCue {
    /// Render as an SRT block without the separating blank line.
    pub fn to_srt_block(&self) -> String {
        format!(
            "{}\n{} --> {}\n{}\n",
            self.index,
            format_timestamp(self.start),
            format_timestamp(self.end),
            self.text
        )
    }
}

/// Render cues as an SRT document, blocks separated by a blank line.
pub fn render_srt(cues: &[SubtitleCue]) -> String {
    cues.iter()
        .map(SubtitleCue::to_srt_block)
        .collect::<Vec<_>>()
        .join("\n")
}
