use super::subtitle_cue::SubtitleCue;
use super::transcript_error::TranscriptError;
use super::transcript_item::{ItemKind, TranscriptItem};
use crate::shared::constants::MAX_CUE_DURATION_SECS;

/// Groups a flat, time-ordered token stream into subtitle cues.
///
/// A cue closes on every punctuation mark, and before any word that would
/// end more than `max_cue_duration` seconds after the cue started. The pass
/// is a single fold over the items; all running state lives in
/// [`CueAccumulator`].
#[derive(Debug, Clone, Copy)]
pub struct Segmenter {
    max_cue_duration: f64,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(MAX_CUE_DURATION_SECS)
    }
}

impl Segmenter {
    pub fn new(max_cue_duration: f64) -> Self {
        Self { max_cue_duration }
    }

    pub fn segment(&self, items: &[TranscriptItem]) -> Result<Vec<SubtitleCue>, TranscriptError> {
        let first = items.first().ok_or(TranscriptError::Empty)?;
        let acc = items
            .iter()
            .enumerate()
            .fold(CueAccumulator::starting_at(first.start_time), |acc, (i, item)| {
                self.step(acc, items, i, item)
            });
        Ok(acc.finish(items))
    }

    fn step(
        &self,
        mut acc: CueAccumulator,
        items: &[TranscriptItem],
        i: usize,
        item: &TranscriptItem,
    ) -> CueAccumulator {
        let previous_end = i.checked_sub(1).map(|p| items[p].end_time);

        match item.kind {
            ItemKind::Punctuation => {
                if acc.buffer.ends_with(' ') {
                    acc.buffer.pop();
                }
                acc.buffer.push_str(&item.text);
                // A leading punctuation mark has no predecessor; it ends itself.
                let mut acc = acc.close(previous_end.unwrap_or(item.end_time));
                if let Some(next) = items.get(i + 1) {
                    acc.start = next.start_time;
                }
                acc
            }
            ItemKind::Word if item.end_time - acc.start > self.max_cue_duration => {
                if let Some(end) = previous_end.filter(|_| !acc.buffer.is_empty()) {
                    acc = acc.close(end);
                }
                acc.start = item.start_time;
                acc.push_word(&item.text);
                acc
            }
            ItemKind::Word => {
                acc.push_word(&item.text);
                acc
            }
        }
    }
}

/// Running state of one segmentation pass.
#[derive(Debug)]
struct CueAccumulator {
    start: f64,
    buffer: String,
    cues: Vec<SubtitleCue>,
}

impl CueAccumulator {
    fn starting_at(start: f64) -> Self {
        Self {
            start,
            buffer: String::new(),
            cues: Vec::new(),
        }
    }

    fn push_word(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push(' ');
    }

    fn close(mut self, end: f64) -> Self {
        let text = std::mem::take(&mut self.buffer);
        self.cues.push(SubtitleCue {
            index: self.cues.len() + 1,
            start: self.start,
            end: end.max(self.start),
            text: text.trim().to_string(),
        });
        self
    }

    fn finish(self, items: &[TranscriptItem]) -> Vec<SubtitleCue> {
        if self.buffer.is_empty() {
            return self.cues;
        }
        let end = match items {
            [.., before, last] if last.is_punctuation() => before.end_time,
            [.., last] => last.end_time,
            [] => self.start,
        };
        self.close(end).cues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn word(text: &str, start: f64, end: f64) -> TranscriptItem {
        TranscriptItem::word(text, start, end)
    }

    fn punct(text: &str, at: f64) -> TranscriptItem {
        TranscriptItem::punctuation(text, at, at)
    }

    fn segment(items: &[TranscriptItem]) -> Vec<SubtitleCue> {
        Segmenter::default().segment(items).unwrap()
    }

    #[test]
    fn test_empty_input_is_error() {
        assert_eq!(Segmenter::default().segment(&[]), Err(TranscriptError::Empty));
    }

    #[test]
    fn test_punctuation_closes_cue() {
        let cues = segment(&[word("hi", 0.0, 0.5), punct(".", 0.5)]);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].index, 1);
        assert_relative_eq!(cues[0].start, 0.0);
        assert_relative_eq!(cues[0].end, 0.5);
        assert_eq!(cues[0].text, "hi.");
    }

    #[test]
    fn test_duration_threshold_splits() {
        let cues = segment(&[word("a", 0.0, 1.0), word("b", 6.0, 7.0)]);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "a");
        assert_relative_eq!(cues[0].start, 0.0);
        assert_relative_eq!(cues[0].end, 1.0);
        assert_eq!(cues[1].index, 2);
        assert_eq!(cues[1].text, "b");
        assert_relative_eq!(cues[1].start, 6.0);
        assert_relative_eq!(cues[1].end, 7.0);
    }

    #[test]
    fn test_threshold_measured_from_cue_start_not_buffer_span() {
        // Short word after a long pause still splits.
        let cues = segment(&[word("well", 0.0, 0.4), word("yes", 5.2, 5.3)]);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "well");
        assert_eq!(cues[1].text, "yes");
    }

    #[rstest]
    #[case::exactly_at_limit(5.0, 1)]
    #[case::just_over_limit(5.01, 2)]
    fn test_threshold_is_strict(#[case] second_end: f64, #[case] expected: usize) {
        let cues = segment(&[word("a", 0.0, 1.0), word("b", 4.5, second_end)]);
        assert_eq!(cues.len(), expected);
    }

    #[test]
    fn test_words_join_with_single_spaces() {
        let cues = segment(&[
            word("the", 0.0, 0.2),
            word("quick", 0.2, 0.5),
            word("fox", 0.5, 0.9),
            punct(",", 0.9),
            word("jumps", 1.0, 1.4),
        ]);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "the quick fox,");
        assert_relative_eq!(cues[0].end, 0.9);
        assert_eq!(cues[1].text, "jumps");
        assert_relative_eq!(cues[1].start, 1.0);
        assert_relative_eq!(cues[1].end, 1.4);
    }

    #[test]
    fn test_punctuation_advances_start_to_following_item() {
        let cues = segment(&[
            word("one", 0.0, 0.3),
            punct(".", 0.3),
            word("two", 2.0, 2.4),
            punct(".", 2.4),
        ]);
        assert_eq!(cues.len(), 2);
        assert_relative_eq!(cues[1].start, 2.0);
        assert_relative_eq!(cues[1].end, 2.4);
        assert_eq!(cues[1].text, "two.");
    }

    #[test]
    fn test_consecutive_punctuation_emits_punctuation_only_cue() {
        let cues = segment(&[word("what", 0.0, 0.4), punct("?", 0.4), punct("!", 0.4)]);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "what?");
        assert_eq!(cues[1].text, "!");
        assert_eq!(cues[1].index, 2);
    }

    #[test]
    fn test_leading_punctuation_uses_its_own_end() {
        let cues = segment(&[punct("\u{2014}", 0.2), word("so", 0.3, 0.5)]);
        assert_eq!(cues.len(), 2);
        assert_relative_eq!(cues[0].start, 0.2);
        assert_relative_eq!(cues[0].end, 0.2);
        assert_relative_eq!(cues[1].start, 0.3);
    }

    #[test]
    fn test_trailing_buffer_emits_final_cue() {
        let cues = segment(&[word("hello", 0.0, 0.5), word("there", 0.6, 1.1)]);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "hello there");
        assert_relative_eq!(cues[0].end, 1.1);
    }

    #[test]
    fn test_no_trailing_cue_after_final_punctuation() {
        let cues = segment(&[word("done", 0.0, 0.5), punct(".", 0.5)]);
        assert_eq!(cues.len(), 1);
    }

    #[test]
    fn test_single_long_word_does_not_emit_empty_cue() {
        let cues = segment(&[word("mmmmm", 0.0, 6.0)]);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "mmmmm");
        assert_relative_eq!(cues[0].end, 6.0);
    }

    #[test]
    fn test_custom_max_duration() {
        let cues = Segmenter::new(1.0)
            .segment(&[word("a", 0.0, 0.5), word("b", 0.6, 1.2)])
            .unwrap();
        assert_eq!(cues.len(), 2);
    }

    /// Deterministic pseudo-random transcripts for invariant checks.
    fn generated_transcript(seed: u64, len: usize) -> Vec<TranscriptItem> {
        let mut state = seed;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as f64 / (1u64 << 31) as f64
        };
        let mut t = 0.0;
        (0..len)
            .map(|_| {
                if next() < 0.2 {
                    punct(".", t)
                } else {
                    let start = t + next() * 3.0;
                    let end = start + next() * 2.0;
                    t = end;
                    word("w", start, end)
                }
            })
            .collect()
    }

    #[test]
    fn test_invariants_hold_for_generated_transcripts() {
        for seed in 0..200 {
            let items = generated_transcript(seed, 1 + (seed as usize % 40));
            let cues = segment(&items);

            for (i, cue) in cues.iter().enumerate() {
                assert_eq!(cue.index, i + 1, "seed {seed}: index gap");
                assert!(cue.end >= cue.start, "seed {seed}: cue {i} ends before start");
            }
            for pair in cues.windows(2) {
                assert!(pair[1].start >= pair[0].start, "seed {seed}: start regressed");
            }
        }
    }
}
