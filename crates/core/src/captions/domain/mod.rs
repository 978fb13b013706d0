pub mod segmenter;
pub mod subtitle_cue;
pub mod transcript_error;
pub mod transcript_item;
