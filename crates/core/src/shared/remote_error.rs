/// Opaque failure reported by a remote collaborator (storage, transcription,
/// result download).
pub type RemoteError = Box<dyn std::error::Error + Send + Sync>;
