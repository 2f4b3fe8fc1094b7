use thiserror::Error;

/// Failure taxonomy shared by both analysis pipelines. Every variant maps to
/// a stable reason code surfaced in error responses.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("text extraction failed: {0}")]
    Extraction(String),

    #[error("no analyzable content")]
    NoContent,

    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("audio decoding failed: {0}")]
    AudioDecode(String),
}

impl DomainError {
    pub fn reason(&self) -> &'static str {
        match self {
            DomainError::Extraction(_) => "no_text_extracted",
            DomainError::NoContent => "no_content",
            DomainError::ClassifierUnavailable(_) => "classifier_error",
            DomainError::Transcription(_) => "transcription_failed",
            DomainError::AudioDecode(_) => "audio_decode_error",
        }
    }

    /// Per-window transcription trouble is recoverable on the audio path;
    /// everything else aborts the request it occurs in.
    pub fn is_window_local(&self) -> bool {
        matches!(self, DomainError::Transcription(_))
    }
}
