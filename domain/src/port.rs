use async_trait::async_trait;

use crate::{AudioChunk, DecodedAudio, DomainError, Rating};

/// Sentence-level sentiment classifier. One instance is shared by every
/// analysis; `initialize` runs once at startup and `shutdown` once on exit.
#[async_trait]
pub trait ClassifierPort: Send + Sync {
    async fn initialize(&self) -> Result<(), DomainError>;

    async fn classify(&self, sentence: &str) -> Result<Rating, DomainError>;

    async fn shutdown(&self);
}

/// Speech-to-text over one audio window. `Ok(None)` means no speech was
/// detected, which is not an error.
#[async_trait]
pub trait SpeechToTextPort: Send + Sync {
    async fn transcribe(&self, window: AudioChunk) -> Result<Option<String>, DomainError>;
}

#[async_trait]
pub trait TextExtractorPort: Send + Sync {
    async fn extract_text(&self, data: &[u8], filename: &str) -> Result<String, DomainError>;
}

#[async_trait]
pub trait AudioDecoderPort: Send + Sync {
    async fn decode(&self, data: &[u8], filename: &str) -> Result<DecodedAudio, DomainError>;
}
