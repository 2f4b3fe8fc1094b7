use async_trait::async_trait;

use sentiment_domain::{DomainError, TextExtractorPort};

/// Extracts text from plain UTF-8 uploads. Binary document formats plug in
/// behind the same port through their own adapters.
#[derive(Default)]
pub struct PlainTextExtractorAdapter;

impl PlainTextExtractorAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractorPort for PlainTextExtractorAdapter {
    async fn extract_text(&self, data: &[u8], filename: &str) -> Result<String, DomainError> {
        let text = std::str::from_utf8(data).map_err(|err| {
            DomainError::Extraction(format!("{filename} is not valid utf-8: {err}"))
        })?;

        let sanitized = sanitize(text);
        if sanitized.is_empty() {
            return Err(DomainError::Extraction(format!(
                "no text content in {filename}"
            )));
        }

        tracing::debug!(
            filename = %filename,
            char_count = sanitized.chars().count(),
            "text extraction completed"
        );

        Ok(sanitized)
    }
}

/// Drops non-whitespace control characters and normalizes line endings.
fn sanitize(text: &str) -> String {
    text.replace("\r\n", "\n")
        .chars()
        .filter(|ch| !ch.is_control() || matches!(ch, '\n' | '\t'))
        .collect::<String>()
        .trim()
        .to_string()
}
