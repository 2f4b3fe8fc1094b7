use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;
use serde_json::{json, Map};
use uuid::Uuid;
use validator::Validate;

use sentiment_domain::{
    aggregate, segment_text, select_highlights, AnalysisResult, ClassifierPort, DomainError,
    ScoredUnit, SentimentResult, TextExtractorPort,
};

use crate::{AnalyzeDocumentRequest, ApplicationError};

#[async_trait]
pub trait DocumentAnalysisUseCase: Send + Sync {
    async fn analyze(
        &self,
        request: AnalyzeDocumentRequest,
    ) -> Result<AnalysisResult, ApplicationError>;
}

pub struct DocumentAnalysisUseCaseImpl {
    extractor: Arc<dyn TextExtractorPort>,
    classifier: Arc<dyn ClassifierPort>,
    max_highlights: usize,
    excerpt_max_chars: usize,
}

impl DocumentAnalysisUseCaseImpl {
    pub fn new(
        extractor: Arc<dyn TextExtractorPort>,
        classifier: Arc<dyn ClassifierPort>,
        max_highlights: usize,
        excerpt_max_chars: usize,
    ) -> Self {
        Self {
            extractor,
            classifier,
            max_highlights,
            excerpt_max_chars,
        }
    }
}

#[async_trait]
impl DocumentAnalysisUseCase for DocumentAnalysisUseCaseImpl {
    async fn analyze(
        &self,
        request: AnalyzeDocumentRequest,
    ) -> Result<AnalysisResult, ApplicationError> {
        request
            .validate()
            .map_err(|err| ApplicationError::Validation(err.to_string()))?;

        tracing::debug!(
            filename = %request.filename,
            byte_count = request.data.len(),
            "starting document analysis"
        );

        let text = self
            .extractor
            .extract_text(&request.data, &request.filename)
            .await?;

        let sentences = segment_text(&text);
        if sentences.is_empty() {
            return Err(DomainError::NoContent.into());
        }

        // One rating per sentence or none at all; a failing classifier
        // aborts the batch instead of skewing the distribution.
        let ratings = try_join_all(
            sentences
                .iter()
                .map(|sentence| self.classifier.classify(sentence)),
        )
        .await?;

        let units: Vec<ScoredUnit> = sentences
            .iter()
            .zip(ratings.iter())
            .map(|(text, rating)| ScoredUnit {
                text: text.clone(),
                rating: *rating,
            })
            .collect();

        let score = aggregate(&ratings);
        let mut highlights = select_highlights(&units);
        highlights.truncate(self.max_highlights);

        let mut metadata = Map::new();
        metadata.insert("filename".to_string(), json!(request.filename));

        let result = AnalysisResult {
            document_id: Uuid::new_v4().to_string(),
            results: vec![SentimentResult {
                text: excerpt(&text, self.excerpt_max_chars),
                score,
                highlights,
            }],
            metadata,
            timestamp: Utc::now(),
        };

        tracing::debug!(
            document_id = %result.document_id,
            sentence_count = sentences.len(),
            "document analysis completed"
        );

        Ok(result)
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}
