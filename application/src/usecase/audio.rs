use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::{json, Map};
use validator::Validate;

use sentiment_domain::{
    aggregate, combine, segment_audio, segment_text, AudioAnalysisResult, AudioChunk,
    AudioDecoderPort, ClassifierPort, DecodedAudio, SentimentDistribution, SpeechToTextPort,
    TimedSegment,
};

use crate::{AnalyzeAudioRequest, ApplicationError};

#[async_trait]
pub trait AudioAnalysisUseCase: Send + Sync {
    async fn analyze(
        &self,
        request: AnalyzeAudioRequest,
    ) -> Result<AudioAnalysisResult, ApplicationError>;
}

pub struct AudioAnalysisUseCaseImpl {
    decoder: Arc<dyn AudioDecoderPort>,
    transcriber: Arc<dyn SpeechToTextPort>,
    classifier: Arc<dyn ClassifierPort>,
    window_seconds: f64,
    transcription_timeout: Duration,
}

impl AudioAnalysisUseCaseImpl {
    pub fn new(
        decoder: Arc<dyn AudioDecoderPort>,
        transcriber: Arc<dyn SpeechToTextPort>,
        classifier: Arc<dyn ClassifierPort>,
        window_seconds: f64,
        transcription_timeout: Duration,
    ) -> Self {
        Self {
            decoder,
            transcriber,
            classifier,
            window_seconds,
            transcription_timeout,
        }
    }

    /// Transcribes and scores one window. Transcription trouble (failure,
    /// timeout, silence) degrades to an absent-sentiment segment so the rest
    /// of the timeline survives; classifier failure aborts the request.
    async fn analyze_window(
        &self,
        audio: &DecodedAudio,
        start_time: f64,
        end_time: f64,
    ) -> Result<TimedSegment, ApplicationError> {
        let window = slice_window(audio, start_time, end_time);
        let transcribe = self.transcriber.transcribe(window);

        let transcript = match tokio::time::timeout(self.transcription_timeout, transcribe).await {
            Ok(Ok(text)) => text,
            Ok(Err(err)) if err.is_window_local() => {
                tracing::warn!(start_time, error = %err, "window transcription failed");
                None
            }
            Ok(Err(err)) => return Err(err.into()),
            Err(_) => {
                tracing::warn!(start_time, "window transcription timed out");
                None
            }
        };

        let text = match transcript {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Ok(absent_segment(start_time, end_time)),
        };

        let sentences = segment_text(&text);
        if sentences.is_empty() {
            return Ok(absent_segment(start_time, end_time));
        }

        let ratings = try_join_all(
            sentences
                .iter()
                .map(|sentence| self.classifier.classify(sentence)),
        )
        .await?;

        Ok(TimedSegment {
            start_time,
            end_time,
            text: Some(text),
            sentiment: Some(aggregate(&ratings)),
        })
    }
}

#[async_trait]
impl AudioAnalysisUseCase for AudioAnalysisUseCaseImpl {
    async fn analyze(
        &self,
        request: AnalyzeAudioRequest,
    ) -> Result<AudioAnalysisResult, ApplicationError> {
        request
            .validate()
            .map_err(|err| ApplicationError::Validation(err.to_string()))?;

        tracing::debug!(
            filename = %request.filename,
            byte_count = request.data.len(),
            "starting audio analysis"
        );

        let audio = self
            .decoder
            .decode(&request.data, &request.filename)
            .await?;
        let duration = audio.duration_seconds();
        let windows = segment_audio(duration, self.window_seconds);

        let segments = try_join_all(
            windows
                .iter()
                .map(|&(start, end)| self.analyze_window(&audio, start, end)),
        )
        .await?;

        let scored: Vec<SentimentDistribution> = segments
            .iter()
            .filter_map(|segment| segment.sentiment)
            .collect();
        let overall_sentiment = combine(&scored);

        let mut metadata = Map::new();
        metadata.insert("sample_rate".to_string(), json!(audio.sample_rate_hz));
        metadata.insert("channels".to_string(), json!(audio.channels));
        metadata.insert("format".to_string(), json!(audio.format));

        tracing::debug!(
            filename = %request.filename,
            duration,
            segment_count = segments.len(),
            scored_segments = scored.len(),
            "audio analysis completed"
        );

        Ok(AudioAnalysisResult {
            file_name: request.filename,
            duration,
            segments,
            overall_sentiment,
            metadata,
        })
    }
}

fn absent_segment(start_time: f64, end_time: f64) -> TimedSegment {
    TimedSegment {
        start_time,
        end_time,
        text: None,
        sentiment: None,
    }
}

fn slice_window(audio: &DecodedAudio, start_time: f64, end_time: f64) -> AudioChunk {
    let rate = f64::from(audio.sample_rate_hz);
    let start = (start_time * rate) as usize;
    let end = ((end_time * rate).ceil() as usize).min(audio.samples.len());
    let start = start.min(end);
    AudioChunk {
        sample_rate_hz: audio.sample_rate_hz,
        samples: audio.samples[start..end].to_vec(),
    }
}
