use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use sentiment_application::{
    AnalyzeAudioRequest, AudioAnalysisUseCase, AudioAnalysisUseCaseImpl, ApplicationError,
};
use sentiment_domain::{
    AudioChunk, AudioDecoderPort, ClassifierPort, DecodedAudio, DomainError, Rating,
    SpeechToTextPort,
};

const SAMPLE_RATE_HZ: u32 = 100;

/// Decoder stub producing a recording whose windows are told apart by their
/// constant sample value.
struct StubDecoder {
    window_levels: Vec<f32>,
    window_seconds: f64,
}

#[async_trait]
impl AudioDecoderPort for StubDecoder {
    async fn decode(&self, _data: &[u8], _filename: &str) -> Result<DecodedAudio, DomainError> {
        let samples_per_window = (self.window_seconds * f64::from(SAMPLE_RATE_HZ)) as usize;
        let samples: Vec<f32> = self
            .window_levels
            .iter()
            .flat_map(|&level| std::iter::repeat(level).take(samples_per_window))
            .collect();
        Ok(DecodedAudio {
            samples,
            sample_rate_hz: SAMPLE_RATE_HZ,
            channels: 1,
            format: "wav".to_string(),
        })
    }
}

struct FailingDecoder;

#[async_trait]
impl AudioDecoderPort for FailingDecoder {
    async fn decode(&self, _data: &[u8], _filename: &str) -> Result<DecodedAudio, DomainError> {
        Err(DomainError::AudioDecode("bad container".to_string()))
    }
}

/// Transcriber stub keyed on the window's sample level: 0.0 is silence,
/// 0.9 hangs long enough to trip the orchestrator deadline, anything else
/// yields a fixed positive sentence.
struct LevelTranscriber;

#[async_trait]
impl SpeechToTextPort for LevelTranscriber {
    async fn transcribe(&self, window: AudioChunk) -> Result<Option<String>, DomainError> {
        let level = window.samples.first().copied().unwrap_or(0.0);
        if level == 0.0 {
            return Ok(None);
        }
        if level > 0.8 {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        Ok(Some(
            "Everything about this call sounded wonderful.".to_string(),
        ))
    }
}

struct ErroringTranscriber;

#[async_trait]
impl SpeechToTextPort for ErroringTranscriber {
    async fn transcribe(&self, _window: AudioChunk) -> Result<Option<String>, DomainError> {
        Err(DomainError::Transcription("speech backend refused".to_string()))
    }
}

struct PositiveClassifier;

#[async_trait]
impl ClassifierPort for PositiveClassifier {
    async fn initialize(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn classify(&self, _sentence: &str) -> Result<Rating, DomainError> {
        Ok(Rating::new(5).expect("stub rating is valid"))
    }

    async fn shutdown(&self) {}
}

struct UnavailableClassifier;

#[async_trait]
impl ClassifierPort for UnavailableClassifier {
    async fn initialize(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn classify(&self, _sentence: &str) -> Result<Rating, DomainError> {
        Err(DomainError::ClassifierUnavailable(
            "scoring backend down".to_string(),
        ))
    }

    async fn shutdown(&self) {}
}

fn request() -> AnalyzeAudioRequest {
    AnalyzeAudioRequest {
        data: vec![1, 2, 3, 4],
        filename: "call.wav".to_string(),
    }
}

fn usecase(
    decoder: Arc<dyn AudioDecoderPort>,
    transcriber: Arc<dyn SpeechToTextPort>,
    classifier: Arc<dyn ClassifierPort>,
) -> AudioAnalysisUseCaseImpl {
    AudioAnalysisUseCaseImpl::new(
        decoder,
        transcriber,
        classifier,
        30.0,
        Duration::from_millis(250),
    )
}

#[tokio::test]
async fn silent_window_is_recorded_absent_and_skipped_in_overall() {
    let decoder = StubDecoder {
        window_levels: vec![0.5, 0.0],
        window_seconds: 30.0,
    };
    let usecase = usecase(
        Arc::new(decoder),
        Arc::new(LevelTranscriber),
        Arc::new(PositiveClassifier),
    );

    let result = usecase.analyze(request()).await.expect("analysis succeeds");

    assert_eq!(result.segments.len(), 2);
    let scored = &result.segments[0];
    assert_eq!((scored.start_time, scored.end_time), (0.0, 30.0));
    let scored_sentiment = scored.sentiment.expect("first window is scored");
    assert_eq!(scored_sentiment.positive, 1.0);

    let silent = &result.segments[1];
    assert_eq!((silent.start_time, silent.end_time), (30.0, 60.0));
    assert!(silent.sentiment.is_none());
    assert!(silent.text.is_none());

    // the absent window must not dilute the mean
    assert_eq!(result.overall_sentiment, scored_sentiment);
}

#[tokio::test]
async fn all_windows_silent_falls_back_to_neutral_with_full_timeline() {
    let decoder = StubDecoder {
        window_levels: vec![0.0, 0.0, 0.0],
        window_seconds: 30.0,
    };
    let usecase = usecase(
        Arc::new(decoder),
        Arc::new(LevelTranscriber),
        Arc::new(PositiveClassifier),
    );

    let result = usecase.analyze(request()).await.expect("analysis succeeds");

    assert_eq!(result.segments.len(), 3);
    assert!(result.segments.iter().all(|s| s.sentiment.is_none()));
    assert_eq!(result.overall_sentiment.neutral, 1.0);
    assert_eq!(result.overall_sentiment.positive, 0.0);
    assert_eq!(result.overall_sentiment.negative, 0.0);
}

#[tokio::test]
async fn transcription_error_degrades_one_window_only() {
    let decoder = StubDecoder {
        window_levels: vec![0.5],
        window_seconds: 30.0,
    };
    let usecase = usecase(
        Arc::new(decoder),
        Arc::new(ErroringTranscriber),
        Arc::new(PositiveClassifier),
    );

    let result = usecase.analyze(request()).await.expect("analysis succeeds");

    assert_eq!(result.segments.len(), 1);
    assert!(result.segments[0].sentiment.is_none());
    assert_eq!(result.overall_sentiment.neutral, 1.0);
}

#[tokio::test]
async fn stalled_window_times_out_without_cancelling_siblings() {
    let decoder = StubDecoder {
        window_levels: vec![0.5, 0.9],
        window_seconds: 30.0,
    };
    let usecase = usecase(
        Arc::new(decoder),
        Arc::new(LevelTranscriber),
        Arc::new(PositiveClassifier),
    );

    let result = usecase.analyze(request()).await.expect("analysis succeeds");

    assert_eq!(result.segments.len(), 2);
    assert!(result.segments[0].sentiment.is_some());
    assert!(result.segments[1].sentiment.is_none());
    assert_eq!(
        result.overall_sentiment,
        result.segments[0].sentiment.unwrap()
    );
}

#[tokio::test]
async fn windows_follow_the_recording_duration() {
    // 13 five-second stretches of silence: 65 seconds of audio, windowed
    // at 30 seconds, clips the tail
    let decoder = StubDecoder {
        window_levels: vec![0.0; 13],
        window_seconds: 5.0,
    };
    let usecase = usecase(
        Arc::new(decoder),
        Arc::new(LevelTranscriber),
        Arc::new(PositiveClassifier),
    );

    let result = usecase.analyze(request()).await.expect("analysis succeeds");

    assert_eq!(result.duration, 65.0);
    let bounds: Vec<(f64, f64)> = result
        .segments
        .iter()
        .map(|s| (s.start_time, s.end_time))
        .collect();
    assert_eq!(bounds, vec![(0.0, 30.0), (30.0, 60.0), (60.0, 65.0)]);
}

#[tokio::test]
async fn undecodable_audio_is_fatal() {
    let usecase = usecase(
        Arc::new(FailingDecoder),
        Arc::new(LevelTranscriber),
        Arc::new(PositiveClassifier),
    );

    let error = usecase.analyze(request()).await.expect_err("must fail");
    assert_eq!(error.reason(), "audio_decode_error");
}

#[tokio::test]
async fn classifier_failure_is_fatal_for_the_whole_recording() {
    let decoder = StubDecoder {
        window_levels: vec![0.5, 0.5],
        window_seconds: 30.0,
    };
    let usecase = usecase(
        Arc::new(decoder),
        Arc::new(LevelTranscriber),
        Arc::new(UnavailableClassifier),
    );

    let error = usecase.analyze(request()).await.expect_err("must fail");
    assert_eq!(error.reason(), "classifier_error");
    assert!(matches!(
        error,
        ApplicationError::Domain(DomainError::ClassifierUnavailable(_))
    ));
}

#[tokio::test]
async fn audio_result_carries_container_metadata() {
    let decoder = StubDecoder {
        window_levels: vec![0.5],
        window_seconds: 30.0,
    };
    let usecase = usecase(
        Arc::new(decoder),
        Arc::new(LevelTranscriber),
        Arc::new(PositiveClassifier),
    );

    let result = usecase.analyze(request()).await.expect("analysis succeeds");

    assert_eq!(result.file_name, "call.wav");
    assert_eq!(
        result.metadata.get("sample_rate").and_then(|v| v.as_u64()),
        Some(u64::from(SAMPLE_RATE_HZ))
    );
    assert_eq!(
        result.metadata.get("channels").and_then(|v| v.as_u64()),
        Some(1)
    );
    assert_eq!(
        result.metadata.get("format").and_then(|v| v.as_str()),
        Some("wav")
    );
}
