use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Discrete star rating produced by the sentence classifier. 1-2 count as
/// negative, 3 as neutral, 4-5 as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 >= 4
    }

    pub fn is_negative(self) -> bool {
        self.0 <= 2
    }

    pub fn is_neutral(self) -> bool {
        self.0 == 3
    }

    /// Distance of the normalized rating from the neutral midpoint; higher
    /// means a more extreme (confident) sentiment.
    pub fn confidence(self) -> f64 {
        (f64::from(self.0) / f64::from(Self::MAX) - 0.5).abs()
    }
}

/// Proportions of positive/negative/neutral units over some scope. The
/// fields do not have to sum to 1 exactly; empty scopes degrade to the
/// all-neutral fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentDistribution {
    pub fn neutral_fallback() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
        }
    }

    /// Derived diagnostic, intentionally not serialized.
    pub fn compound(&self) -> f64 {
        self.positive - self.negative
    }
}

/// A classified text fragment. Lives only for the duration of one
/// aggregation call.
#[derive(Debug, Clone)]
pub struct ScoredUnit {
    pub text: String,
    pub rating: Rating,
}

/// One fixed-length slice of a recording. `sentiment` is `None` when the
/// window produced no usable transcript; the timing fields stay meaningful
/// either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedSegment {
    pub start_time: f64,
    pub end_time: f64,
    pub text: Option<String>,
    pub sentiment: Option<SentimentDistribution>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    pub text: String,
    pub score: SentimentDistribution,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub document_id: String,
    pub results: Vec<SentimentResult>,
    pub metadata: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioAnalysisResult {
    pub file_name: String,
    pub duration: f64,
    pub segments: Vec<TimedSegment>,
    pub overall_sentiment: SentimentDistribution,
    pub metadata: Map<String, Value>,
}

/// Mono PCM audio handed over by the decoder port.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate_hz: u32,
    pub channels: u16,
    pub format: String,
}

impl DecodedAudio {
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate_hz == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate_hz)
    }
}

#[derive(Debug, Clone)]
pub struct AudioChunk {
    pub sample_rate_hz: u32,
    pub samples: Vec<f32>,
}
