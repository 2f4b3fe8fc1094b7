use std::io::Cursor;

use async_trait::async_trait;
use hound::SampleFormat;

use sentiment_domain::{AudioDecoderPort, DecodedAudio, DomainError};

/// Decodes WAV containers into mono f32 PCM. Multi-channel input is
/// downmixed by averaging the channels of each frame.
#[derive(Default)]
pub struct WavAudioDecoderAdapter;

impl WavAudioDecoderAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioDecoderPort for WavAudioDecoderAdapter {
    async fn decode(&self, data: &[u8], filename: &str) -> Result<DecodedAudio, DomainError> {
        let reader = hound::WavReader::new(Cursor::new(data))
            .map_err(|err| DomainError::AudioDecode(format!("unreadable wav container: {err}")))?;
        let spec = reader.spec();
        let channels = spec.channels;

        let interleaved = read_samples(reader, spec)?;
        if interleaved.is_empty() {
            return Err(DomainError::AudioDecode(
                "no audio samples decoded".to_string(),
            ));
        }

        let samples = if channels > 1 {
            downmix(&interleaved, usize::from(channels))
        } else {
            interleaved
        };

        let decoded = DecodedAudio {
            samples,
            sample_rate_hz: spec.sample_rate,
            channels,
            format: container_format(filename),
        };

        tracing::debug!(
            filename = %filename,
            sample_rate_hz = decoded.sample_rate_hz,
            channels = decoded.channels,
            duration_seconds = decoded.duration_seconds(),
            "audio decoded to mono pcm"
        );

        Ok(decoded)
    }
}

fn read_samples(
    reader: hound::WavReader<Cursor<&[u8]>>,
    spec: hound::WavSpec,
) -> Result<Vec<f32>, DomainError> {
    match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| DomainError::AudioDecode(format!("corrupt sample data: {err}"))),
        SampleFormat::Int => {
            let max_amplitude = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|sample| {
                    sample
                        .map(|value| value as f32 / max_amplitude)
                        .map_err(|err| {
                            DomainError::AudioDecode(format!("corrupt sample data: {err}"))
                        })
                })
                .collect()
        }
    }
}

fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

fn container_format(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("wav")
        .to_ascii_lowercase()
}
