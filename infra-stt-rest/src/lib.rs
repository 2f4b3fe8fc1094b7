use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;

use sentiment_domain::{AudioChunk, DomainError, SpeechToTextPort};

#[derive(Debug, Clone)]
pub struct RestSpeechToTextConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

/// Client for a remote speech-to-text backend. Windows are shipped as
/// 16-bit WAV; an empty transcript means no speech was detected.
pub struct RestSpeechToTextAdapter {
    client: reqwest::Client,
    config: RestSpeechToTextConfig,
}

impl RestSpeechToTextAdapter {
    pub fn new(config: RestSpeechToTextConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SpeechToTextPort for RestSpeechToTextAdapter {
    async fn transcribe(&self, window: AudioChunk) -> Result<Option<String>, DomainError> {
        if window.samples.is_empty() {
            return Ok(None);
        }

        let wav = encode_wav(&window)?;
        let part = multipart::Part::bytes(wav)
            .file_name("window.wav")
            .mime_str("audio/wav")
            .map_err(|err| DomainError::Transcription(format!("mime: {err}")))?;
        let form = multipart::Form::new().part("file", part);

        let url = format!("{}/transcribe", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.config.request_timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|err| DomainError::Transcription(format!("request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(DomainError::Transcription(format!(
                "transcription returned {}",
                response.status()
            )));
        }

        let transcript = response
            .text()
            .await
            .map_err(|err| DomainError::Transcription(format!("body: {err}")))?;
        let transcript = transcript.trim();

        tracing::debug!(chars = transcript.len(), "window transcription completed");

        if transcript.is_empty() {
            Ok(None)
        } else {
            Ok(Some(transcript.to_string()))
        }
    }
}

fn encode_wav(window: &AudioChunk) -> Result<Vec<u8>, DomainError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: window.sample_rate_hz,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|err| DomainError::Transcription(format!("wav encoding: {err}")))?;
        for &sample in &window.samples {
            let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
            writer
                .write_sample(value)
                .map_err(|err| DomainError::Transcription(format!("wav encoding: {err}")))?;
        }
        writer
            .finalize()
            .map_err(|err| DomainError::Transcription(format!("wav encoding: {err}")))?;
    }
    Ok(cursor.into_inner())
}
