use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub type AppConfig = SentimentConfig;

const ENV_PREFIX: &str = "SENTIMENT_SERVICE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {variable}: {message}")]
    InvalidValue { variable: String, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub uploads: UploadConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub transcriber: TranscriberConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_document_size_bytes")]
    pub max_document_size_bytes: usize,
    #[serde(default = "default_document_extensions")]
    pub document_extensions: Vec<String>,
    #[serde(default = "default_audio_extensions")]
    pub audio_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_window_seconds")]
    pub window_seconds: f64,
    #[serde(default = "default_max_highlights")]
    pub max_highlights: usize,
    #[serde(default = "default_excerpt_max_chars")]
    pub excerpt_max_chars: usize,
    #[serde(default = "default_transcription_timeout_secs")]
    pub transcription_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_classifier_url")]
    pub base_url: String,
    #[serde(default = "default_classifier_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    #[serde(default = "default_transcriber_url")]
    pub base_url: String,
    #[serde(default = "default_transcriber_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            service: ServiceConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            uploads: UploadConfig::default(),
            analysis: AnalysisConfig::default(),
            classifier: ClassifierConfig::default(),
            transcriber: TranscriberConfig::default(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_document_size_bytes: default_max_document_size_bytes(),
            document_extensions: default_document_extensions(),
            audio_extensions: default_audio_extensions(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window_seconds(),
            max_highlights: default_max_highlights(),
            excerpt_max_chars: default_excerpt_max_chars(),
            transcription_timeout_secs: default_transcription_timeout_secs(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: default_classifier_url(),
            request_timeout_secs: default_classifier_timeout_secs(),
        }
    }
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            base_url: default_transcriber_url(),
            request_timeout_secs: default_transcriber_timeout_secs(),
        }
    }
}

/// Builds the default configuration and applies `SENTIMENT_SERVICE_*`
/// environment overrides on top.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = SentimentConfig::default();

    if let Some(host) = env_var("HOST") {
        config.server.host = host;
    }
    if let Some(port) = env_var("PORT") {
        config.server.port = parse(&port, "PORT")?;
    }
    if let Some(level) = env_var("LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(size) = env_var("MAX_DOCUMENT_SIZE") {
        config.service.uploads.max_document_size_bytes = parse(&size, "MAX_DOCUMENT_SIZE")?;
    }
    if let Some(extensions) = env_var("DOCUMENT_EXTENSIONS") {
        config.service.uploads.document_extensions = split_extensions(&extensions);
    }
    if let Some(extensions) = env_var("AUDIO_EXTENSIONS") {
        config.service.uploads.audio_extensions = split_extensions(&extensions);
    }
    if let Some(seconds) = env_var("WINDOW_SECONDS") {
        config.service.analysis.window_seconds = parse(&seconds, "WINDOW_SECONDS")?;
    }
    if let Some(count) = env_var("MAX_HIGHLIGHTS") {
        config.service.analysis.max_highlights = parse(&count, "MAX_HIGHLIGHTS")?;
    }
    if let Some(url) = env_var("CLASSIFIER_URL") {
        config.service.classifier.base_url = url;
    }
    if let Some(url) = env_var("TRANSCRIBER_URL") {
        config.service.transcriber.base_url = url;
    }

    Ok(config)
}

/// Installs the global tracing subscriber. The configured level acts as the
/// default directive; `RUST_LOG` still wins when set.
pub fn setup_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn env_var(suffix: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{suffix}"))
        .ok()
        .filter(|value| !value.is_empty())
}

fn parse<T: std::str::FromStr>(value: &str, variable: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err| ConfigError::InvalidValue {
        variable: format!("{ENV_PREFIX}_{variable}"),
        message: format!("{err}"),
    })
}

fn split_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|ext| ext.trim().to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_document_size_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_document_extensions() -> Vec<String> {
    [".pdf", ".docx", ".txt", ".xlsx"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_audio_extensions() -> Vec<String> {
    [".wav", ".mp3", ".m4a", ".ogg"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_window_seconds() -> f64 {
    30.0
}

fn default_max_highlights() -> usize {
    5
}

fn default_excerpt_max_chars() -> usize {
    1000
}

fn default_transcription_timeout_secs() -> u64 {
    30
}

fn default_classifier_url() -> String {
    "http://127.0.0.1:8501".to_string()
}

fn default_classifier_timeout_secs() -> u64 {
    10
}

fn default_transcriber_url() -> String {
    "http://127.0.0.1:8502".to_string()
}

fn default_transcriber_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_are_deterministic() {
        let cfg = SentimentConfig::default();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.service.analysis.window_seconds, 30.0);
        assert_eq!(cfg.service.uploads.max_document_size_bytes, 10 * 1024 * 1024);
        assert_eq!(cfg.service.uploads.document_extensions.len(), 4);
        assert_eq!(cfg.service.uploads.audio_extensions.len(), 4);
    }

    // single test so concurrent test threads never observe each other's
    // process environment
    #[test]
    fn environment_overrides_apply_and_malformed_values_error() {
        std::env::set_var("SENTIMENT_SERVICE_PORT", "9100");
        std::env::set_var("SENTIMENT_SERVICE_WINDOW_SECONDS", "15");
        std::env::set_var("SENTIMENT_SERVICE_DOCUMENT_EXTENSIONS", ".txt, .md");

        let cfg = load_config().expect("config loads");
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.service.analysis.window_seconds, 15.0);
        assert_eq!(cfg.service.uploads.document_extensions, vec![".txt", ".md"]);

        std::env::set_var("SENTIMENT_SERVICE_MAX_DOCUMENT_SIZE", "not-a-number");
        assert!(load_config().is_err());

        std::env::remove_var("SENTIMENT_SERVICE_PORT");
        std::env::remove_var("SENTIMENT_SERVICE_WINDOW_SECONDS");
        std::env::remove_var("SENTIMENT_SERVICE_DOCUMENT_EXTENSIONS");
        std::env::remove_var("SENTIMENT_SERVICE_MAX_DOCUMENT_SIZE");
    }
}
