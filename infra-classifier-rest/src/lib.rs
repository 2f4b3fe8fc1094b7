use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use sentiment_domain::{ClassifierPort, DomainError, Rating};

#[derive(Debug, Clone)]
pub struct RestClassifierConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

/// Client for a remote star-rating sentiment model. The backend answers
/// with labels like "4 stars"; only the leading digit matters.
pub struct RestClassifierAdapter {
    client: reqwest::Client,
    config: RestClassifierConfig,
}

impl RestClassifierAdapter {
    pub fn new(config: RestClassifierConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    sentence: &'a str,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    label: String,
}

#[async_trait]
impl ClassifierPort for RestClassifierAdapter {
    async fn initialize(&self) -> Result<(), DomainError> {
        let url = format!("{}/health", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|err| {
                DomainError::ClassifierUnavailable(format!("health probe failed: {err}"))
            })?;

        if !response.status().is_success() {
            return Err(DomainError::ClassifierUnavailable(format!(
                "health probe returned {}",
                response.status()
            )));
        }

        tracing::info!(base_url = %self.config.base_url, "classifier backend ready");
        Ok(())
    }

    async fn classify(&self, sentence: &str) -> Result<Rating, DomainError> {
        let url = format!("{}/classify", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.config.request_timeout)
            .json(&ClassifyRequest { sentence })
            .send()
            .await
            .map_err(|err| DomainError::ClassifierUnavailable(format!("request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(DomainError::ClassifierUnavailable(format!(
                "scoring returned {}",
                response.status()
            )));
        }

        let body: ClassifyResponse = response.json().await.map_err(|err| {
            DomainError::ClassifierUnavailable(format!("malformed response: {err}"))
        })?;

        parse_star_label(&body.label)
    }

    async fn shutdown(&self) {
        // nothing to release for an HTTP client
        tracing::info!(base_url = %self.config.base_url, "classifier client shut down");
    }
}

fn parse_star_label(label: &str) -> Result<Rating, DomainError> {
    label
        .trim()
        .chars()
        .next()
        .and_then(|ch| ch.to_digit(10))
        .and_then(|digit| u8::try_from(digit).ok())
        .and_then(Rating::new)
        .ok_or_else(|| {
            DomainError::ClassifierUnavailable(format!("malformed rating label: {label:?}"))
        })
}
