use std::sync::Arc;
use std::time::Duration;

use anyhow::Error;
use tokio::net::TcpListener;

use sentiment_application::{
    AudioAnalysisUseCase, AudioAnalysisUseCaseImpl, DocumentAnalysisUseCase,
    DocumentAnalysisUseCaseImpl,
};
use sentiment_configuration::AppConfig;
use sentiment_domain::{AudioDecoderPort, ClassifierPort, SpeechToTextPort, TextExtractorPort};
use sentiment_http_server::{create_router, AppState};
use sentiment_infra::PlainTextExtractorAdapter;
use sentiment_infra_audio::WavAudioDecoderAdapter;
use sentiment_infra_classifier_rest::{RestClassifierAdapter, RestClassifierConfig};
use sentiment_infra_stt_rest::{RestSpeechToTextAdapter, RestSpeechToTextConfig};

pub async fn build_and_run(config: AppConfig) -> Result<(), Error> {
    let app = Application::new(config).await?;
    app.run().await
}

pub struct Application {
    pub config: AppConfig,
    state: AppState,
    classifier: Arc<dyn ClassifierPort>,
}

impl Application {
    pub async fn new(config: AppConfig) -> Result<Self, Error> {
        tracing::info!(
            classifier_url = %config.service.classifier.base_url,
            transcriber_url = %config.service.transcriber.base_url,
            "initializing sentiment application"
        );

        let classifier: Arc<dyn ClassifierPort> =
            Arc::new(RestClassifierAdapter::new(RestClassifierConfig {
                base_url: config.service.classifier.base_url.clone(),
                request_timeout: Duration::from_secs(config.service.classifier.request_timeout_secs),
            }));
        // one-time capability setup; no analysis may start before this succeeds
        classifier.initialize().await?;

        let transcriber: Arc<dyn SpeechToTextPort> =
            Arc::new(RestSpeechToTextAdapter::new(RestSpeechToTextConfig {
                base_url: config.service.transcriber.base_url.clone(),
                request_timeout: Duration::from_secs(
                    config.service.transcriber.request_timeout_secs,
                ),
            }));
        let extractor: Arc<dyn TextExtractorPort> = Arc::new(PlainTextExtractorAdapter::new());
        let decoder: Arc<dyn AudioDecoderPort> = Arc::new(WavAudioDecoderAdapter::new());

        let analysis = &config.service.analysis;
        let document: Arc<dyn DocumentAnalysisUseCase> = Arc::new(DocumentAnalysisUseCaseImpl::new(
            extractor,
            Arc::clone(&classifier),
            analysis.max_highlights,
            analysis.excerpt_max_chars,
        ));
        let audio: Arc<dyn AudioAnalysisUseCase> = Arc::new(AudioAnalysisUseCaseImpl::new(
            decoder,
            transcriber,
            Arc::clone(&classifier),
            analysis.window_seconds,
            Duration::from_secs(analysis.transcription_timeout_secs),
        ));

        let state = AppState {
            document,
            audio,
            uploads: config.service.uploads.clone(),
        };

        Ok(Self {
            config,
            state,
            classifier,
        })
    }

    pub async fn run(self) -> Result<(), Error> {
        let address = format!("{}:{}", self.config.server.host, self.config.server.port);
        tracing::info!(address = %address, "starting sentiment analysis server");

        let listener = TcpListener::bind(&address).await?;
        axum::serve(listener, create_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.classifier.shutdown().await;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
}
