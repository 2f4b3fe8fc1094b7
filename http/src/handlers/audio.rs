use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use sentiment_application::AnalyzeAudioRequest;
use sentiment_domain::AudioAnalysisResult;

use crate::error::{error_mapper, HttpError};
use crate::upload::{has_allowed_extension, read_file_field};
use crate::AppState;

pub async fn analyze_audio(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<AudioAnalysisResult>), HttpError> {
    let upload = read_file_field(multipart).await?;

    if !has_allowed_extension(&upload.filename, &state.uploads.audio_extensions) {
        return Err(HttpError::UnsupportedMediaType {
            message: format!("unsupported audio format: {}", upload.filename),
        });
    }

    tracing::info!(
        filename = %upload.filename,
        byte_count = upload.data.len(),
        "received audio analysis request"
    );

    match state
        .audio
        .analyze(AnalyzeAudioRequest {
            data: upload.data,
            filename: upload.filename,
        })
        .await
    {
        Ok(result) => {
            tracing::info!(
                file_name = %result.file_name,
                segment_count = result.segments.len(),
                "audio analysis request completed"
            );
            Ok((StatusCode::OK, Json(result)))
        }
        Err(error) => {
            tracing::error!(error = %error, "audio analysis request failed");
            Err(error_mapper(error))
        }
    }
}
