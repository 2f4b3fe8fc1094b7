use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use sentiment_application::AnalyzeDocumentRequest;
use sentiment_domain::AnalysisResult;

use crate::error::{error_mapper, HttpError};
use crate::upload::{has_allowed_extension, read_file_field};
use crate::AppState;

pub async fn analyze_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<AnalysisResult>), HttpError> {
    let upload = read_file_field(multipart).await?;

    if upload.data.len() > state.uploads.max_document_size_bytes {
        return Err(HttpError::PayloadTooLarge);
    }
    if !has_allowed_extension(&upload.filename, &state.uploads.document_extensions) {
        return Err(HttpError::UnsupportedMediaType {
            message: format!("unsupported file type: {}", upload.filename),
        });
    }

    tracing::info!(
        filename = %upload.filename,
        byte_count = upload.data.len(),
        "received document analysis request"
    );

    match state
        .document
        .analyze(AnalyzeDocumentRequest {
            data: upload.data,
            filename: upload.filename,
        })
        .await
    {
        Ok(result) => {
            tracing::info!(
                document_id = %result.document_id,
                "document analysis request completed"
            );
            Ok((StatusCode::OK, Json(result)))
        }
        Err(error) => {
            tracing::error!(error = %error, "document analysis request failed");
            Err(error_mapper(error))
        }
    }
}
