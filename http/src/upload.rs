use axum::extract::Multipart;

use crate::error::HttpError;

pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Pulls the `file` field out of a multipart body.
pub async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, HttpError> {
    while let Some(field) = multipart.next_field().await.map_err(|err| {
        HttpError::Validation {
            message: format!("failed to read multipart body: {err}"),
        }
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|err| HttpError::Validation {
                message: format!("failed to read file: {err}"),
            })?
            .to_vec();
        return Ok(UploadedFile { filename, data });
    }

    Err(HttpError::Validation {
        message: "no file uploaded".to_string(),
    })
}

pub fn has_allowed_extension(filename: &str, allowed: &[String]) -> bool {
    let lowered = filename.to_ascii_lowercase();
    allowed.iter().any(|ext| lowered.ends_with(ext.as_str()))
}
