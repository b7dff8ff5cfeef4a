//! Resume upload → plain text, for clients that hold a file rather than pasted text.

use axum::extract::{multipart::MultipartRejection, Multipart};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::auth::AuthUser;
use crate::errors::AppError;

const FILE_FIELD: &str = "file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Detects the document type from the declared content type, falling
    /// back to the file extension.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Option<Self> {
        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase());
        match mime.as_deref() {
            Some("application/pdf") => return Some(DocumentKind::Pdf),
            Some("text/plain") => return Some(DocumentKind::PlainText),
            _ => {}
        }

        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => Some(DocumentKind::Pdf),
            Some("txt") => Some(DocumentKind::PlainText),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub file_name: String,
    pub characters: usize,
    pub text: String,
}

/// POST /api/v1/ats/extract (multipart, field `file`)
///
/// Returns the document's text, ready to send as `resumeText`. Nothing is persisted.
pub async fn handle_extract(
    user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().unwrap_or("resume").to_string();
        let kind = DocumentKind::detect(&file_name, field.content_type()).ok_or_else(|| {
            AppError::Validation("Only PDF and plain-text resumes are supported".to_string())
        })?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let text = tidy_text(&extract_text(kind, data).await?);
        if text.is_empty() {
            return Err(AppError::UnprocessableEntity(format!(
                "No text could be extracted from {file_name}"
            )));
        }

        info!(
            "Extracted {} characters from {file_name} ({kind:?}) for {}",
            text.chars().count(),
            user.subject
        );

        return Ok(Json(ExtractResponse {
            file_name,
            characters: text.chars().count(),
            text,
        }));
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

/// Decodes the raw document. PDF parsing runs on the blocking pool since it
/// is CPU-bound and may panic on malformed input.
pub async fn extract_text(kind: DocumentKind, data: Bytes) -> Result<String, AppError> {
    match kind {
        DocumentKind::PlainText => String::from_utf8(data.to_vec())
            .map_err(|_| AppError::UnprocessableEntity("File is not valid UTF-8 text".to_string())),
        DocumentKind::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&data)
        })
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("PDF could not be read: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(format!("PDF could not be read: {e}"))),
    }
}

/// Collapses whitespace within lines and drops blank lines.
pub fn tidy_text(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
