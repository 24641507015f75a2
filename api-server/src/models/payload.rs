//! Log payload extraction
//!
//! Both analyze routes take the same form: a multipart upload (`log_file` or
//! `log_text`) or a urlencoded `log_text` field.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header,
    Form,
};
use serde::Deserialize;

use crate::AppError;

pub const LOG_FILE_FIELD: &str = "log_file";
pub const LOG_TEXT_FIELD: &str = "log_text";

/// Urlencoded form body
#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    pub log_text: Option<String>,
}

/// Log data submitted for analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogPayload {
    /// Decoded content of an uploaded file, always analyzed as a batch
    File(String),
    /// Pasted text; a batch only if it spans several lines
    Text(String),
}

#[axum::async_trait]
impl<S> FromRequest<S> for LogPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
            from_multipart(multipart).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<AnalyzeForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
            form.log_text.map(LogPayload::Text).ok_or(AppError::NoLogData)
        } else {
            Err(AppError::NoLogData)
        }
    }
}

/// A `log_file` part wins over `log_text` regardless of part order
async fn from_multipart(mut multipart: Multipart) -> Result<LogPayload, AppError> {
    let mut file = None;
    let mut text = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::rejected(e.status(), e.body_text()))?
    {
        match field.name() {
            Some(LOG_FILE_FIELD) => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
                let content = String::from_utf8(bytes.to_vec()).map_err(|_| {
                    AppError::ValidationError("Uploaded log file is not valid UTF-8".to_string())
                })?;
                file = Some(content);
            }
            Some(LOG_TEXT_FIELD) => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
                text = Some(value);
            }
            _ => {}
        }
    }

    match (file, text) {
        (Some(content), _) => Ok(LogPayload::File(content)),
        (None, Some(value)) => Ok(LogPayload::Text(value)),
        (None, None) => Err(AppError::NoLogData),
    }
}
