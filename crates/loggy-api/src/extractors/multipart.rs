//! Multipart extractor and single-file helper.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::{FromRequest, Request};
use bytes::Bytes;

use loggy_core::error::AppError;

/// `Multipart` whose rejections are reported as `BadRequest`.
#[derive(Debug)]
pub struct ApiMultipart(pub Multipart);

impl<S> FromRequest<S> for ApiMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Multipart::from_request(req, state)
            .await
            .map(Self)
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))
    }
}

/// A file field read fully into memory.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Content type declared for the part; empty when absent.
    pub content_type: String,
    /// Part body.
    pub data: Bytes,
}

impl ApiMultipart {
    /// Read the first field called `name`, skipping any others.
    pub async fn file(mut self, name: &str) -> Result<FilePart, AppError> {
        while let Some(field) = self.0.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(name) {
                continue;
            }
            let content_type = field.content_type().unwrap_or_default().to_string();
            let data = field.bytes().await.map_err(multipart_error)?;
            return Ok(FilePart { content_type, data });
        }
        Err(AppError::bad_request(format!("Missing multipart field '{name}'")))
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::bad_request(format!("Invalid multipart body: {}", err.body_text()))
}
