//! Multipart upload extractor
//!
//! Collects every file part of a `multipart/form-data` body. Size and type
//! checks are left to the upload store.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use campfire_service::UploadedFile;

use crate::response::ApiError;

#[derive(Debug, Clone, Default)]
pub struct Uploads(pub Vec<UploadedFile>);

impl Uploads {
    /// The first file, for single-file endpoints
    pub fn single(self) -> Result<UploadedFile, ApiError> {
        self.0
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::multipart("No file selected"))
    }
}

#[async_trait]
impl<S> FromRequest<S> for Uploads
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::multipart(e.body_text()))?;

        let mut files = Vec::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::multipart(e.body_text()))?
        {
            // Plain form fields carry no file name
            let Some(filename) = field.file_name().map(str::to_string) else {
                continue;
            };
            if filename.is_empty() {
                continue;
            }
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::multipart(e.body_text()))?;

            files.push(UploadedFile {
                filename,
                content_type,
                bytes: bytes.to_vec(),
            });
        }

        Ok(Uploads(files))
    }
}
