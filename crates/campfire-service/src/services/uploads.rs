//! Upload storage on the local filesystem
//!
//! Files land in `{root}/{folder}/{timestamp}_{NNNN}.{ext}` and are served
//! back statically under `/uploads`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use campfire_common::{allowed_extension, generate_upload_filename, AppError, UploadKind};
use chrono::Utc;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

use super::error::{ServiceError, ServiceResult};

/// Fresh names tried before giving up on a save
const MAX_NAME_ATTEMPTS: usize = 100;

/// A file received from a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name the client sent; only its extension is kept
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            bytes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    max_bytes: usize,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Create every upload folder below the root
    pub async fn ensure_folders(&self) -> ServiceResult<()> {
        for folder in UploadKind::FOLDERS {
            tokio::fs::create_dir_all(self.root.join(folder))
                .await
                .map_err(storage_error)?;
        }
        Ok(())
    }

    /// Check the extension against `kind` without writing anything
    pub fn accept(&self, file: &UploadedFile, kind: UploadKind) -> ServiceResult<String> {
        if file.bytes.is_empty() {
            return Err(ServiceError::validation("No file selected"));
        }
        if file.bytes.len() > self.max_bytes {
            return Err(ServiceError::validation(format!(
                "File too large: max {} bytes",
                self.max_bytes
            )));
        }
        allowed_extension(&file.filename, kind).ok_or_else(|| {
            ServiceError::validation(format!(
                "Invalid file type. Allowed: {}",
                kind.allowed_extensions().join(", ")
            ))
        })
    }

    /// Validate and write `file`, returning the stored file name
    #[instrument(skip(self, file), fields(filename = %file.filename, size = file.bytes.len()))]
    pub async fn save(&self, file: &UploadedFile, kind: UploadKind) -> ServiceResult<String> {
        let ext = self.accept(file, kind)?;

        // Names only carry second resolution; never clobber an earlier upload
        for _ in 0..MAX_NAME_ATTEMPTS {
            let name = generate_upload_filename(&ext, Utc::now());
            let path = self.root.join(kind.folder()).join(&name);

            let mut out = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(out) => out,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(storage_error(e)),
            };
            out.write_all(&file.bytes).await.map_err(storage_error)?;
            out.flush().await.map_err(storage_error)?;

            debug!(path = %path.display(), "Stored upload");
            return Ok(name);
        }

        Err(ServiceError::internal(
            "Could not find a free upload file name",
        ))
    }

    /// Best-effort removal of a previously stored file
    pub async fn remove(&self, kind: UploadKind, name: &str) {
        let path = self.root.join(kind.folder()).join(name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            debug!(path = %path.display(), error = %e, "Could not remove old upload");
        }
    }
}

fn storage_error(err: std::io::Error) -> ServiceError {
    ServiceError::App(AppError::Storage(err.to_string()))
}
