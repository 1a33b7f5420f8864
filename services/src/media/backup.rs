use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use thiserror::Error;
use tracing::debug;

use util::paths;

use super::MediaBlob;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("storage rejected upload with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("storage is not configured")]
    NotConfigured,
}

pub type BackupFuture<'a> = Pin<Box<dyn Future<Output = Result<String, BackupError>> + Send + 'a>>;

/// Durable copy of a recording. Resolves to a publicly reachable URL.
pub trait BackupStorage: Send + Sync {
    fn upload<'a>(&'a self, key: &'a str, blob: &'a MediaBlob) -> BackupFuture<'a>;
}

/// Writes recordings below a directory that the API serves at `public_base_url`.
#[derive(Debug, Clone)]
pub struct LocalBackupStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBackupStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl BackupStorage for LocalBackupStorage {
    fn upload<'a>(&'a self, key: &'a str, blob: &'a MediaBlob) -> BackupFuture<'a> {
        Box::pin(async move {
            let path = paths::media_path(&self.root, key)
                .ok_or_else(|| BackupError::InvalidKey(key.to_owned()))?;
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, &blob.bytes).await?;
            debug!(path = %path.display(), size = blob.size(), "Stored local backup");
            Ok(format!("{}/{}", self.public_base_url, key))
        })
    }
}

/// Uploads to an object storage bucket over HTTP with a bearer service key.
#[derive(Clone)]
pub struct RemoteBackupStorage {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

impl RemoteBackupStorage {
    pub fn new(
        base_url: impl Into<String>,
        bucket: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            bucket: bucket.into(),
            service_key: service_key.into(),
        }
    }

    pub fn upload_url(&self, key: &str) -> String {
        format!("{}/object/{}/{}", self.base_url, self.bucket, key)
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/object/public/{}/{}", self.base_url, self.bucket, key)
    }
}

impl BackupStorage for RemoteBackupStorage {
    fn upload<'a>(&'a self, key: &'a str, blob: &'a MediaBlob) -> BackupFuture<'a> {
        Box::pin(async move {
            if !paths::is_valid_media_key(key) {
                return Err(BackupError::InvalidKey(key.to_owned()));
            }
            if self.base_url.is_empty() || self.service_key.is_empty() {
                return Err(BackupError::NotConfigured);
            }

            let response = self
                .client
                .post(self.upload_url(key))
                .header(AUTHORIZATION, format!("Bearer {}", self.service_key))
                .header(CONTENT_TYPE, blob.content_type())
                .body(blob.bytes.clone())
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(BackupError::Rejected {
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(self.public_url(key))
        })
    }
}
