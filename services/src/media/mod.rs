//! Moving a finished recording out of the request: one copy to the analysis
//! service (critical) and one to backup storage (best effort).

pub mod analysis;
pub mod backup;

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use util::paths;

use crate::error::SubmissionResult;

pub use analysis::{AnalysisFuture, AnalysisSink, HttpAnalysisSink};
pub use backup::{
    BackupError, BackupFuture, BackupStorage, LocalBackupStorage, RemoteBackupStorage,
};

/// A recorded video held in memory.
#[derive(Debug, Clone)]
pub struct MediaBlob {
    pub bytes: Bytes,
    /// File extension without the dot, e.g. `webm`.
    pub format: String,
}

impl MediaBlob {
    pub fn new(bytes: impl Into<Bytes>, format: impl Into<String>) -> Self {
        let format = format.into();
        let format = format.trim().trim_start_matches('.').to_ascii_lowercase();
        Self {
            bytes: bytes.into(),
            format: if format.is_empty() { "webm".to_owned() } else { format },
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn content_type(&self) -> String {
        mime_guess::from_ext(&self.format)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_owned()
    }

    pub fn file_name(&self) -> String {
        format!("recording.{}", self.format)
    }
}

/// Context sent alongside the recording to the analysis service.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchMetadata {
    pub student_id: String,
    pub assignment_id: String,
    pub submission_id: String,
    pub assignment_title: String,
    pub assignment_description: String,
    pub submitted_at: DateTime<Utc>,
}

/// Where the backup copy ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReference {
    pub key: String,
    pub url: String,
}

#[derive(Clone)]
pub struct MediaTransferAgent {
    analysis: Arc<dyn AnalysisSink>,
    backup: Arc<dyn BackupStorage>,
}

impl MediaTransferAgent {
    pub fn new(analysis: Arc<dyn AnalysisSink>, backup: Arc<dyn BackupStorage>) -> Self {
        Self { analysis, backup }
    }

    /// Sends `blob` to the analysis service and backup storage concurrently.
    ///
    /// An analysis failure is returned as an error. A backup failure is logged
    /// and reported as `Ok(None)`.
    pub async fn dispatch(
        &self,
        blob: &MediaBlob,
        metadata: &DispatchMetadata,
    ) -> SubmissionResult<Option<BackupReference>> {
        let key = paths::media_key(
            &metadata.student_id,
            &metadata.assignment_id,
            Utc::now().timestamp_millis(),
            &blob.format,
        );

        let (analysis, backup) = tokio::join!(
            self.analysis.submit(blob, metadata),
            self.backup.upload(&key, blob)
        );

        if let Err(err) = analysis {
            warn!(
                submission_id = %metadata.submission_id,
                backed_up = backup.is_ok(),
                error = %err,
                "Analysis dispatch failed"
            );
            return Err(err);
        }

        match backup {
            Ok(url) => {
                info!(
                    submission_id = %metadata.submission_id,
                    key = %key,
                    size = blob.size(),
                    "Recording dispatched and backed up"
                );
                Ok(Some(BackupReference { key, url }))
            }
            Err(err) => {
                warn!(
                    submission_id = %metadata.submission_id,
                    key = %key,
                    error = %err,
                    "Backup upload failed; continuing without media URL"
                );
                Ok(None)
            }
        }
    }
}
