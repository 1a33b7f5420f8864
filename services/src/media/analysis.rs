use std::future::Future;
use std::pin::Pin;

use chrono::SecondsFormat;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use super::{DispatchMetadata, MediaBlob};
use crate::error::SubmissionError;

pub type AnalysisFuture<'a> = Pin<Box<dyn Future<Output = Result<(), SubmissionError>> + Send + 'a>>;

/// Receiver of recordings for scoring. Feedback comes back later through the
/// callback route, so a successful submit carries no data.
pub trait AnalysisSink: Send + Sync {
    fn submit<'a>(&'a self, blob: &'a MediaBlob, metadata: &'a DispatchMetadata) -> AnalysisFuture<'a>;
}

/// Posts recordings as `multipart/form-data` to the analysis webhook.
#[derive(Clone)]
pub struct HttpAnalysisSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnalysisSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim().to_owned(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form(blob: &MediaBlob, metadata: &DispatchMetadata) -> Result<Form, SubmissionError> {
        let video = Part::stream_with_length(blob.bytes.clone(), blob.size() as u64)
            .file_name(blob.file_name())
            .mime_str(&blob.content_type())
            .map_err(|e| SubmissionError::Internal(format!("Invalid video content type: {e}")))?;

        Ok(Form::new()
            .part("video", video)
            .text("studentId", metadata.student_id.clone())
            .text("assignmentId", metadata.assignment_id.clone())
            .text("submissionId", metadata.submission_id.clone())
            .text("assignmentTitle", metadata.assignment_title.clone())
            .text("assignmentDescription", metadata.assignment_description.clone())
            .text(
                "submittedAt",
                metadata.submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .text("videoFormat", blob.format.clone())
            .text("videoSize", blob.size().to_string()))
    }
}

impl AnalysisSink for HttpAnalysisSink {
    fn submit<'a>(&'a self, blob: &'a MediaBlob, metadata: &'a DispatchMetadata) -> AnalysisFuture<'a> {
        Box::pin(async move {
            if self.endpoint.is_empty() {
                return Err(SubmissionError::Upstream {
                    status: None,
                    message: "analysis endpoint is not configured".into(),
                });
            }

            let form = Self::form(blob, metadata)?;
            debug!(
                endpoint = %self.endpoint,
                submission_id = %metadata.submission_id,
                size = blob.size(),
                "Posting recording to analysis endpoint"
            );

            let response = self
                .client
                .post(&self.endpoint)
                .multipart(form)
                .send()
                .await
                .map_err(|e| SubmissionError::Upstream {
                    status: None,
                    message: format!("analysis endpoint unreachable: {e}"),
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(SubmissionError::Upstream {
                    status: Some(status.as_u16()),
                    message: format!("analysis endpoint returned {status}"),
                });
            }
            Ok(())
        })
    }
}
