//! Submission lifecycle.
//!
//! A submission is created provisionally so the student gets an id right
//! away, then patched by two independent flows: media attachment once the
//! backup copy exists, and feedback ingestion whenever the analysis service
//! calls back. The two flows touch disjoint columns and may arrive in either
//! order.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use db::models::{assignment, submission};
use db::repositories::{NewSubmission, SubmissionFilter, SubmissionPatch, SubmissionRecord, SubmissionStore};
use util::paths;

use crate::error::{SubmissionError, SubmissionResult};
use crate::feedback::{CategoryFeedback, FeedbackCallback};
use crate::media::{DispatchMetadata, MediaBlob, MediaTransferAgent};

/// Result of a full server-side recording flow.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    pub submission: submission::Model,
    /// Whether a backup copy was stored and its URL attached.
    pub backed_up: bool,
}

#[derive(Clone)]
pub struct SubmissionCoordinator {
    store: Arc<dyn SubmissionStore>,
    transfer: MediaTransferAgent,
}

impl SubmissionCoordinator {
    pub fn new(store: Arc<dyn SubmissionStore>, transfer: MediaTransferAgent) -> Self {
        Self { store, transfer }
    }

    pub fn store(&self) -> &Arc<dyn SubmissionStore> {
        &self.store
    }

    /// Inserts a submission with no media so the caller has an id immediately.
    pub async fn create_provisional(
        &self,
        assignment_id: &str,
        student_id: &str,
    ) -> SubmissionResult<submission::Model> {
        let (assignment_id, student_id) = Self::require_ids(assignment_id, student_id)?;
        let assignment = self.require_assignment(assignment_id).await?;
        self.insert_provisional(&assignment, student_id).await
    }

    /// Records the backup URL on a submission.
    ///
    /// Attaching the URL already stored is a no-op. A different URL on a
    /// submission that already has media is rejected and the row is unchanged.
    pub async fn attach_media(
        &self,
        submission_id: &str,
        media_url: &str,
    ) -> SubmissionResult<submission::Model> {
        let submission_id = submission_id.trim();
        if submission_id.is_empty() {
            return Err(SubmissionError::validation("Missing submission ID"));
        }
        let media_url = Self::require_media_url(media_url)?;

        let patch = SubmissionPatch {
            media_url: Some(media_url.clone()),
            ..Default::default()
        };
        let updated = self
            .store
            .patch(submission_id, patch)
            .await?
            .ok_or_else(|| SubmissionError::not_found("Submission not found"))?;

        if updated.media_url.as_deref() != Some(media_url.as_str()) {
            warn!(submission_id = %updated.id, "Rejected replacement of attached media");
            return Err(SubmissionError::validation(
                "Submission already has media attached",
            ));
        }

        info!(submission_id = %updated.id, "Media attached to submission");
        Ok(updated)
    }

    /// Merges an analysis callback into the stored submission.
    ///
    /// Only categories present in `payload` are written; `score` and the raw
    /// `feedback` blob are written when present.
    pub async fn ingest_feedback(
        &self,
        submission_id: &str,
        payload: &Value,
    ) -> SubmissionResult<submission::Model> {
        let submission_id = submission_id.trim();
        if submission_id.is_empty() {
            return Err(SubmissionError::validation("Missing submission ID"));
        }

        let callback = FeedbackCallback::from_payload(payload);
        let patch = Self::feedback_patch(&callback)?;

        let updated = self
            .store
            .patch(submission_id, patch)
            .await?
            .ok_or_else(|| SubmissionError::not_found("Submission not found"))?;

        info!(
            submission_id = %updated.id,
            score = ?callback.score,
            word_choice = callback.categories.word_choice.is_some(),
            body_language = callback.categories.body_language.is_some(),
            filler_words = callback.categories.filler_words.is_some(),
            "Feedback ingested"
        );
        Ok(updated)
    }

    /// Full recording flow: provisional row, dispatch, then media attachment.
    ///
    /// An analysis failure is returned after the provisional row has been
    /// written; that row is left without media.
    pub async fn record(
        &self,
        assignment_id: &str,
        student_id: &str,
        blob: MediaBlob,
    ) -> SubmissionResult<RecordOutcome> {
        let (assignment_id, student_id) = Self::require_ids(assignment_id, student_id)?;
        // Both ids become segments of the backup object key.
        if !paths::is_key_segment(student_id) {
            return Err(SubmissionError::validation("Invalid student ID"));
        }
        if !paths::is_key_segment(assignment_id) {
            return Err(SubmissionError::validation("Invalid assignment ID"));
        }
        if blob.is_empty() {
            return Err(SubmissionError::validation("Recorded video is empty"));
        }
        let assignment = self.require_assignment(assignment_id).await?;
        let provisional = self.insert_provisional(&assignment, student_id).await?;

        let metadata = DispatchMetadata {
            student_id: provisional.student_id.clone(),
            assignment_id: provisional.assignment_id.clone(),
            submission_id: provisional.id.clone(),
            assignment_title: assignment.title.clone(),
            assignment_description: assignment.description.clone(),
            submitted_at: provisional.submitted_at,
        };

        let Some(reference) = self.transfer.dispatch(&blob, &metadata).await? else {
            warn!(submission_id = %provisional.id, "Submission recorded without backup copy");
            return Ok(RecordOutcome {
                submission: provisional,
                backed_up: false,
            });
        };

        let submission = self.attach_media(&provisional.id, &reference.url).await?;
        Ok(RecordOutcome {
            submission,
            backed_up: true,
        })
    }

    pub async fn list(&self, filter: SubmissionFilter) -> SubmissionResult<Vec<SubmissionRecord>> {
        Ok(self.store.query(filter).await?)
    }

    /// Decoded feedback for a stored submission.
    pub fn feedback_of(submission: &submission::Model) -> CategoryFeedback {
        CategoryFeedback::from_submission(submission)
    }

    fn require_ids<'a>(assignment_id: &'a str, student_id: &'a str) -> SubmissionResult<(&'a str, &'a str)> {
        let assignment_id = assignment_id.trim();
        let student_id = student_id.trim();
        if student_id.is_empty() {
            return Err(SubmissionError::validation("Missing student ID"));
        }
        if assignment_id.is_empty() {
            return Err(SubmissionError::validation("Missing assignment ID"));
        }
        Ok((assignment_id, student_id))
    }

    fn require_media_url(media_url: &str) -> SubmissionResult<String> {
        let media_url = media_url.trim();
        if media_url.is_empty() {
            return Err(SubmissionError::validation("Missing media URL"));
        }
        match Url::parse(media_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
                Ok(media_url.to_owned())
            }
            _ => Err(SubmissionError::validation(
                "mediaUrl must be an absolute http(s) URL",
            )),
        }
    }

    async fn require_assignment(&self, assignment_id: &str) -> SubmissionResult<assignment::Model> {
        self.store
            .find_assignment(assignment_id)
            .await?
            .ok_or_else(|| SubmissionError::not_found("Assignment not found"))
    }

    async fn insert_provisional(
        &self,
        assignment: &assignment::Model,
        student_id: &str,
    ) -> SubmissionResult<submission::Model> {
        let row = self
            .store
            .insert(NewSubmission {
                assignment_id: assignment.id.clone(),
                student_id: student_id.to_owned(),
                submitted_at: Utc::now(),
            })
            .await?;

        info!(
            submission_id = %row.id,
            assignment_id = %row.assignment_id,
            student_id = %row.student_id,
            "Provisional submission created"
        );
        Ok(row)
    }

    fn feedback_patch(callback: &FeedbackCallback) -> SubmissionResult<SubmissionPatch> {
        let categories = &callback.categories;
        Ok(SubmissionPatch {
            media_url: None,
            score: callback.score,
            word_choice_feedback: categories
                .word_choice
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
            body_language_feedback: categories
                .body_language
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
            filler_word_feedback: categories
                .filler_words
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
            raw_feedback: callback.raw_feedback.clone(),
        })
    }
}
