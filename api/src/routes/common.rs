//! Helpers and DTOs shared by several route groups.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use validator::ValidationErrors;

use db::models::{assignment, submission};
use db::repositories::SubmissionRecord;
use services::SubmissionError;
use services::feedback::{BodyLanguageFeedback, CategoryFeedback, FillerWordFeedback, WordChoiceFeedback};

use crate::response::ApiResponse;

/// Joins every field-level validation message into a single string.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}

/// A JSON body that failed to parse or bind gets the same 400 envelope as a
/// failed field validation.
pub fn invalid_body(rejection: JsonRejection) -> Response {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    bad_request(format!("Invalid request body: {}", rejection.body_text()))
}

/// Maps a pipeline error onto its HTTP status and the response envelope.
///
/// Internal details are logged and replaced by a generic message.
pub fn error_response(err: SubmissionError) -> Response {
    let (status, message) = match err {
        SubmissionError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        SubmissionError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        err @ SubmissionError::Upstream { .. } => (StatusCode::BAD_GATEWAY, err.to_string()),
        SubmissionError::Internal(detail) => {
            tracing::error!(detail = %detail, "Submission request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_owned(),
            )
        }
    };
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    pub media_url: Option<String>,
    pub submitted_at: String,
    pub score: Option<f64>,
    pub word_choice_feedback: Option<WordChoiceFeedback>,
    pub body_language_feedback: Option<BodyLanguageFeedback>,
    pub filler_word_feedback: Option<FillerWordFeedback>,
    pub raw_feedback: Option<Value>,
}

impl From<submission::Model> for SubmissionResponse {
    fn from(row: submission::Model) -> Self {
        let feedback = CategoryFeedback::from_submission(&row);
        Self {
            id: row.id,
            assignment_id: row.assignment_id,
            student_id: row.student_id,
            media_url: row.media_url,
            submitted_at: timestamp(row.submitted_at),
            score: row.score,
            word_choice_feedback: feedback.word_choice,
            body_language_feedback: feedback.body_language,
            filler_word_feedback: feedback.filler_words,
            raw_feedback: row.raw_feedback,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub created_at: String,
}

impl From<assignment::Model> for AssignmentResponse {
    fn from(a: assignment::Model) -> Self {
        Self {
            id: a.id,
            title: a.title,
            description: a.description,
            due_date: timestamp(a.due_date),
            created_at: timestamp(a.created_at),
        }
    }
}

/// A listed submission with its assignment and student name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionListItem {
    #[serde(flatten)]
    pub submission: SubmissionResponse,
    pub assignment: Option<AssignmentResponse>,
    pub student_name: Option<String>,
}

impl From<SubmissionRecord> for SubmissionListItem {
    fn from(record: SubmissionRecord) -> Self {
        Self {
            submission: record.submission.into(),
            assignment: record.assignment.map(Into::into),
            student_name: record.student_name,
        }
    }
}
