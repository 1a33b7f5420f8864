use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::routes::common::SubmissionResponse;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, max = 200, message = "Title is required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Description is required"),
        length(min = 1, message = "Description is required")
    )]
    pub description: Option<String>,
    #[validate(required(message = "Due date is required"))]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssignmentRequest {
    #[validate(
        required(message = "Missing student ID"),
        length(min = 1, message = "Missing student ID")
    )]
    pub student_id: Option<String>,
    pub video_url: Option<String>,
}

/// Result of a recording upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    #[serde(flatten)]
    pub submission: SubmissionResponse,
    pub backed_up: bool,
}
