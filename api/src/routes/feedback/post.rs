use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use services::feedback::FeedbackCallback;

use crate::response::ApiResponse;
use crate::routes::common::{SubmissionResponse, bad_request, error_response, invalid_body};
use crate::state::AppState;

/// POST /api/feedback-callback
/// POST /api/webhook/feedback
///
/// Receives scored feedback from the analysis service. Only `submissionId`
/// is read here; the rest of the payload goes to the feedback normalizer,
/// which accepts flat keys (`wordChoiceScore`), nested objects (`wordChoice`)
/// and plain text (`wordChoiceFeedback`) per category.
///
/// ### Request Body
/// ```json
/// {
///   "submissionId": "9d2c…",
///   "score": 78,
///   "wordChoiceScore": 42,
///   "wordChoiceDescription": "clear",
///   "fillerWordList": "um, like",
///   "feedback": { "pace": "steady" }
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated submission
/// - `400 Bad Request` when `submissionId` is missing
/// - `404 Not Found` when the submission does not exist
pub async fn receive_feedback(
    State(app_state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(payload) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };
    let Some(submission_id) = FeedbackCallback::submission_id(&payload) else {
        return bad_request("Missing submission ID");
    };

    match app_state
        .coordinator()
        .ingest_feedback(&submission_id, &payload)
        .await
    {
        Ok(submission) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SubmissionResponse::from(submission),
                "Feedback updated successfully",
            )),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
