use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{SubmissionResponse, bad_request, error_response, format_validation_errors, invalid_body};
use crate::routes::submissions::common::CreateSubmissionRequest;
use crate::state::AppState;

/// POST /api/submissions
///
/// Creates a provisional submission with no media so the client can show it
/// immediately and upload the recording afterwards.
///
/// ### Request Body
/// ```json
/// { "assignmentId": "3f0c…", "studentId": "b71e…" }
/// ```
///
/// ### Responses
/// - `201 Created` with the submission (`mediaUrl` is `null`)
/// - `400 Bad Request` when either id is missing
/// - `404 Not Found` when the assignment does not exist
pub async fn create_submission(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateSubmissionRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };
    if let Err(validation_errors) = req.validate() {
        return bad_request(format_validation_errors(&validation_errors));
    }
    let assignment_id = req.assignment_id.unwrap_or_default();
    let student_id = req.student_id.unwrap_or_default();

    match app_state
        .coordinator()
        .create_provisional(&assignment_id, &student_id)
        .await
    {
        Ok(submission) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                SubmissionResponse::from(submission),
                "Submission created",
            )),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
