use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{SubmissionResponse, bad_request, error_response, format_validation_errors, invalid_body};
use crate::routes::submissions::common::AttachMediaRequest;
use crate::state::AppState;

/// PATCH /api/submissions/{submission_id}
///
/// Attaches the public URL of the backup copy. Sending the URL that is
/// already stored succeeds without writing.
///
/// ### Request Body
/// ```json
/// { "mediaUrl": "https://storage.example/videos/s/a/1700000000000.webm" }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated submission
/// - `400 Bad Request` when `mediaUrl` is missing or not an absolute http(s) URL,
///   or when different media is already attached
/// - `404 Not Found` when the submission does not exist
pub async fn attach_media(
    State(app_state): State<AppState>,
    Path(submission_id): Path<String>,
    payload: Result<Json<AttachMediaRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };
    if let Err(validation_errors) = req.validate() {
        return bad_request(format_validation_errors(&validation_errors));
    }

    let media_url = req.media_url.unwrap_or_default();

    match app_state
        .coordinator()
        .attach_media(&submission_id, &media_url)
        .await
    {
        Ok(submission) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SubmissionResponse::from(submission),
                "Submission updated",
            )),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
