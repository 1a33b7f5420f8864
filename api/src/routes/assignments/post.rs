use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::Validate;

use db::models::assignment::Model as AssignmentModel;

use crate::response::ApiResponse;
use crate::routes::assignments::common::{CreateAssignmentRequest, SubmitAssignmentRequest};
use crate::routes::common::{
    AssignmentResponse, SubmissionResponse, bad_request, error_response, format_validation_errors,
    invalid_body,
};
use crate::state::AppState;

/// POST /api/assignments
///
/// ### Request Body
/// ```json
/// {
///   "title": "Elevator pitch",
///   "description": "Pitch your project in 60 seconds",
///   "dueDate": "2025-10-01T09:00:00Z"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the assignment
/// - `400 Bad Request` when any field is missing
pub async fn create_assignment(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateAssignmentRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };
    if let Err(validation_errors) = req.validate() {
        return bad_request(format_validation_errors(&validation_errors));
    }
    let (Some(title), Some(description), Some(due_date)) = (req.title, req.description, req.due_date)
    else {
        return bad_request("Title, description and due date are required");
    };

    match AssignmentModel::create(app_state.db(), title.trim(), description.trim(), due_date)
        .await
    {
        Ok(assignment) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                AssignmentResponse::from(assignment),
                "Assignment created",
            )),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to create assignment");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to create assignment")),
            )
                .into_response()
        }
    }
}

/// POST /api/assignments/{assignment_id}/submit
///
/// Direct submission for clients that upload the video themselves: creates the
/// submission and, when `videoUrl` is given, attaches it.
///
/// ### Request Body
/// ```json
/// { "studentId": "b71e…", "videoUrl": "https://storage.example/videos/…" }
/// ```
///
/// ### Responses
/// - `201 Created` with the submission
/// - `400 Bad Request` when `studentId` is missing or `videoUrl` is invalid
/// - `404 Not Found` when the assignment does not exist
pub async fn submit_assignment(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<String>,
    payload: Result<Json<SubmitAssignmentRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };
    if let Err(validation_errors) = req.validate() {
        return bad_request(format_validation_errors(&validation_errors));
    }

    let student_id = req.student_id.unwrap_or_default();
    let coordinator = app_state.coordinator();
    let mut submission = match coordinator
        .create_provisional(&assignment_id, &student_id)
        .await
    {
        Ok(submission) => submission,
        Err(err) => return error_response(err),
    };

    if let Some(video_url) = req.video_url.as_deref().filter(|u| !u.trim().is_empty()) {
        submission = match coordinator.attach_media(&submission.id, video_url).await {
            Ok(updated) => updated,
            Err(err) => return error_response(err),
        };
    }

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            SubmissionResponse::from(submission),
            "Submission created",
        )),
    )
        .into_response()
}
