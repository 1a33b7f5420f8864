use std::str::FromStr;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use db::models::profile::Role;
use db::repositories::SubmissionFilter;

use crate::response::ApiResponse;
use crate::routes::common::{SubmissionListItem, bad_request, error_response};
use crate::routes::submissions::common::ListSubmissionsQuery;
use crate::state::AppState;

/// GET /api/submissions?role=&studentId=&assignmentId=
///
/// Lists submissions newest first, each with decoded feedback, the assignment
/// and the student's name.
///
/// - `role=student` returns the caller's own submissions and requires
///   `studentId` (or `userId`). `assignmentId` narrows the result.
/// - `role=teacher` returns all submissions, or those of `assignmentId`.
///
/// ### Responses
/// - `200 OK` with an array of submissions
/// - `400 Bad Request` when `role` is missing or unknown, or a student
///   listing has no `studentId`
pub async fn list_submissions(
    State(app_state): State<AppState>,
    Query(query): Query<ListSubmissionsQuery>,
) -> Response {
    let role = match query.role.as_deref().map(str::trim) {
        None | Some("") => return bad_request("Missing role"),
        Some(raw) => match Role::from_str(raw) {
            Ok(role) => role,
            Err(_) => return bad_request(format!("Invalid role: {raw}")),
        },
    };

    let student_id = non_blank(query.student_id);
    let assignment_id = non_blank(query.assignment_id);

    let filter = match role {
        Role::Student => match &student_id {
            Some(id) => SubmissionFilter::ByStudent(id.clone()),
            None => return bad_request("Missing student ID"),
        },
        Role::Teacher => match &assignment_id {
            Some(id) => SubmissionFilter::ByAssignment(id.clone()),
            None => SubmissionFilter::All,
        },
    };

    match app_state.coordinator().list(filter).await {
        Ok(records) => {
            let items: Vec<SubmissionListItem> = records
                .into_iter()
                .filter(|r| {
                    assignment_id
                        .as_deref()
                        .is_none_or(|id| r.submission.assignment_id == id)
                })
                .map(SubmissionListItem::from)
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(items, "Submissions retrieved")),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
