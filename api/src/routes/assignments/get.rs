use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use db::models::assignment::Model as AssignmentModel;

use crate::response::ApiResponse;
use crate::routes::common::AssignmentResponse;
use crate::state::AppState;

/// GET /api/assignments
///
/// ### Responses
/// - `200 OK` with all assignments ordered by due date ascending
/// - `500 Internal Server Error` on database failure
pub async fn list_assignments(State(app_state): State<AppState>) -> Response {
    match AssignmentModel::all_by_due_date(app_state.db()).await {
        Ok(assignments) => {
            let data: Vec<AssignmentResponse> = assignments.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Assignments retrieved")),
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to list assignments");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to retrieve assignments")),
            )
                .into_response()
        }
    }
}
