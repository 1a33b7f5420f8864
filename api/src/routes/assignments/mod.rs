use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use util::config;

use crate::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod record;

use get::list_assignments;
use post::{create_assignment, submit_assignment};
use record::record_submission;

/// Builds the `/assignments` route group.
///
/// - `GET /` → all assignments, soonest due first
/// - `POST /` → create an assignment
/// - `POST /{assignment_id}/submit` → submit with an already uploaded video URL
/// - `POST /{assignment_id}/record` → upload a recording for analysis and backup
pub fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assignments).post(create_assignment))
        .route("/{assignment_id}/submit", post(submit_assignment))
        .route(
            "/{assignment_id}/record",
            post(record_submission).layer(DefaultBodyLimit::max(config::max_upload_bytes())),
        )
}
