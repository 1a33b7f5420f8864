use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

pub mod common;
pub mod get;
pub mod patch;
pub mod post;

use get::list_submissions;
use patch::attach_media;
use post::create_submission;

/// Builds the `/submissions` route group.
///
/// - `POST /` → create a provisional submission
/// - `GET /` → list submissions for a student or teacher
/// - `PATCH /{submission_id}` → attach the backup media URL
pub fn submission_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_submissions).post(create_submission))
        .route("/{submission_id}", patch(attach_media))
}
