use axum::{Router, routing::post};

use crate::state::AppState;

pub mod post;

use post::receive_feedback;

/// Analysis callback routes. Both paths are in use by deployed analysis
/// services and behave identically.
pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/feedback-callback", post(receive_feedback))
        .route("/webhook/feedback", post(receive_feedback))
}
