//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness check
//! - `/submissions` → provisional creation, media attachment, listing
//! - `/feedback-callback` and `/webhook/feedback` → analysis service callback
//! - `/assignments` → assignment listing/creation, direct submit, server-side recording
//! - `/media` → locally stored backup copies

use axum::Router;

use crate::routes::{
    assignments::assignment_routes, feedback::feedback_routes, health::health_routes,
    media::media_routes, submissions::submission_routes,
};
use crate::state::AppState;

pub mod assignments;
pub mod common;
pub mod feedback;
pub mod health;
pub mod media;
pub mod submissions;

/// Builds the complete `/api` router with `app_state` applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/submissions", submission_routes())
        .nest("/assignments", assignment_routes())
        .nest("/media", media_routes())
        .merge(feedback_routes())
        .with_state(app_state)
}
