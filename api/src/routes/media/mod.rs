use axum::{Router, routing::get};

use crate::state::AppState;

pub mod get;

use get::get_media;

/// Builds the `/media` route group serving locally stored backup copies.
pub fn media_routes() -> Router<AppState> {
    Router::new().route("/{*key}", get(get_media))
}
