use std::sync::Arc;

use api::routes::routes;
use api::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use serde_json::Value;
use services::media::{LocalBackupStorage, MediaTransferAgent};
use tempfile::TempDir;
use util::test_helpers::setup_test_media_root;

use super::fakes::RecordingAnalysis;

pub const MEDIA_BASE_URL: &str = "http://localhost:3001/api/media";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub analysis: Arc<RecordingAnalysis>,
    /// Local backup root; also the configured media root. Dropped last.
    pub media_root: TempDir,
}

/// Router over in-memory SQLite with an accepting analysis sink and local
/// backup storage in a temporary directory.
///
/// Points the global media root at the temporary directory, so callers must
/// run `#[serial]`.
pub async fn make_test_app() -> TestApp {
    make_test_app_with(RecordingAnalysis::default()).await
}

pub async fn make_test_app_with(analysis: RecordingAnalysis) -> TestApp {
    let db = db::test_utils::setup_test_db().await;
    let media_root = setup_test_media_root();
    let analysis = Arc::new(analysis);
    let backup = Arc::new(LocalBackupStorage::new(media_root.path(), MEDIA_BASE_URL));

    let state = AppState::with_transfer(db, MediaTransferAgent::new(analysis.clone(), backup));
    let app = Router::new().nest("/api", routes(state.clone()));

    TestApp {
        app,
        state,
        analysis,
        media_root,
    }
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
