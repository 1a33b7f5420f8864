pub mod app;
pub mod fakes;

pub use app::{TestApp, body_json, json_request, make_test_app, make_test_app_with};
pub use fakes::RecordingAnalysis;
