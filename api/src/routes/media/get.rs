use axum::{
    Json,
    body::Body,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use mime_guess::from_path;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use util::paths;

use crate::response::ApiResponse;

/// GET /api/media/{*key}
///
/// Streams a recording written by local backup storage. Keys are resolved
/// below `MEDIA_STORAGE_ROOT`; keys that would leave it are rejected.
///
/// ### Responses
/// - `200 OK` with the file and a guessed `Content-Type`
/// - `400 Bad Request` for an invalid key
/// - `404 Not Found` when no such file exists
pub async fn get_media(Path(key): Path<String>) -> Response {
    let Some(path) = paths::media_path(&paths::media_storage_root(), &key) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("Invalid media key")),
        )
            .into_response();
    };

    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Media not found")),
        )
            .into_response();
    }

    let file = match File::open(&path).await {
        Ok(file) => file,
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "Failed to open media file");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mime = from_path(&path).first_or_octet_stream();
    let body = Body::from_stream(ReaderStream::new(file));

    ([(header::CONTENT_TYPE, mime.to_string())], body).into_response()
}
