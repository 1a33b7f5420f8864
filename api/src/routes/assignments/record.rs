use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use services::media::MediaBlob;

use crate::response::ApiResponse;
use crate::routes::assignments::common::RecordResponse;
use crate::routes::common::{bad_request, error_response};
use crate::state::AppState;

/// POST /api/assignments/{assignment_id}/record
///
/// Accepts a finished recording, creates the submission, sends the video to
/// the analysis service and stores a backup copy. Feedback arrives later via
/// the callback route.
///
/// ### Request Body (Multipart Form Data)
/// - `video` (file, required): the recording
/// - `studentId` (string, required)
/// - `videoFormat` (string, optional): extension such as `webm` or `mp4`;
///   defaults to the uploaded file's extension, else `webm`
///
/// ### Responses
/// - `201 Created` with the submission and `backedUp`
/// - `400 Bad Request` for a missing field or an empty video
/// - `404 Not Found` when the assignment does not exist
/// - `502 Bad Gateway` when the analysis service rejects the upload; the
///   submission row is kept without media
pub async fn record_submission(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let mut student_id: Option<String> = None;
    let mut video_format: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut video: Option<Bytes> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return bad_request(format!("Invalid multipart body: {err}")),
        };

        let name = field.name().unwrap_or("").to_owned();
        match name.as_str() {
            "studentId" => student_id = field.text().await.ok(),
            "videoFormat" => video_format = field.text().await.ok(),
            "video" => {
                if video.is_some() {
                    return bad_request("Only one video may be uploaded per request");
                }
                file_name = field.file_name().map(str::to_owned);
                match field.bytes().await {
                    Ok(bytes) => video = Some(bytes),
                    Err(err) => return bad_request(format!("Failed to read video: {err}")),
                }
            }
            _ => continue,
        }
    }

    let Some(student_id) = student_id.filter(|s| !s.trim().is_empty()) else {
        return bad_request("Missing student ID");
    };
    let Some(video) = video else {
        return bad_request("Missing video upload");
    };

    let format = video_format
        .filter(|f| !f.trim().is_empty())
        .or_else(|| {
            file_name
                .as_deref()
                .and_then(|name| name.rsplit_once('.'))
                .map(|(_, ext)| ext.to_owned())
        })
        .unwrap_or_else(|| "webm".to_owned());

    match app_state
        .coordinator()
        .record(&assignment_id, &student_id, MediaBlob::new(video, format))
        .await
    {
        Ok(outcome) => {
            let message = if outcome.backed_up {
                "Recording submitted"
            } else {
                "Recording submitted without backup copy"
            };
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    RecordResponse {
                        submission: outcome.submission.into(),
                        backed_up: outcome.backed_up,
                    },
                    message,
                )),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}
