#[cfg(test)]
mod tests {
    use crate::helpers::{RecordingAnalysis, body_json, json_request, make_test_app, make_test_app_with};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::repositories::SubmissionFilter;
    use db::test_utils::seed_assignment;
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    const BOUNDARY: &str = "speakeasy-test-boundary";

    fn multipart_body(student_id: Option<&str>, video: Option<&[u8]>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(student_id) = student_id {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"studentId\"\r\n\r\n{student_id}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(video) = video {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"video\"; filename=\"take1.mp4\"\r\nContent-Type: video/mp4\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(video);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn record_request(assignment_id: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/api/assignments/{assignment_id}/record"))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn assignments_are_listed_soonest_first() {
        let test = make_test_app().await;

        for (title, due) in [("Debate", "2031-05-01T09:00:00Z"), ("Intro", "2031-01-01T09:00:00Z")] {
            let response = test
                .app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/assignments",
                    json!({"title": title, "description": "Speak clearly", "dueDate": due}),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = test
            .app
            .oneshot(
                Request::builder()
                    .uri("/api/assignments")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let titles: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Intro", "Debate"]);
    }

    #[tokio::test]
    #[serial]
    async fn create_assignment_requires_every_field() {
        let test = make_test_app().await;

        let response = test
            .app
            .oneshot(json_request(
                "POST",
                "/api/assignments",
                json!({"title": "Intro", "description": ""}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = body_json(response).await["message"].as_str().unwrap().to_owned();
        assert!(message.contains("Description is required"));
        assert!(message.contains("Due date is required"));
    }

    #[tokio::test]
    #[serial]
    async fn submit_with_null_student_is_bad_request() {
        let test = make_test_app().await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;

        let response = test
            .app
            .oneshot(json_request(
                "POST",
                &format!("/api/assignments/{}/submit", assignment.id),
                json!({"studentId": null}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Missing student ID");
    }

    #[tokio::test]
    #[serial]
    async fn submit_with_video_url_attaches_media() {
        let test = make_test_app().await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;

        let response = test
            .app
            .oneshot(json_request(
                "POST",
                &format!("/api/assignments/{}/submit", assignment.id),
                json!({"studentId": "s-1", "videoUrl": "https://storage.example/v.webm"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["data"]["mediaUrl"], "https://storage.example/v.webm");
    }

    #[tokio::test]
    #[serial]
    async fn record_dispatches_and_backs_up() {
        let test = make_test_app().await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;

        let response = test
            .app
            .oneshot(record_request(
                &assignment.id,
                multipart_body(Some("s-1"), Some(b"not really a video")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["data"]["backedUp"], true);
        let media_url = json["data"]["mediaUrl"].as_str().unwrap();
        assert!(media_url.starts_with(&format!(
            "http://localhost:3001/api/media/s-1/{}/",
            assignment.id
        )));
        assert!(media_url.ends_with(".mp4"));

        let sent = test.analysis.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0.assignment_title, "Elevator pitch");
        assert_eq!(sent[0].0.submission_id, json["data"]["id"]);
        assert_eq!(sent[0].1, b"not really a video".len());

        let key = media_url.trim_start_matches("http://localhost:3001/api/media/");
        let stored = std::fs::read(test.media_root.path().join(key)).unwrap();
        assert_eq!(stored, b"not really a video");
    }

    #[tokio::test]
    #[serial]
    async fn record_analysis_failure_is_bad_gateway_and_keeps_row() {
        let test = make_test_app_with(RecordingAnalysis::rejecting(503)).await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;

        let response = test
            .app
            .oneshot(record_request(
                &assignment.id,
                multipart_body(Some("s-1"), Some(b"frames")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(
            body_json(response).await["message"]
                .as_str()
                .unwrap()
                .contains("503")
        );

        let rows = test
            .state
            .coordinator()
            .list(SubmissionFilter::All)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].submission.media_url, None);
    }

    #[tokio::test]
    #[serial]
    async fn record_rejects_empty_video_and_missing_student() {
        let test = make_test_app().await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;

        let empty = test
            .app
            .clone()
            .oneshot(record_request(&assignment.id, multipart_body(Some("s-1"), Some(b""))))
            .await
            .unwrap();
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

        let anonymous = test
            .app
            .oneshot(record_request(&assignment.id, multipart_body(None, Some(b"frames"))))
            .await
            .unwrap();
        assert_eq!(anonymous.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(anonymous).await["message"], "Missing student ID");
        assert!(test.analysis.sent().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn record_for_unknown_assignment_is_not_found() {
        let test = make_test_app().await;

        let response = test
            .app
            .oneshot(record_request("missing", multipart_body(Some("s-1"), Some(b"frames"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(test.analysis.sent().is_empty());
    }
}
