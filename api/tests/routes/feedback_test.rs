#[cfg(test)]
mod tests {
    use crate::helpers::{body_json, json_request, make_test_app};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::test_utils::{seed_assignment, seed_student};
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn callback_normalizes_flat_shape_and_lists_it() {
        let test = make_test_app().await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;
        seed_student(test.state.db(), "s-1", "Thandi").await;
        let coordinator = test.state.coordinator();
        let created = coordinator.create_provisional(&assignment.id, "s-1").await.unwrap();
        coordinator
            .attach_media(&created.id, "https://backup/x.webm")
            .await
            .unwrap();

        let response = test
            .app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/feedback-callback",
                json!({
                    "submissionId": created.id,
                    "score": 78,
                    "wordChoiceScore": 42,
                    "wordChoiceDescription": "clear",
                    "fillerWordList": "um, like",
                    "feedback": {"pace": "steady"}
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Feedback updated successfully");
        assert_eq!(json["data"]["score"], 78.0);

        let listing = test
            .app
            .oneshot(
                Request::builder()
                    .uri("/api/submissions?role=student&studentId=s-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(listing).await;
        let row = &json["data"][0];
        assert_eq!(row["mediaUrl"], "https://backup/x.webm");
        assert_eq!(row["wordChoiceFeedback"], json!({"score": 42.0, "description": "clear"}));
        assert_eq!(row["fillerWordFeedback"]["list"], json!(["um", "like"]));
        assert_eq!(row["fillerWordFeedback"]["count"], 0);
        assert!(row["bodyLanguageFeedback"].is_null());
        assert_eq!(row["rawFeedback"], json!({"pace": "steady"}));
    }

    #[tokio::test]
    #[serial]
    async fn webhook_alias_accepts_legacy_shapes() {
        let test = make_test_app().await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;
        let created = test
            .state
            .coordinator()
            .create_provisional(&assignment.id, "s-1")
            .await
            .unwrap();

        let response = test
            .app
            .oneshot(json_request(
                "POST",
                "/api/webhook/feedback",
                json!({
                    "submissionId": created.id,
                    "bodyLanguage": {"score": 65, "description": "Open posture"},
                    "wordChoiceFeedback": "not json {"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json["data"]["bodyLanguageFeedback"],
            json!({"score": 65.0, "description": "Open posture"})
        );
        assert_eq!(
            json["data"]["wordChoiceFeedback"],
            json!({"score": null, "description": "not json {"})
        );
    }

    #[tokio::test]
    #[serial]
    async fn callback_without_submission_id_is_bad_request() {
        let test = make_test_app().await;

        let response = test
            .app
            .oneshot(json_request(
                "POST",
                "/api/feedback-callback",
                json!({"wordChoiceScore": 42}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Missing submission ID");
    }

    #[tokio::test]
    #[serial]
    async fn callback_for_unknown_submission_is_not_found() {
        let test = make_test_app().await;

        let response = test
            .app
            .oneshot(json_request(
                "POST",
                "/api/feedback-callback",
                json!({"submissionId": "gone", "score": 10}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn malformed_callback_body_gets_error_envelope() {
        let test = make_test_app().await;

        let response = test
            .app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/webhook/feedback")
                    .header("content-type", "application/json")
                    .body(Body::from("{\"submissionId\": "))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().starts_with("Invalid request body"));
    }
}
