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

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn create_submission_returns_provisional_row() {
        let test = make_test_app().await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;

        let response = test
            .app
            .oneshot(json_request(
                "POST",
                "/api/submissions",
                json!({"assignmentId": assignment.id, "studentId": "s-1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["assignmentId"], assignment.id);
        assert_eq!(json["data"]["studentId"], "s-1");
        assert!(json["data"]["mediaUrl"].is_null());
        assert!(json["data"]["submittedAt"].is_string());
        assert!(json["data"]["id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    #[serial]
    async fn create_submission_missing_student_is_bad_request() {
        let test = make_test_app().await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;

        let response = test
            .app
            .oneshot(json_request(
                "POST",
                "/api/submissions",
                json!({"assignmentId": assignment.id}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Missing student ID");
    }

    #[tokio::test]
    #[serial]
    async fn create_submission_null_or_mistyped_student_is_bad_request() {
        let test = make_test_app().await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;

        let null_student = test
            .app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/submissions",
                json!({"assignmentId": assignment.id, "studentId": null}),
            ))
            .await
            .unwrap();
        assert_eq!(null_student.status(), StatusCode::BAD_REQUEST);
        let json = body_json(null_student).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Missing student ID");

        let numeric_student = test
            .app
            .oneshot(json_request(
                "POST",
                "/api/submissions",
                json!({"assignmentId": assignment.id, "studentId": 42}),
            ))
            .await
            .unwrap();
        assert_eq!(numeric_student.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(numeric_student).await["success"], false);
    }

    #[tokio::test]
    #[serial]
    async fn create_submission_unknown_assignment_is_not_found() {
        let test = make_test_app().await;

        let response = test
            .app
            .oneshot(json_request(
                "POST",
                "/api/submissions",
                json!({"assignmentId": "nope", "studentId": "s-1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn patch_attaches_media_and_is_idempotent() {
        let test = make_test_app().await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;
        let created = test
            .state
            .coordinator()
            .create_provisional(&assignment.id, "s-1")
            .await
            .unwrap();
        let uri = format!("/api/submissions/{}", created.id);
        let body = json!({"mediaUrl": "https://backup/x.webm"});

        let first = test
            .app
            .clone()
            .oneshot(json_request("PATCH", &uri, body.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let first = body_json(first).await;
        assert_eq!(first["data"]["mediaUrl"], "https://backup/x.webm");

        let second = test
            .app
            .oneshot(json_request("PATCH", &uri, body))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(body_json(second).await["data"], first["data"]);
    }

    #[tokio::test]
    #[serial]
    async fn patch_rejects_missing_or_relative_url() {
        let test = make_test_app().await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;
        let created = test
            .state
            .coordinator()
            .create_provisional(&assignment.id, "s-1")
            .await
            .unwrap();
        let uri = format!("/api/submissions/{}", created.id);

        let missing = test
            .app
            .clone()
            .oneshot(json_request("PATCH", &uri, json!({})))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(missing).await["message"], "Missing media URL");

        let null_url = test
            .app
            .clone()
            .oneshot(json_request("PATCH", &uri, json!({"mediaUrl": null})))
            .await
            .unwrap();
        assert_eq!(null_url.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(null_url).await["message"], "Missing media URL");

        let relative = test
            .app
            .oneshot(json_request("PATCH", &uri, json!({"mediaUrl": "x.webm"})))
            .await
            .unwrap();
        assert_eq!(relative.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn patch_with_different_url_keeps_attached_media() {
        let test = make_test_app().await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;
        let created = test
            .state
            .coordinator()
            .create_provisional(&assignment.id, "s-1")
            .await
            .unwrap();
        let uri = format!("/api/submissions/{}", created.id);

        let first = test
            .app
            .clone()
            .oneshot(json_request("PATCH", &uri, json!({"mediaUrl": "https://backup/first.webm"})))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = test
            .app
            .clone()
            .oneshot(json_request("PATCH", &uri, json!({"mediaUrl": "https://backup/second.webm"})))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(second).await["message"],
            "Submission already has media attached"
        );

        let listing = test
            .app
            .oneshot(get("/api/submissions?role=student&studentId=s-1"))
            .await
            .unwrap();
        let json = body_json(listing).await;
        assert_eq!(json["data"][0]["mediaUrl"], "https://backup/first.webm");
    }

    #[tokio::test]
    #[serial]
    async fn patch_unknown_submission_is_not_found() {
        let test = make_test_app().await;

        let response = test
            .app
            .oneshot(json_request(
                "PATCH",
                "/api/submissions/does-not-exist",
                json!({"mediaUrl": "https://backup/x.webm"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Submission not found");
    }

    #[tokio::test]
    #[serial]
    async fn student_listing_joins_assignment_and_name() {
        let test = make_test_app().await;
        let assignment = seed_assignment(test.state.db(), "Elevator pitch").await;
        seed_student(test.state.db(), "s-1", "Thandi").await;
        let coordinator = test.state.coordinator();
        coordinator.create_provisional(&assignment.id, "s-1").await.unwrap();
        coordinator.create_provisional(&assignment.id, "s-2").await.unwrap();

        let response = test
            .app
            .oneshot(get("/api/submissions?role=student&userId=s-1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let rows = json["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["studentId"], "s-1");
        assert_eq!(rows[0]["studentName"], "Thandi");
        assert_eq!(rows[0]["assignment"]["title"], "Elevator pitch");
    }

    #[tokio::test]
    #[serial]
    async fn teacher_listing_can_scope_by_assignment() {
        let test = make_test_app().await;
        let pitch = seed_assignment(test.state.db(), "Elevator pitch").await;
        let debate = seed_assignment(test.state.db(), "Debate").await;
        let coordinator = test.state.coordinator();
        coordinator.create_provisional(&pitch.id, "s-1").await.unwrap();
        coordinator.create_provisional(&debate.id, "s-2").await.unwrap();

        let all = test
            .app
            .clone()
            .oneshot(get("/api/submissions?role=teacher"))
            .await
            .unwrap();
        assert_eq!(body_json(all).await["data"].as_array().unwrap().len(), 2);

        let scoped = test
            .app
            .oneshot(get(&format!(
                "/api/submissions?role=teacher&assignmentId={}",
                debate.id
            )))
            .await
            .unwrap();
        let json = body_json(scoped).await;
        let rows = json["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["assignmentId"], debate.id);
    }

    #[tokio::test]
    #[serial]
    async fn listing_requires_a_known_role() {
        let test = make_test_app().await;

        let missing = test
            .app
            .clone()
            .oneshot(get("/api/submissions?studentId=s-1"))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let unknown = test
            .app
            .clone()
            .oneshot(get("/api/submissions?role=admin&studentId=s-1"))
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

        let student_without_id = test
            .app
            .oneshot(get("/api/submissions?role=student"))
            .await
            .unwrap();
        assert_eq!(student_without_id.status(), StatusCode::BAD_REQUEST);
    }
}
