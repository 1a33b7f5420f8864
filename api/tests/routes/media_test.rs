#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
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
    async fn serves_stored_backup_with_content_type() {
        let test = make_test_app().await;
        let dir = test.media_root.path().join("s-1/a-1");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("1700000000000.webm"), b"frames").unwrap();

        let response = test
            .app
            .oneshot(get("/api/media/s-1/a-1/1700000000000.webm"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "video/webm");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"frames");
    }

    #[tokio::test]
    #[serial]
    async fn missing_media_is_not_found() {
        let test = make_test_app().await;

        let response = test.app.oneshot(get("/api/media/s-1/a-1/none.webm")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn traversal_is_rejected() {
        let test = make_test_app().await;

        let response = test
            .app
            .oneshot(get("/api/media/s-1/../../etc/passwd"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
