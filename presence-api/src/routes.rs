//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Presence
        .route("/api/register-job", post(handlers::register_job))
        .route("/api/update-receiver", post(handlers::update_receiver))
        .route("/api/check-receivers", get(handlers::check_receivers))
        .route("/api/job/:jobId", delete(handlers::remove_job))

        // Stats
        .route("/api/stats", get(handlers::get_stats))

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use crate::state::ApiConfig;

    fn test_app() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(ApiConfig::default()));
        (create_router(state.clone()), state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn delete(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn register(app: &Router, receiver: &str, job_id: &str, server_id: &str) -> StatusCode {
        let body = json!({"receiver": receiver, "jobId": job_id, "serverId": server_id});
        send(app, post_json("/api/register-job", body)).await.0
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _) = test_app();

        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_register_job() {
        let (app, state) = test_app();

        let (status, body) = send(
            &app,
            post_json(
                "/api/register-job",
                json!({"receiver": "alice", "jobId": "job1", "serverId": "srv1"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(state.registry.len(), 1);
    }

    #[tokio::test]
    async fn test_register_job_missing_field() {
        let (app, state) = test_app();

        let (status, body) = send(
            &app,
            post_json("/api/register-job", json!({"receiver": "alice", "jobId": "job1"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(state.registry.is_empty());
    }

    #[tokio::test]
    async fn test_update_receiver() {
        let (app, _) = test_app();
        register(&app, "alice", "job1", "srv1").await;

        let (status, body) = send(
            &app,
            post_json("/api/update-receiver", json!({"receiver": "alice", "serverId": "srv1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = send(
            &app,
            post_json("/api/update-receiver", json!({"receiver": "carol"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_update_receiver_without_receiver_is_not_found() {
        let (app, _) = test_app();
        register(&app, "alice", "job1", "srv1").await;

        let (status, body) = send(&app, post_json("/api/update-receiver", json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_check_receivers() {
        let (app, _) = test_app();
        assert_eq!(register(&app, "alice", "job1", "srv1").await, StatusCode::CREATED);
        assert_eq!(register(&app, "bob", "job2", "srv2").await, StatusCode::CREATED);

        let (status, body) = send(&app, get("/api/check-receivers?usernames=alice,carol")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["availableReceivers"],
            json!([{"username": "alice", "serverId": "srv1"}])
        );

        let (status, body) = send(&app, get("/api/check-receivers")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["availableReceivers"], json!([]));
    }

    #[tokio::test]
    async fn test_remove_job() {
        let (app, state) = test_app();
        register(&app, "alice", "job1", "srv1").await;

        let (status, _) = send(&app, delete("/api/job/job1")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(state.registry.is_empty());

        let (status, body) = send(&app, delete("/api/job/job1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_stats() {
        let (app, _) = test_app();
        register(&app, "alice", "job1", "srv1").await;
        register(&app, "alice", "job1", "srv1").await;
        register(&app, "bob", "job2", "srv2").await;

        let (status, body) = send(&app, get("/api/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["activeJobs"], 2);
        assert_eq!(body["stats"]["activeReceivers"], 2);

        let server_time = body["stats"]["serverTime"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(server_time).is_ok());
        assert!(server_time.ends_with('Z'));
    }
}
