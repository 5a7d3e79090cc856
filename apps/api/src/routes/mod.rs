pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::interview::handlers;
use crate::research::handlers::handle_research;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Anything unrouted is a static file; "/" serves index.html.
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        // Interview API
        .route("/interview/start", post(handlers::handle_start))
        .route("/interview/answer", post(handlers::handle_answer))
        .route("/interview/status", get(handlers::handle_status))
        // Research API
        .route("/research", post(handle_research))
        .fallback_service(static_files)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::ScriptedModel;

    fn test_config(static_dir: &str) -> Config {
        Config {
            google_api_key: "test-key".to_string(),
            gemini_model: "gemini-2.0-flash".to_string(),
            gemini_api_base: "http://localhost:0".to_string(),
            llm_timeout_secs: 5,
            port: 0,
            static_dir: static_dir.to_string(),
            rust_log: "debug".to_string(),
        }
    }

    fn app_with(model: ScriptedModel) -> (Router, AppState) {
        let state = AppState::new(Arc::new(model), test_config("."));
        (build_router(state.clone()), state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app_with(ScriptedModel::default());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_start_then_answer_over_http() {
        let (app, state) = app_with(ScriptedModel::replying(&[
            "What is a binary search?",
            "---FEEDBACK---\nToo short\n---NEXT_QUESTION---\nExplain hashing\n---SCORE_HINT---\nNeeds Improvement",
        ]));

        let response = app
            .clone()
            .oneshot(post_json("/interview/start", json!({"topic": "arrays"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["question"], "What is a binary search?");
        assert_eq!(body["question_number"], 1);
        assert_eq!(body["total_questions"], 10);
        assert_eq!(body["topic"], "arrays");

        let response = app
            .clone()
            .oneshot(post_json(
                "/interview/answer",
                json!({"answer": "", "session_id": body["session_id"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "continue");
        assert_eq!(body["next_question"], "Explain hashing");
        assert_eq!(body["score_hint"], "Needs Improvement");
        assert_eq!(state.session.lock().await.score, 3);

        let response = app
            .oneshot(Request::get("/interview/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["busy"], false);
        assert_eq!(body["active"], true);
        assert_eq!(body["answered"], 1);
        assert_eq!(body["score"], 3);
    }

    #[tokio::test]
    async fn test_status_reports_busy_while_session_is_held() {
        let (app, state) = app_with(ScriptedModel::default());
        let _held = state.session.lock().await;

        let response = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            app.oneshot(Request::get("/interview/status").body(Body::empty()).unwrap()),
        )
        .await
        .expect("status waited on the session lock")
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["busy"], true);
        assert!(body.get("active").is_none());
    }

    #[tokio::test]
    async fn test_start_without_topic_is_bad_request() {
        let (app, _) = app_with(ScriptedModel::default());
        let response = app
            .oneshot(post_json("/interview/start", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_answer_without_interview_is_bad_request() {
        let (app, _) = app_with(ScriptedModel::default());
        let response = app
            .oneshot(post_json("/interview/answer", json!({"answer": "hi"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"]["code"],
            "SESSION_NOT_ACTIVE"
        );
    }

    #[tokio::test]
    async fn test_start_ai_failure_is_server_error() {
        let (app, state) = app_with(ScriptedModel::default());
        let response = app
            .oneshot(post_json("/interview/start", json!({"topic": "arrays"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await["error"]["code"],
            "UPSTREAM_UNAVAILABLE"
        );
        assert!(!state.session.lock().await.active);
    }

    #[tokio::test]
    async fn test_research_returns_report() {
        let (app, state) = app_with(ScriptedModel::replying(&["**Caching** overview"]));
        let response = app
            .oneshot(post_json("/research", json!({"topic": "caching"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["report"], "**Caching** overview");
        assert!(!state.session.lock().await.active);
    }

    #[tokio::test]
    async fn test_research_without_topic_is_bad_request() {
        let (app, _) = app_with(ScriptedModel::default());
        let response = app
            .oneshot(post_json("/research", json!({"topic": ""})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unrouted_paths_serve_static_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Interview</h1>").unwrap();
        std::fs::write(dir.path().join("script.js"), "console.log('hi');").unwrap();

        let state = AppState::new(
            Arc::new(ScriptedModel::default()),
            test_config(dir.path().to_str().unwrap()),
        );
        let app = build_router(state);

        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>Interview</h1>");

        let response = app
            .oneshot(Request::get("/script.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
