pub mod search;
pub mod server;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::error::SearchError;
use crate::state::AppState;

/// Map a pipeline error to the HTTP reply; store and internal detail only goes to the log
pub fn error_response(err: SearchError) -> (StatusCode, Json<Value>) {
    match err {
        SearchError::Validation(message) => (StatusCode::BAD_REQUEST, Json(json!({"error": message}))),
        SearchError::Store(e) => {
            tracing::error!("Database error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "Database query failed"})))
        }
        SearchError::Unexpected(detail) => {
            tracing::error!("Unexpected error: {}", detail);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "Internal server error"})))
        }
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Unhandled error: {}", detail);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "Internal server error"}))).into_response()
}

/// Build the HTTP router / 构建路由
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(server::index))
        .route("/health", get(server::health_check))
        .route("/search_by_word", get(search::search_by_word))
        .route("/search_by_level", get(search::search_by_level))
        .fallback(server::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::models::Record;
    use crate::search::SearchOptions;
    use crate::source::{ColumnFilter, MemorySource, PagedSource};
    use async_trait::async_trait;
    use axum::http::Request;
    use tower::ServiceExt;

    struct DownSource;

    #[async_trait]
    impl PagedSource for DownSource {
        fn name(&self) -> &str {
            "down"
        }

        async fn fetch_batch(&self, _: &ColumnFilter, _: Option<i64>, _: usize) -> Result<Vec<Record>, StoreError> {
            Err(StoreError::Query("no such table: vocabulary_difficulty_levels".to_string()))
        }
    }

    fn app_with(source: Arc<dyn PagedSource>) -> Router {
        router(Arc::new(AppState::new(source, SearchOptions::default())))
    }

    fn app() -> Router {
        let rows = vec![
            Record::new(1, "打").difficulty(1),
            Record::new(2, "打1").difficulty(3),
            Record::new(3, "打23"),
            Record::new(4, "打手"),
            Record::new(5, "打招呼"),
            Record::new(10, "高兴").levels(["人", "心理", "情感", "喜悦"]),
            Record::new(11, "情绪").levels(["人", "心理", "情感", "情感"]),
            Record::new(12, "感情").levels(["人", "心理", "交往", "情感"]),
        ];
        app_with(Arc::new(MemorySource::new(rows)))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn ids(body: &Value) -> Vec<i64> {
        body["data"].as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    #[tokio::test]
    async fn test_search_by_word_envelope() {
        let uri = format!("/search_by_word?word={}&limit=2", urlencoding::encode("打"));
        let (status, body) = get_json(app(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![1, 2]);
        assert_eq!(body["pagination"], json!({"limit": 2, "cursor": null, "nextCursor": 2, "hasMore": true}));
        assert_eq!(body["data"][0]["difficulty_level"], json!(1));
        assert_eq!(body["data"][0]["level_1"], json!(""));

        let uri = format!("/search_by_word?word={}&limit=2&cursor=2", urlencoding::encode("打"));
        let (_, body) = get_json(app(), &uri).await;
        assert_eq!(ids(&body), vec![3]);
        assert_eq!(body["pagination"], json!({"limit": 2, "cursor": 2, "nextCursor": null, "hasMore": false}));
        assert_eq!(body["data"][0]["difficulty_level"], Value::Null);
    }

    #[tokio::test]
    async fn test_search_by_word_default_limit() {
        let uri = format!("/search_by_word?word={}", urlencoding::encode("打"));
        let (status, body) = get_json(app(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![1, 2, 3]);
        assert_eq!(body["pagination"]["limit"], json!(100));
    }

    #[tokio::test]
    async fn test_search_by_level_dedupes() {
        let uri = format!("/search_by_level?level={}&limit=10", urlencoding::encode("情感"));
        let (status, body) = get_json(app(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![10, 11, 12]);
        assert_eq!(body["pagination"]["hasMore"], json!(false));
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let (status, body) = get_json(app(), "/search_by_word?limit=10").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "word parameter is required"}));

        let (status, body) = get_json(app(), "/search_by_level?level=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "level parameter is required"}));

        for limit in ["0", "1001", "abc"] {
            let (status, body) = get_json(app(), &format!("/search_by_word?word=x&limit={}", limit)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({"error": "limit must be a positive number between 1 and 1000"}));
        }

        let (status, body) = get_json(app(), "/search_by_level?level=x&cursor=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "cursor must be an integer"}));

        let (status, _) = get_json(app(), "/search_by_word?word=x&limit=1000").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_repeated_params_take_first_value() {
        let uri = format!(
            "/search_by_word?word={}&word=b&limit=1&limit=2",
            urlencoding::encode("打")
        );
        let (status, body) = get_json(app(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![1]);
        assert_eq!(body["pagination"]["limit"], json!(1));

        let uri = format!("/search_by_level?level={}&limit=1&limit=2", urlencoding::encode("情感"));
        let (status, body) = get_json(app(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![10]);
        assert_eq!(body["pagination"]["hasMore"], json!(true));

        // an invalid first value is still a JSON 400
        let (status, body) = get_json(app(), "/search_by_level?level=x&limit=0&limit=2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "limit must be a positive number between 1 and 1000"}));
    }

    #[tokio::test]
    async fn test_validation_happens_before_store() {
        let (status, _) = get_json(app_with(Arc::new(DownSource)), "/search_by_word?word=x&limit=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_store_failure_hides_detail() {
        let (status, body) = get_json(app_with(Arc::new(DownSource)), "/search_by_word?word=x").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Database query failed"}));

        let (status, body) = get_json(app_with(Arc::new(DownSource)), "/search_by_level?level=x").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Database query failed"}));
    }

    #[tokio::test]
    async fn test_health_and_not_found() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("healthy"));
        assert!(body["timestamp"].is_string());

        let (status, body) = get_json(app(), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found", "path": "/nope"}));
    }

    #[tokio::test]
    async fn test_index_text() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Hello from cn semantics!");
    }
}
