use axum::{
    http::{StatusCode, Uri},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

/// GET / - 服务说明
pub async fn index() -> &'static str {
    "Hello from cn semantics!"
}

/// GET /health - 健康检查
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "build_time": env!("BUILD_TIME"),
    }))
}

/// 未匹配的路由
pub async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "path": uri.path(),
        })),
    )
}
