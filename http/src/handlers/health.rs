use axum::Json;
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Multi-Channel Sentiment Analysis API",
        "status": "active",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "services": {
            "print_media": "ready",
            "audio": "ready",
        },
    }))
}
