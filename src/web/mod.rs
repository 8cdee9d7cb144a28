pub mod extractors;
pub mod handlers;
pub mod middleware;

use crate::{models::ModelHost, utils::error::ClassifierError, Config, Result};
use axum::{
    extract::{DefaultBodyLimit, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

/// 处理器共享状态
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub host: Arc<ModelHost>,
}

impl AppState {
    pub fn new(config: Config, host: ModelHost) -> Self {
        Self {
            config: Arc::new(config),
            host: Arc::new(host),
        }
    }
}

pub async fn serve(config: Config) -> Result<()> {
    // 启动时加载模型，默认加载失败即退出
    let host = match ModelHost::load(&config) {
        Ok(host) => host,
        Err(e) if config.allow_degraded => {
            tracing::warn!("Serving in degraded mode, predictions will fail: {}", e);
            ModelHost::unavailable(e.to_string())
        }
        Err(e) => {
            tracing::error!("Error loading the model: {}", e);
            return Err(e);
        }
    };

    let addr: SocketAddr = config.bind_addr.parse().map_err(|e| {
        ClassifierError::Config(format!("Invalid bind address {}: {}", config.bind_addr, e))
    })?;

    let app = create_app(AppState::new(config, host));

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  POST /predict   - Multipart image upload (field: file)");
    tracing::info!("  GET  /health    - Health check");
    tracing::info!("  GET  /api/info  - Service information");

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        ClassifierError::Internal(format!("Failed to bind to address {}: {}", addr, e))
    })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ClassifierError::Internal(format!("Server failed to start: {}", e)))?;

    Ok(())
}

pub fn create_app(state: AppState) -> Router {
    let max_request_size = state.config.server_config.max_request_size;

    Router::new()
        .route(
            "/predict",
            axum::routing::post(handlers::predict_handler)
                .get(handlers::predict_get_handler)
                .fallback(handlers::predict_fallback_handler),
        )
        .route("/health", get(health_handler))
        .route("/api/info", get(info_handler))
        // 超限在读取表单时由上传提取器转换为 413 JSON 响应
        .layer(DefaultBodyLimit::max(max_request_size))
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 健康检查端点，与模型加载状态无关
async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": "API is up and running!" }))
}

/// 服务信息端点
async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "service": "Pancreatic Classifier Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "model": state.host.stats(&state.config),
    }))
}
