use crate::{
    prediction::{ImageUpload, PredictionPipeline, PredictionResponse},
    utils::error::ClassifierError,
    web::AppState,
    Result,
};
use axum::{extract::State, http::Method, response::Json};
use std::sync::Arc;
use std::time::Instant;

/// 图像上传预测处理器
pub async fn predict_handler(
    State(state): State<AppState>,
    upload: ImageUpload,
) -> Result<Json<PredictionResponse>> {
    let start_time = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    let file_name = upload.file_name.clone();

    tracing::info!(
        "Processing prediction request: request_id={}, file={}, bytes={}",
        request_id,
        file_name,
        upload.bytes.len()
    );

    let prediction = PredictionPipeline::process_upload(Arc::clone(&state.host), upload).await?;

    tracing::info!(
        "Prediction completed: request_id={}, score={:.4}, label={}, time={:.3}s",
        request_id,
        prediction.score,
        prediction.label,
        start_time.elapsed().as_secs_f32()
    );

    Ok(Json(prediction.into()))
}

/// GET /predict 固定返回 405
pub async fn predict_get_handler() -> ClassifierError {
    ClassifierError::MethodNotAllowed
}

/// /predict 上其它未注册的方法
pub async fn predict_fallback_handler(method: Method) -> ClassifierError {
    ClassifierError::UnsupportedMethod(method.to_string())
}
