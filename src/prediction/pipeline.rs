use crate::{
    image::{ImageLoader, ImagePreprocessor},
    models::ModelHost,
    prediction::{ImageUpload, Prediction},
    utils::error::ClassifierError,
    Result,
};
use std::sync::Arc;
use std::time::Instant;

/// 预测流水线：解码 -> 预处理 -> 推理 -> 阈值化
pub struct PredictionPipeline;

impl PredictionPipeline {
    /// 在阻塞线程池中处理一次上传
    pub async fn process_upload(host: Arc<ModelHost>, upload: ImageUpload) -> Result<Prediction> {
        let start_time = Instant::now();
        let bytes = upload.bytes;

        let prediction = tokio::task::spawn_blocking(move || Self::process_bytes(&host, &bytes))
            .await
            .map_err(|e| ClassifierError::Internal(format!("Prediction task failed: {}", e)))??;

        tracing::debug!(
            "Pipeline finished for '{}' in {:.3}s",
            upload.file_name,
            start_time.elapsed().as_secs_f32()
        );

        Ok(prediction)
    }

    /// 同步处理图像字节，阻塞当前线程直至推理完成
    pub fn process_bytes(host: &ModelHost, bytes: &[u8]) -> Result<Prediction> {
        let image = ImageLoader::from_bytes(bytes)?;
        let input = ImagePreprocessor::to_input_tensor(&image)?;
        let score = host.classify(input)?;

        Ok(Prediction::from_score(score))
    }
}
