use crate::image::INPUT_SHAPE;
use crate::models::{OnnxClassifier, ScoreModel};
use crate::prediction::{LABELS, THRESHOLD};
use crate::utils::error::ClassifierError;
use crate::{Config, Result};
use ndarray::Array4;
use serde::Serialize;
use std::sync::Arc;

/// 模型宿主：启动时加载一次，之后只读
///
/// 不提供重新加载接口；通过 `Arc<ModelHost>` 注入到请求处理层。
pub struct ModelHost {
    model: std::result::Result<Arc<dyn ScoreModel>, String>,
}

impl ModelHost {
    /// 从配置加载 ONNX 模型
    pub fn load(config: &Config) -> Result<Self> {
        tracing::info!("Initializing model host...");
        let classifier = OnnxClassifier::new(config)?;
        tracing::info!("Model host initialized successfully");
        Ok(Self::from_model(Arc::new(classifier)))
    }

    pub fn from_model(model: Arc<dyn ScoreModel>) -> Self {
        Self { model: Ok(model) }
    }

    /// 降级模式：模型不可用，所有推理请求返回错误
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            model: Err(reason.into()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_ok()
    }

    /// 对单个输入张量执行一次前向推理
    pub fn classify(&self, input: Array4<f32>) -> Result<f32> {
        let model = self
            .model
            .as_ref()
            .map_err(|reason| ClassifierError::ModelUnavailable(reason.clone()))?;

        if input.shape() != INPUT_SHAPE {
            return Err(ClassifierError::Shape(format!(
                "Expected input tensor of shape {:?}, got {:?}",
                INPUT_SHAPE,
                input.shape()
            )));
        }

        model.score(input)
    }

    /// 获取模型统计信息
    pub fn stats(&self, config: &Config) -> ModelStats {
        ModelStats {
            loaded: self.is_loaded(),
            load_error: self.model.as_ref().err().cloned(),
            model_path: config.model_path.display().to_string(),
            input_shape: INPUT_SHAPE,
            labels: LABELS,
            threshold: THRESHOLD,
            intra_threads: config.onnx_config.intra_threads,
            optimization_level: config.onnx_config.optimization_level,
        }
    }
}

/// 模型统计信息
#[derive(Debug, Clone, Serialize)]
pub struct ModelStats {
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
    pub model_path: String,
    pub input_shape: [usize; 4],
    pub labels: [&'static str; 2],
    pub threshold: f32,
    pub intra_threads: usize,
    pub optimization_level: i32,
}
