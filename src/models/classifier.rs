use crate::utils::error::ClassifierError;
use crate::{Config, Result};
use ndarray::Array4;
use ort::{
    inputs,
    session::{builder::GraphOptimizationLevel, Session},
    value::Tensor,
};
use parking_lot::Mutex;
use std::path::Path;

/// 打分模型：输入归一化张量，输出一个 [0, 1] 的分数
pub trait ScoreModel: Send + Sync {
    fn score(&self, input: Array4<f32>) -> Result<f32>;
}

/// 基于 ONNX Runtime 的二分类模型
pub struct OnnxClassifier {
    // Session::run 需要独占访问，推理串行执行
    session: Mutex<Session>,
    input_name: String,  // 动态发现的输入名称
    output_name: String, // 动态发现的输出名称
}

impl OnnxClassifier {
    pub fn new(config: &Config) -> Result<Self> {
        let model_path = &config.model_path;

        if !model_path.exists() {
            return Err(ClassifierError::ModelLoad(format!(
                "Model file not found: {}",
                model_path.display()
            )));
        }

        tracing::info!("Loading classification model from: {}", model_path.display());

        let session = Session::builder()
            .map_err(|e| load_error(model_path, e))?
            .with_optimization_level(optimization_level(config.onnx_config.optimization_level))
            .map_err(|e| load_error(model_path, e))?
            .with_intra_threads(config.onnx_config.intra_threads)
            .map_err(|e| load_error(model_path, e))?
            .commit_from_file(model_path)
            .map_err(|e| load_error(model_path, e))?;

        let input_name = match session.inputs.first() {
            Some(input) => input.name.clone(),
            None => return Err(load_error(model_path, "model has no inputs")),
        };
        let output_name = match session.outputs.first() {
            Some(output) => output.name.clone(),
            None => return Err(load_error(model_path, "model has no outputs")),
        };

        tracing::info!(
            "Classification model ready: input='{}', output='{}', intra_threads={}",
            input_name,
            output_name,
            config.onnx_config.intra_threads
        );
        for (i, output) in session.outputs.iter().enumerate() {
            tracing::debug!("Classification output[{}]: '{}'", i, output.name);
        }

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }
}

impl ScoreModel for OnnxClassifier {
    fn score(&self, input: Array4<f32>) -> Result<f32> {
        let input_tensor = Tensor::from_array(input)?;

        let mut session = self.session.lock();
        let outputs = session.run(inputs![self.input_name.as_str() => input_tensor])?;

        let output = match outputs.get(self.output_name.as_str()) {
            Some(output) => output,
            None => {
                let available_outputs: Vec<String> =
                    outputs.keys().map(|s| s.to_string()).collect();
                return Err(ClassifierError::Inference(format!(
                    "Classification output '{}' not found. Available outputs: {:?}",
                    self.output_name, available_outputs
                )));
            }
        };

        let predictions = output.try_extract_array::<f32>()?;
        let score = read_scalar(predictions.iter().copied())?;
        Ok(score)
    }
}

/// 输出张量必须恰好包含一个元素
fn read_scalar(mut values: impl Iterator<Item = f32>) -> Result<f32> {
    match (values.next(), values.next()) {
        (Some(score), None) => Ok(score),
        (None, _) => Err(ClassifierError::Inference(
            "Model produced an empty output tensor".to_string(),
        )),
        (Some(_), Some(_)) => Err(ClassifierError::Inference(
            "Expected a single scalar output from the binary classifier".to_string(),
        )),
    }
}

fn load_error(path: &Path, err: impl std::fmt::Display) -> ClassifierError {
    ClassifierError::ModelLoad(format!("{}: {}", path.display(), err))
}

fn optimization_level(level: i32) -> GraphOptimizationLevel {
    match level {
        i32::MIN..=0 => GraphOptimizationLevel::Disable,
        1 => GraphOptimizationLevel::Level1,
        2 => GraphOptimizationLevel::Level2,
        _ => GraphOptimizationLevel::Level3,
    }
}
