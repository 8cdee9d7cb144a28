pub mod pipeline;
pub mod types;

pub use pipeline::PredictionPipeline;
pub use types::{ImageUpload, Label, Prediction, PredictionResponse, LABELS, THRESHOLD};
