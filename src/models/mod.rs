pub mod classifier;
pub mod host;

pub use classifier::{OnnxClassifier, ScoreModel};
pub use host::{ModelHost, ModelStats};
