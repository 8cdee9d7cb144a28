use axum::body::Bytes;
use serde::Serialize;

/// 判定阈值：分数严格大于该值判为阳性
pub const THRESHOLD: f32 = 0.5;

/// 标签表，按阈值化后的整数索引
pub const LABELS: [&str; 2] = ["normal", "pancreatic_tumor"];

/// 二分类标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Normal,
    PancreaticTumor,
}

impl Label {
    /// 阈值化：score > 0.5 -> 1，否则 0（NaN 判为 0）
    pub fn from_score(score: f32) -> Self {
        if score > THRESHOLD {
            Label::PancreaticTumor
        } else {
            Label::Normal
        }
    }

    pub fn index(self) -> usize {
        match self {
            Label::Normal => 0,
            Label::PancreaticTumor => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        LABELS[self.index()]
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单次预测结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// 模型原始输出
    pub score: f32,
    pub label: Label,
}

impl Prediction {
    pub fn from_score(score: f32) -> Self {
        Self {
            score,
            label: Label::from_score(score),
        }
    }
}

/// 已通过校验的上传文件
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// 预测接口响应
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub predicted_class: Label,
}

impl From<Prediction> for PredictionResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            predicted_class: prediction.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(Label::from_score(0.0), Label::Normal);
        assert_eq!(Label::from_score(0.5), Label::Normal);
        assert_eq!(Label::from_score(0.500_001), Label::PancreaticTumor);
        assert_eq!(Label::from_score(1.0), Label::PancreaticTumor);
        assert_eq!(Label::from_score(f32::NAN), Label::Normal);
    }

    #[test]
    fn test_label_strings_match_vocabulary() {
        assert_eq!(Label::Normal.as_str(), "normal");
        assert_eq!(Label::PancreaticTumor.as_str(), "pancreatic_tumor");
        for label in [Label::Normal, Label::PancreaticTumor] {
            let json = serde_json::to_value(label).unwrap();
            assert_eq!(json, label.as_str());
            assert_eq!(LABELS[label.index()], label.to_string());
        }
    }

    #[test]
    fn test_response_shape() {
        let response = PredictionResponse::from(Prediction::from_score(0.97));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "predicted_class": "pancreatic_tumor" })
        );
    }
}
