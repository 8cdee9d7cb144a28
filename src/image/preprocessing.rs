use crate::Result;
use image::{imageops::FilterType, DynamicImage};
use ndarray::Array4;

/// 模型输入尺寸 (H, W, C)
pub const INPUT_HEIGHT: usize = 150;
pub const INPUT_WIDTH: usize = 150;
pub const INPUT_CHANNELS: usize = 3;

/// 完整的输入张量形状 [N, H, W, C]
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_HEIGHT, INPUT_WIDTH, INPUT_CHANNELS];

/// 缩放滤波器（双三次）
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

pub struct ImagePreprocessor;

impl ImagePreprocessor {
    /// 分类模型预处理流水线：
    /// 1. 转换为RGB三通道（去除alpha / 灰度扩展）
    /// 2. 缩放到 150x150
    /// 3. 像素值除以255归一化到 [0, 1]
    /// 4. 增加batch维度 -> [1, 150, 150, 3]
    pub fn to_input_tensor(image: &DynamicImage) -> Result<Array4<f32>> {
        let rgb_image = image.to_rgb8();
        let resized = image::imageops::resize(
            &rgb_image,
            INPUT_WIDTH as u32,
            INPUT_HEIGHT as u32,
            RESIZE_FILTER,
        );

        // RGB8 原始数据即为 HWC 行优先顺序
        let data: Vec<f32> = resized
            .into_raw()
            .into_iter()
            .map(|value| value as f32 / 255.0)
            .collect();

        let tensor = Array4::from_shape_vec(INPUT_SHAPE, data)?;
        Ok(tensor)
    }
}
