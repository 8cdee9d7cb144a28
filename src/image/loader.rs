use crate::Result;
use image::{DynamicImage, ImageFormat};

pub struct ImageLoader;

impl ImageLoader {
    /// 从字节流加载图像，格式由内容自动识别
    pub fn from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
        let image = image::load_from_memory(bytes)?;

        tracing::debug!(
            "Decoded image: {}x{} {:?} (format={:?})",
            image.width(),
            image.height(),
            image.color(),
            Self::detect_format(bytes)
        );

        Ok(image)
    }

    /// 检测图像格式
    pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
        image::guess_format(bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ClassifierError;
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decodes_png_and_jpeg() {
        let rgb = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(20, 10, Rgb([10u8, 20, 30])));

        let png = encode(rgb.clone(), ImageFormat::Png);
        let decoded = ImageLoader::from_bytes(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 10));
        assert_eq!(ImageLoader::detect_format(&png), Some(ImageFormat::Png));

        let jpeg = encode(rgb, ImageFormat::Jpeg);
        let decoded = ImageLoader::from_bytes(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 10));
    }

    #[test]
    fn test_rejects_non_image_bytes() {
        let err = ImageLoader::from_bytes(b"this is a plain text file").unwrap_err();
        assert!(matches!(err, ClassifierError::ImageDecode(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_rejects_empty_and_truncated() {
        assert!(ImageLoader::from_bytes(&[]).is_err());

        let png = encode(
            DynamicImage::ImageRgb8(ImageBuffer::from_pixel(8, 8, Rgb([1u8, 2, 3]))),
            ImageFormat::Png,
        );
        assert!(ImageLoader::from_bytes(&png[..png.len() / 2]).is_err());
    }
}
