use crate::prediction::ImageUpload;
use crate::utils::error::ClassifierError;
use crate::web::AppState;
use axum::{
    async_trait,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::StatusCode,
};

/// 上传文件字段名
pub const FILE_FIELD: &str = "file";

/// 从 multipart 表单中提取 `file` 文件字段
///
/// 只有同时带有 `name="file"` 和 `filename` 参数的部分才算文件字段，取第一个。
/// 非 multipart 请求或无法解析的表单视为没有文件字段；超过大小限制返回 413。
#[async_trait]
impl FromRequest<AppState> for ImageUpload {
    type Rejection = ClassifierError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let max_size = state.config.server_config.max_request_size;

        let mut multipart = Multipart::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Request is not a multipart upload: {}", e);
            ClassifierError::NoFilePart
        })?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| stream_error(e, max_size))?
        {
            if field.name() != Some(FILE_FIELD) {
                tracing::debug!("Ignoring field: {:?}", field.name());
                continue;
            }

            // 没有 filename 参数的同名字段属于普通表单字段
            let Some(file_name) = field.file_name().map(str::to_owned) else {
                continue;
            };

            if file_name.is_empty() {
                return Err(ClassifierError::EmptyFilename);
            }

            let bytes = field.bytes().await.map_err(|e| stream_error(e, max_size))?;

            tracing::debug!("Received file '{}': {} bytes", file_name, bytes.len());
            return Ok(ImageUpload { file_name, bytes });
        }

        Err(ClassifierError::NoFilePart)
    }
}

/// 表单流读取失败：超限返回 413，其余按没有文件字段处理
fn stream_error(err: MultipartError, max_size: usize) -> ClassifierError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ClassifierError::FileTooLarge(max_size);
    }

    tracing::debug!("Failed to parse multipart body: {}", err);
    ClassifierError::NoFilePart
}
