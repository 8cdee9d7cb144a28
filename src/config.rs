use anyhow::{Context, Result};
use std::path::PathBuf;

/// 模型文件名，默认与可执行文件放在同一目录
pub const MODEL_FILE_NAME: &str = "model.onnx";

#[derive(Debug, Clone)]
pub struct Config {
    /// 服务器绑定地址
    pub bind_addr: String,

    /// 模型文件路径
    pub model_path: PathBuf,

    /// 模型加载失败时是否继续提供服务
    pub allow_degraded: bool,

    /// ONNX Runtime配置
    pub onnx_config: OnnxConfig,

    /// 服务器配置
    pub server_config: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct OnnxConfig {
    /// CPU线程数
    pub intra_threads: usize,

    /// 优化级别 (0-3)
    pub optimization_level: i32,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 最大请求体大小（字节）
    pub max_request_size: usize,
}

impl Config {
    pub fn new(
        bind_addr: String,
        model_path: Option<PathBuf>,
        intra_threads: Option<usize>,
        allow_degraded: bool,
    ) -> Result<Self> {
        let model_path = match model_path {
            Some(path) => path,
            None => Self::default_model_path()?,
        };

        let cpu_cores = num_cpus::get();
        let onnx_config = OnnxConfig {
            intra_threads: intra_threads.unwrap_or(cpu_cores * 3 / 4).max(1), // 默认使用75%的CPU核心
            optimization_level: 3,
        };

        let server_config = ServerConfig {
            max_request_size: 50 * 1024 * 1024, // 50MB
        };

        Ok(Self {
            bind_addr,
            model_path,
            allow_degraded,
            onnx_config,
            server_config,
        })
    }

    /// 可执行文件所在目录下的模型路径
    pub fn default_model_path() -> Result<PathBuf> {
        let exe = std::env::current_exe().context("Failed to resolve executable path")?;
        let dir = exe
            .parent()
            .context("Executable path has no parent directory")?;
        Ok(dir.join(MODEL_FILE_NAME))
    }
}
