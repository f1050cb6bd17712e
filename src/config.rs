use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini API 密钥（为空表示未配置，运行时会交互式询问）
    pub gemini_api_key: String,
    /// Gemini API 基础URL
    pub api_base_url: String,
    /// 默认模型（工作流 / 研究 / 测验批改）
    pub model_name: String,
    /// 轻量模型（辩论对手，回复短、调用频繁）
    pub lite_model_name: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 闪卡 CSV 导出目录
    pub flashcard_export_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            api_base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model_name: "gemini-2.0-flash".to_string(),
            lite_model_name: "gemini-2.0-flash-lite".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            flashcard_export_dir: "exports".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or(default.gemini_api_key),
            api_base_url: std::env::var("GEMINI_API_BASE_URL").unwrap_or(default.api_base_url),
            model_name: std::env::var("MODEL_NAME").unwrap_or(default.model_name),
            lite_model_name: std::env::var("LITE_MODEL_NAME").unwrap_or(default.lite_model_name),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            flashcard_export_dir: std::env::var("FLASHCARD_EXPORT_DIR").unwrap_or(default.flashcard_export_dir),
        }
    }

    /// 从 TOML 配置文件加载
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置：优先 config.toml，其次环境变量
    ///
    /// 环境变量中的 API 密钥始终优先，方便在不改配置文件的情况下切换密钥。
    pub fn load() -> Self {
        let mut config = if Path::new("config.toml").exists() {
            Config::from_file("config.toml").unwrap_or_else(|e| {
                tracing::warn!("⚠️ config.toml 加载失败，回退到环境变量: {}", e);
                Config::from_env()
            })
        } else {
            Config::from_env()
        };

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                config.gemini_api_key = key;
            }
        }

        config
    }
}
