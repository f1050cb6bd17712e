//! 闪卡导出服务 - 业务能力层
//!
//! 只负责"把内存中的闪卡文本写成 CSV 文件"能力，不关心流程。
//! 系统自身不落盘任何状态，导出是用户显式请求的一次性动作。

use crate::error::{AppError, AppResult, SessionError};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// 闪卡导出服务
pub struct FlashcardExporter {
    export_dir: String,
}

impl FlashcardExporter {
    /// 创建新的导出服务
    pub fn new(export_dir: impl Into<String>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    /// 把闪卡文本导出为 CSV 文件
    ///
    /// # 参数
    /// - `flashcards`: 会话中缓存的 CSV 形式文本（模型的原样输出，不做校验）
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub fn export(&self, flashcards: &str) -> AppResult<PathBuf> {
        if flashcards.trim().is_empty() {
            return Err(AppError::Session(SessionError::NothingToExport));
        }

        fs::create_dir_all(&self.export_dir)
            .map_err(|e| AppError::file_write_failed(&self.export_dir, e))?;

        let file_name = format!(
            "flashcards_{}.csv",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = PathBuf::from(&self.export_dir).join(file_name);

        fs::write(&path, flashcards)
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        debug!("闪卡已导出: {}", path.display());

        Ok(path)
    }
}
