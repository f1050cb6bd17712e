//! 课程表智能体 - 流程层
//!
//! 单次调用：把课程表变成带 Ghost Task（截止日期前的预备任务）
//! 的 Markdown 行动计划表。
//!
//! 纯文本文件直接解码后嵌入提示词；PDF / 图片作为内联数据
//! 随提示词一起发送。

use tracing::{info, warn};

use crate::config::Config;
use crate::models::attachment::Attachment;
use crate::prompts;
use crate::services::gateway::{GenerateRequest, ModelGateway, MISSING_KEY_WARNING};

/// 课程表分析流程
pub struct SyllabusFlow {
    model_name: String,
}

impl SyllabusFlow {
    /// 创建新的课程表流程
    pub fn new(config: &Config) -> Self {
        Self {
            model_name: config.model_name.clone(),
        }
    }

    /// 分析课程表，返回 Markdown 计划表（或错误 / 警告文本）
    pub async fn analyze<G: ModelGateway>(&self, gateway: &G, attachment: &Attachment) -> String {
        if !gateway.has_credential() {
            warn!("[课程表] ⚠️ 未配置 API 密钥，跳过模型调用");
            return MISSING_KEY_WARNING.to_string();
        }

        info!("[课程表] 📅 正在分析: {}", attachment.file_name);

        let request = if attachment.is_text() {
            // 文本文件：内容逐字嵌入提示词
            GenerateRequest::new(
                prompts::syllabus_text_prompt(&attachment.text_content()),
                &self.model_name,
            )
        } else {
            // PDF / 图片：材料走内联数据通道
            GenerateRequest::new(prompts::syllabus_binary_prompt(), &self.model_name)
                .with_attachment(attachment.clone())
        };

        gateway.generate(request).await
    }
}
