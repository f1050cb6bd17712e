//! 交互式会话循环 - 流程层
//!
//! 辩论对手和测验批改共用同一套循环：
//! 1. 追加 (user, 消息) 到历史
//! 2. 把全部历史按时间顺序重建为 `<role>: <text>` 的扁平记录
//! 3. 组装复合提示词 = 人设/系统指令 + 对话记录 + 任务指令
//! 4. 调用网关（测验批改额外附带原始上传材料）
//! 5. 追加 (assistant, 回复) 到历史并返回
//!
//! 历史在会话内无限增长，不做截断或摘要。

use tracing::{info, warn};

use crate::config::Config;
use crate::models::attachment::Attachment;
use crate::models::session::{render_transcript, ChatRole, ChatTurn};
use crate::prompts;
use crate::services::gateway::{GenerateRequest, ModelGateway, MISSING_KEY_WARNING};

/// 交互式会话循环
pub struct ChatFlow {
    model_name: String,
    /// 日志前缀（辩论 / 测验）
    agent_label: &'static str,
}

impl ChatFlow {
    /// 辩论对手实例（轻量模型，回复短、调用频繁）
    pub fn debate(config: &Config) -> Self {
        Self {
            model_name: config.lite_model_name.clone(),
            agent_label: "辩论",
        }
    }

    /// 测验批改实例（默认模型，附带上传材料）
    pub fn quiz_grader(config: &Config) -> Self {
        Self {
            model_name: config.model_name.clone(),
            agent_label: "测验",
        }
    }

    /// 处理一条用户消息
    ///
    /// # 参数
    /// - `history`: 该智能体的聊天历史（就地追加）
    /// - `system_instruction`: 人设 / 系统指令
    /// - `attachment`: 可选的上传材料（测验批改传入）
    /// - `user_message`: 用户消息
    ///
    /// # 返回
    /// 返回要渲染的回复文本。用户消息总是先入历史；没有凭证时
    /// 返回警告且不追加 assistant 记录。
    pub async fn respond<G: ModelGateway>(
        &self,
        gateway: &G,
        history: &mut Vec<ChatTurn>,
        system_instruction: &str,
        attachment: Option<Attachment>,
        user_message: &str,
    ) -> String {
        history.push(ChatTurn::new(ChatRole::User, user_message));

        if !gateway.has_credential() {
            warn!("[{}] ⚠️ 未配置 API 密钥，跳过模型调用", self.agent_label);
            return MISSING_KEY_WARNING.to_string();
        }

        // 完整历史原样进入提示词，顺序即语义
        let transcript = render_transcript(history);
        let prompt = prompts::chat_prompt(system_instruction, &transcript);

        info!(
            "[{}] 💬 第 {} 轮，调用模型 {}...",
            self.agent_label,
            history.len(),
            self.model_name
        );

        let mut request = GenerateRequest::new(prompt, &self.model_name);
        if let Some(attachment) = attachment {
            request = request.with_attachment(attachment);
        }

        let response = gateway.generate(request).await;

        history.push(ChatTurn::new(ChatRole::Assistant, response.clone()));

        response
    }
}
