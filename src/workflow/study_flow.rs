//! 学习工作流 - 流程层
//!
//! 核心职责：对一份上传材料执行固定的三步生成
//!
//! 状态机：
//! - idle → processing：用户显式启动（前提是已上传材料）
//! - processing → done：三次顺序模型调用完成后自动转换
//! - done 对当前材料是终态，只有替换 / 移除材料才回到 idle
//!
//! 三步严格按顺序发起（第 2 步不依赖第 1 步的输出，但按序执行
//! 以便逐步展示进度）。某一步失败时，失败文本按原样存入会话并
//! 继续推进到 done——失败不会中断工作流，只在完成时以警告计数
//! 的形式暴露出来。

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, SessionError};
use crate::models::session::{ChatRole, Session, WorkflowStatus};
use crate::prompts;
use crate::services::gateway::{GenerateRequest, ModelGateway, MISSING_KEY_WARNING};

/// 学习工作流
///
/// 职责：
/// - 编排三步生成（概念图 → 闪卡 → 测验第一问）
/// - 结果记忆化到会话中，渲染时不得重新计算
/// - 不持有网关，网关由调用方传入（方便测试替换）
pub struct StudyFlow {
    model_name: String,
    verbose_logging: bool,
}

impl StudyFlow {
    /// 创建新的学习工作流
    pub fn new(config: &Config) -> Self {
        Self {
            model_name: config.model_name.clone(),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 启动工作流
    ///
    /// # 前置条件
    /// - 会话中已上传材料
    /// - 工作流处于 idle 状态
    ///
    /// # 行为
    /// 三次顺序模型调用，结果依次存入
    /// `concept_map` / `flashcards` / `quiz_history`，然后进入 done。
    /// 没有凭证时不启动，保持 idle 并返回错误。
    pub async fn launch<G: ModelGateway>(&self, gateway: &G, session: &mut Session) -> Result<()> {
        let attachment = session
            .uploaded
            .clone()
            .ok_or(AppError::Session(SessionError::NoArtifact))?;

        if session.status() != WorkflowStatus::Idle {
            return Err(AppError::invalid_state("idle", session.status().as_str()).into());
        }

        if !gateway.has_credential() {
            warn!("⚠️ 未配置 API 密钥，工作流不启动");
            anyhow::bail!("{}", MISSING_KEY_WARNING);
        }

        session.set_status(WorkflowStatus::Processing);
        info!("🚀 工作流启动: {} (状态: processing)", attachment.file_name);

        let mut failed_steps = 0usize;

        // ========== 步骤 1: 概念图 ==========
        info!("🧠 步骤 1/3: 生成概念图...");
        let concept_map = gateway
            .generate(
                GenerateRequest::new(prompts::concept_map_prompt(), &self.model_name)
                    .with_attachment(attachment.clone()),
            )
            .await;
        failed_steps += Self::count_failure("概念图", &concept_map);
        self.log_preview(&concept_map);
        session.concept_map = Some(concept_map);
        info!("✓ 步骤 1/3 完成");

        // ========== 步骤 2: 闪卡 ==========
        info!("🗂️ 步骤 2/3: 提取闪卡...");
        let flashcards = gateway
            .generate(
                GenerateRequest::new(prompts::flashcard_prompt(), &self.model_name)
                    .with_attachment(attachment.clone()),
            )
            .await;
        failed_steps += Self::count_failure("闪卡", &flashcards);
        self.log_preview(&flashcards);
        session.flashcards = Some(flashcards);
        info!("✓ 步骤 2/3 完成");

        // ========== 步骤 3: 测验第一问 ==========
        info!("❓ 步骤 3/3: 生成测验第一问...");
        let first_question = gateway
            .generate(
                GenerateRequest::new(prompts::quiz_kickoff_prompt(), &self.model_name)
                    .with_attachment(attachment),
            )
            .await;
        failed_steps += Self::count_failure("测验第一问", &first_question);
        session.push_quiz_turn(ChatRole::Assistant, first_question);
        info!("✓ 步骤 3/3 完成");

        // 三步结束后无条件进入 done，失败只计数不回滚
        session.set_status(WorkflowStatus::Done);

        if failed_steps > 0 {
            warn!(
                "⚠️ 工作流完成 (状态: done)，但有 {}/3 步返回了错误文本",
                failed_steps
            );
        } else {
            info!("✅ 工作流完成 (状态: done)");
        }

        Ok(())
    }

    /// 详细日志开启时显示输出预览
    fn log_preview(&self, response: &str) {
        if self.verbose_logging {
            info!("  预览: {}", crate::utils::logging::truncate_text(response, 80));
        }
    }

    /// 检查某一步的输出是否是错误文本，是则记一次失败
    fn count_failure(step: &str, response: &str) -> usize {
        if response.starts_with("Error:") {
            warn!("⚠️ {} 生成失败，失败文本已按原样存入会话", step);
            1
        } else {
            0
        }
    }
}
