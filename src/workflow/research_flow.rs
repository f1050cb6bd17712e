//! 研究拆解智能体 - 流程层
//!
//! 两次模型调用：
//! 1. 把研究主题拆成 3 个检索子问题（对回复做逐字的逗号切分，
//!    模型没有恰好返回两个逗号时子问题数量就不是 3——沿用原始
//!    行为，不做校验）
//! 2. 带联网搜索能力做综述，要求给出引用链接（引用格式同样不校验）

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::prompts;
use crate::services::gateway::{GenerateRequest, ModelGateway};

/// 研究报告
#[derive(Debug, Clone)]
pub struct ResearchReport {
    /// 研究主题
    pub topic: String,
    /// 拆解出的子问题
    pub sub_queries: Vec<String>,
    /// 综述正文（期望含引用链接，不校验）
    pub report: String,
}

/// 把拆解回复逐字按逗号切分为子问题列表
///
/// 每段去掉首尾空白；不校验数量
pub fn split_sub_queries(response: &str) -> Vec<String> {
    response
        .split(',')
        .map(|q| q.trim().to_string())
        .collect()
}

/// 研究拆解流程
pub struct ResearchFlow {
    model_name: String,
}

impl ResearchFlow {
    /// 创建新的研究流程
    pub fn new(config: &Config) -> Self {
        Self {
            model_name: config.model_name.clone(),
        }
    }

    /// 执行一次完整研究
    pub async fn run<G: ModelGateway>(&self, gateway: &G, topic: &str) -> Result<ResearchReport> {
        if !gateway.has_credential() {
            warn!("[研究] ⚠️ 未配置 API 密钥");
            anyhow::bail!("未配置 API 密钥，无法开始研究");
        }

        info!("[研究] 🔬 开始调查: {}", topic);

        // ========== 步骤 1: 拆解主题 ==========
        info!("[研究] 🧠 步骤 1/2: 拆解为子问题...");
        let decomposition = gateway
            .generate(GenerateRequest::new(
                prompts::decompose_prompt(topic),
                &self.model_name,
            ))
            .await;

        let sub_queries = split_sub_queries(&decomposition);
        for q in &sub_queries {
            info!("[研究]   - 计划检索: {}", q);
        }

        // ========== 步骤 2: 联网综述 ==========
        info!("[研究] 🔍 步骤 2/2: 检索并综述...");
        let report = gateway
            .generate(
                GenerateRequest::new(
                    prompts::synthesis_prompt(topic, &sub_queries),
                    &self.model_name,
                )
                .with_web_search(),
            )
            .await;

        info!("[研究] ✅ 研究完成");

        Ok(ResearchReport {
            topic: topic.to_string(),
            sub_queries,
            report,
        })
    }
}
