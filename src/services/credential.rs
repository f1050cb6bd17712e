//! 凭证提供者 - 业务能力层
//!
//! 只负责"拿到 API 密钥"这一件事：先查配置 / 环境变量，
//! 拿不到再交互式询问一次。没有密钥时所有模型调用都必须
//! 短路并给出用户可见的警告，而不是发起远程请求。

use crate::config::Config;
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// 凭证提供者
///
/// 职责：
/// - 解析 API 密钥（配置优先，交互兜底）
/// - 不重试、不缓存（进程生命周期内只解析一次）
pub struct CredentialProvider;

impl CredentialProvider {
    /// 从配置中解析密钥（配置文件或环境变量已合并进 Config）
    pub fn from_config(config: &Config) -> Option<String> {
        if config.gemini_api_key.is_empty() {
            None
        } else {
            Some(config.gemini_api_key.clone())
        }
    }

    /// 交互式询问一次密钥，输入为空则放弃
    pub fn prompt_interactive() -> Option<String> {
        print!("请输入 Gemini API Key（直接回车跳过，跳过后只显示警告）: ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        let stdin = std::io::stdin();
        if stdin.lock().read_line(&mut line).is_err() {
            return None;
        }

        let key = line.trim().to_string();
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    /// 解析密钥：配置优先，交互兜底
    pub fn resolve(config: &Config) -> Option<String> {
        match Self::from_config(config) {
            Some(key) => {
                info!("✅ AI 已连接（使用配置中的密钥）");
                Some(key)
            }
            None => {
                warn!("⚠️ 未配置 GEMINI_API_KEY");
                let key = Self::prompt_interactive();
                if key.is_none() {
                    warn!("⚠️ 没有 API 密钥，所有模型调用将只显示警告");
                    info!("💡 免费密钥申请: https://aistudio.google.com/");
                }
                key
            }
        }
    }
}
