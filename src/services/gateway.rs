//! 模型网关 - 业务能力层
//!
//! 系统中唯一与远程模型服务对话的入口。
//!
//! 职责：
//! - 把（提示词 + 可选材料 + 模型名 + 能力开关）转成一次 generateContent 调用
//! - 统一错误处理：任何传输 / 服务错误都折叠为 `"Error: <message>"` 文本
//! - 没有密钥时短路返回警告，不发起远程请求
//! - 不重试、不区分错误种类、不做任何副作用

use crate::api::gemini::{Content, GenerateContentRequest, InlineData, Part, Tool};
use crate::clients::GeminiClient;
use crate::config::Config;
use crate::models::attachment::Attachment;
use tracing::{debug, warn};

/// 没有密钥时返回给用户的警告文本
pub const MISSING_KEY_WARNING: &str =
    "⚠️ Please enter a valid API Key to generate a real response.";

/// 一次模型调用的请求
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// 提示词文本
    pub prompt: String,
    /// 可选的学习材料（二进制内联数据）
    pub attachment: Option<Attachment>,
    /// 模型名称
    pub model: String,
    /// 是否启用联网搜索能力
    pub web_search: bool,
}

impl GenerateRequest {
    /// 创建纯文本请求
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            attachment: None,
            model: model.into(),
            web_search: false,
        }
    }

    /// 附带学习材料
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// 启用联网搜索
    pub fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }
}

/// 模型网关
///
/// 远程模型被视为一个不透明能力，藏在这个窄接口后面，
/// 测试时可以用记录调用的假网关替换。
/// 约定：`generate` 永远返回可渲染的文本，不向调用方抛结构化错误。
pub trait ModelGateway {
    /// 是否持有可用凭证；没有凭证时调用方必须短路并显示警告
    fn has_credential(&self) -> bool;

    fn generate(&self, request: GenerateRequest) -> impl std::future::Future<Output = String> + Send;
}

/// Gemini 网关实现
pub struct GeminiGateway {
    /// 没有密钥时为 None，所有调用短路
    client: Option<GeminiClient>,
}

impl GeminiGateway {
    /// 创建网关
    ///
    /// # 参数
    /// - `api_key`: 凭证提供者解析出的密钥，None 表示未配置
    /// - `config`: 程序配置（API 基础 URL）
    pub fn new(api_key: Option<String>, config: &Config) -> Self {
        let client = api_key.map(|key| GeminiClient::new(key, &config.api_base_url));
        Self { client }
    }

    /// 把请求转成 generateContent 的请求体
    fn build_request(request: &GenerateRequest) -> GenerateContentRequest {
        let mut parts = Vec::new();

        // 材料放在提示词之前，与提示词中"上面提供的文档"的措辞保持一致
        if let Some(attachment) = &request.attachment {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: attachment.mime_type.clone(),
                    data: attachment.to_base64(),
                },
            });
        }

        parts.push(Part::Text {
            text: request.prompt.clone(),
        });

        let tools = if request.web_search {
            Some(vec![Tool::google_search()])
        } else {
            None
        };

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            tools,
            generation_config: None,
        }
    }
}

impl ModelGateway for GeminiGateway {
    fn has_credential(&self) -> bool {
        self.client.is_some()
    }

    /// 调用模型
    ///
    /// 返回模型的文本回复；任何失败都折叠为 `"Error: <message>"`，
    /// 调用方不需要（也不可能）区分失败种类。
    async fn generate(&self, request: GenerateRequest) -> String {
        let client = match &self.client {
            Some(client) => client,
            None => {
                warn!("⚠️ 未配置 API 密钥，跳过模型调用");
                return MISSING_KEY_WARNING.to_string();
            }
        };

        debug!(
            "调用模型: {} (材料: {}, 联网搜索: {})",
            request.model,
            request
                .attachment
                .as_ref()
                .map(|a| a.file_name.as_str())
                .unwrap_or("无"),
            request.web_search
        );

        let body = Self::build_request(&request);

        match client.generate(&request.model, &body).await {
            Ok(response) => match response.text() {
                Ok(text) => text,
                Err(e) => {
                    warn!("模型返回内容为空: {}", e);
                    format!("Error: {}", e)
                }
            },
            Err(e) => {
                warn!("模型调用失败: {}", e);
                format!("Error: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_text_only() {
        let request = GenerateRequest::new("你好", "gemini-2.0-flash");
        let body = GeminiGateway::build_request(&request);

        assert_eq!(body.contents.len(), 1);
        assert_eq!(body.contents[0].parts.len(), 1);
        assert!(body.tools.is_none());
    }

    #[test]
    fn test_build_request_attachment_comes_first() {
        let attachment = Attachment::new("doc.pdf", "application/pdf", vec![1, 2, 3]);
        let request =
            GenerateRequest::new("分析这份文件", "gemini-2.0-flash").with_attachment(attachment);
        let body = GeminiGateway::build_request(&request);

        assert_eq!(body.contents[0].parts.len(), 2);
        assert!(matches!(
            &body.contents[0].parts[0],
            Part::InlineData { .. }
        ));
        assert!(matches!(&body.contents[0].parts[1], Part::Text { .. }));
    }

    #[test]
    fn test_build_request_web_search_tool() {
        let request = GenerateRequest::new("研究", "gemini-2.0-flash").with_web_search();
        let body = GeminiGateway::build_request(&request);

        assert_eq!(body.tools.as_ref().map(|t| t.len()), Some(1));
    }

    /// 没有密钥时必须短路返回警告，不发起任何远程调用
    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let gateway = GeminiGateway::new(None, &Config::default());
        let response = gateway
            .generate(GenerateRequest::new("你好", "gemini-2.0-flash"))
            .await;
        assert_eq!(response, MISSING_KEY_WARNING);
    }
}
