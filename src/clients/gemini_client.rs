/// Gemini API 客户端
///
/// 封装所有与 generateContent 相关的 HTTP 调用逻辑
use crate::api::gemini::{GeminiError, GenerateContentRequest, GenerateContentResponse};
use tracing::{debug, error};

/// Gemini 客户端
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
}

impl GeminiClient {
    /// 创建新的 Gemini 客户端
    pub fn new(api_key: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            api_base_url: api_base_url.into(),
        }
    }

    /// 发送 generateContent 请求
    ///
    /// # 参数
    /// - `model`: 模型名称（如 gemini-2.0-flash）
    /// - `request`: 请求体
    ///
    /// # 返回
    /// 返回解析后的响应体
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{}/{}:generateContent", self.api_base_url, model);
        debug!("调用 Gemini API: {}", url);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Gemini API 返回错误 ({}): {}", status, error_text);

            // 尽量提取结构化的错误消息，失败则原样返回
            let error_msg = serde_json::from_str::<serde_json::Value>(&error_text)
                .ok()
                .and_then(|json| {
                    json.get("error")
                        .and_then(|e| e.get("message"))
                        .and_then(|m| m.as_str())
                        .map(|m| m.to_string())
                })
                .unwrap_or(error_text);

            return Err(GeminiError::Api(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_msg
            )));
        }

        debug!("Gemini API 调用成功");

        Ok(response.json().await?)
    }
}
