//! Gemini generateContent 接口类型
//!
//! 请求/响应的显式类型定义，避免在业务代码中散落无类型的 JSON

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gemini API 错误
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("empty response")]
    EmptyResponse,
}

/// generateContent 请求体
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// 消息内容（角色 + 内容片段）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// 内容片段：纯文本或内联二进制数据
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

/// 内联二进制数据（base64 编码 + MIME 类型）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// 模型能力开关
///
/// 目前只使用 google_search（联网搜索），序列化为 `{"google_search": {}}`
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub google_search: serde_json::Value,
}

impl Tool {
    /// 创建联网搜索工具
    pub fn google_search() -> Self {
        Self {
            google_search: serde_json::json!({}),
        }
    }
}

/// 生成参数配置
#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
}

/// generateContent 响应体
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// 候选回复
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

impl GenerateContentResponse {
    /// 提取首个候选回复的全部文本片段
    pub fn text(&self) -> Result<String, GeminiError> {
        let candidate = self.candidates.first().ok_or(GeminiError::EmptyResponse)?;

        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
            .collect();

        if text.is_empty() {
            return Err(GeminiError::EmptyResponse);
        }

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_skips_none_fields() {
        let request = GenerateContentRequest {
            contents: vec![],
            tools: None,
            generation_config: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("tools"));
        assert!(!json.contains("generation_config"));
    }

    #[test]
    fn test_google_search_tool_serialization() {
        let request = GenerateContentRequest {
            contents: vec![],
            tools: Some(vec![Tool::google_search()]),
            generation_config: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""google_search":{}"#));
    }

    #[test]
    fn test_inline_data_serialization() {
        let content = Content {
            role: "user".to_string(),
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: "application/pdf".to_string(),
                        data: "QUJD".to_string(),
                    },
                },
                Part::Text {
                    text: "分析这份文件".to_string(),
                },
            ],
        };

        let json = serde_json::to_string(&content).unwrap();
        assert!(json.contains(r#""mime_type":"application/pdf""#));
        assert!(json.contains(r#""data":"QUJD""#));
    }

    #[test]
    fn test_response_text_extraction() {
        let json = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "你好"}, {"text": "世界"}]}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().unwrap(), "你好世界");
    }

    #[test]
    fn test_response_empty_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(response.text(), Err(GeminiError::EmptyResponse)));
    }
}
