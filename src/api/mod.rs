//! API 模块
//!
//! 定义与远程模型服务交互的请求/响应类型

pub mod gemini;

pub use gemini::{
    Candidate, Content, GeminiError, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, InlineData, Part, Tool,
};
