//! # Student Agent Hub
//!
//! 一个把学习材料转发给托管大模型并渲染回复的学习助手
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 接口层（Api / Clients）
//! - `api/` - generateContent 请求/响应的显式类型
//! - `clients/` - Gemini HTTP 客户端，唯一发起远程调用的地方
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `ModelGateway` - 模型调用能力（窄接口，测试可替换）
//! - `CredentialProvider` - 凭证解析能力
//! - `FlashcardExporter` - 闪卡 CSV 导出能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义每个智能体的完整处理流程
//! - `StudyFlow` - 三步学习工作流（idle → processing → done）
//! - `ChatFlow` - 交互式会话循环（辩论 / 测验批改）
//! - `ResearchFlow` - 两步研究（拆解 → 联网综述）
//! - `SyllabusFlow` - 课程表行动计划
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 交互主循环，持有会话和网关，分发指令

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::attachment::Attachment;
pub use models::session::{ChatRole, ChatTurn, Session, WorkflowStatus};
pub use orchestrator::App;
pub use services::gateway::{GenerateRequest, ModelGateway, MISSING_KEY_WARNING};
pub use services::{CredentialProvider, FlashcardExporter, GeminiGateway};
pub use workflow::{ChatFlow, ResearchFlow, StudyFlow, SyllabusFlow};
