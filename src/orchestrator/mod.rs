//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层是唯一的交互入口：读取用户指令、持有会话与网关、
//! 调用流程层并渲染结果。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (交互循环，持有 Session 和 GeminiGateway)
//!     ↓
//! workflow (StudyFlow / ChatFlow / ResearchFlow / SyllabusFlow)
//!     ↓
//! services (能力层：gateway / credential / exporter)
//!     ↓
//! clients / api (Gemini HTTP 调用与类型)
//! ```
//!
//! ## 设计原则
//!
//! 1. **每次交互同步执行到底**：一条指令处理完再读下一条，没有后台任务
//! 2. **派生结果只读缓存**：渲染从 Session 取，不重新发起模型调用
//! 3. **无业务逻辑**：只做指令分发和渲染，判断都在流程层

pub mod hub;

pub use hub::App;
