//! 流程层（Workflow Layer）
//!
//! 定义每个智能体的完整处理流程，只依赖业务能力（services），
//! 不持有任何资源，不直接碰 HTTP。
//!
//! ## 模块划分
//!
//! ### `study_flow` - 学习工作流（状态机）
//! - idle → processing → done
//! - 每份上传材料发起三次顺序模型调用（概念图 → 闪卡 → 测验第一问）
//!
//! ### `chat_flow` - 交互式会话循环
//! - 两个实例：辩论对手、测验批改
//! - 追加用户消息 → 重建完整对话记录 → 组装复合提示词 → 追加模型回复
//!
//! ### `research_flow` - 研究拆解智能体
//! - 先拆成 3 个子问题（逗号逐字切分），再做带引用的联网综述
//!
//! ### `syllabus_flow` - 课程表智能体
//! - 单次调用，把课程表变成带 Ghost Task 的 Markdown 行动计划

pub mod chat_flow;
pub mod research_flow;
pub mod study_flow;
pub mod syllabus_flow;

pub use chat_flow::ChatFlow;
pub use research_flow::{split_sub_queries, ResearchFlow, ResearchReport};
pub use study_flow::StudyFlow;
pub use syllabus_flow::SyllabusFlow;
