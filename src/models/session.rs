//! 会话状态
//!
//! 每次交互式运行对应一个会话：工作流进度、上传的材料、
//! 记忆化的生成结果、聊天历史。进程结束即销毁，不做持久化。
//!
//! 关键不变量：
//! - 替换或移除上传材料时，所有派生字段（概念图 / 闪卡 / 测验历史）
//!   必须一起回到初始空状态，不允许残留
//! - 生成结果只在显式状态转换时计算，渲染时只读取缓存

use crate::models::attachment::Attachment;
use std::fmt::Display;

/// 工作流状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStatus {
    /// 空闲（未启动或材料已移除）
    #[default]
    Idle,
    /// 正在执行三步生成
    Processing,
    /// 三步生成完成（对当前材料而言是终态）
    Done,
}

impl WorkflowStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowStatus::Idle => "idle",
            WorkflowStatus::Processing => "processing",
            WorkflowStatus::Done => "done",
        }
    }
}

impl Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 聊天角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// 一条聊天记录（角色 + 文本），会话内只追加、不修改
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// 把聊天历史重建为扁平的文字记录
///
/// 每条记录一行，格式 `<role>: <text>`，按时间顺序排列。
/// 该文本会被原样拼进下一次模型调用的提示词，顺序不可打乱。
pub fn render_transcript(history: &[ChatTurn]) -> String {
    history
        .iter()
        .map(|turn| format!("{}: {}", turn.role.as_str(), turn.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 会话状态
#[derive(Debug, Default)]
pub struct Session {
    /// 工作流状态
    pub workflow_status: WorkflowStatus,
    /// 上传的学习材料（仅通过显式上传动作设置）
    pub uploaded: Option<Attachment>,
    /// 概念图（工作流第 1 步的输出，生成前为 None）
    pub concept_map: Option<String>,
    /// 闪卡（CSV 形式的文本，工作流第 2 步的输出）
    pub flashcards: Option<String>,
    /// 测验聊天历史（工作流第 3 步写入第一个问题）
    pub quiz_history: Vec<ChatTurn>,
    /// 辩论聊天历史（换话题或换智能体时清空）
    pub debate_history: Vec<ChatTurn>,
}

impl Session {
    /// 创建新会话
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前工作流状态
    pub fn status(&self) -> WorkflowStatus {
        self.workflow_status
    }

    /// 设置工作流状态
    pub fn set_status(&mut self, status: WorkflowStatus) {
        self.workflow_status = status;
    }

    /// 上传（或替换）学习材料
    ///
    /// 替换材料时所有派生字段一并重置，保证不残留旧材料的生成结果
    pub fn attach(&mut self, attachment: Attachment) {
        self.uploaded = Some(attachment);
        self.reset_derived();
    }

    /// 移除学习材料，回到初始空状态
    pub fn remove_artifact(&mut self) {
        self.uploaded = None;
        self.reset_derived();
    }

    /// 重置所有派生字段
    fn reset_derived(&mut self) {
        self.set_status(WorkflowStatus::Idle);
        self.concept_map = None;
        self.flashcards = None;
        self.quiz_history.clear();
    }

    /// 追加一条测验记录
    pub fn push_quiz_turn(&mut self, role: ChatRole, text: impl Into<String>) {
        self.quiz_history.push(ChatTurn::new(role, text));
    }

    /// 追加一条辩论记录
    pub fn push_debate_turn(&mut self, role: ChatRole, text: impl Into<String>) {
        self.debate_history.push(ChatTurn::new(role, text));
    }

    /// 清空辩论历史（换话题 / 换智能体时调用）
    pub fn clear_debate_history(&mut self) {
        self.debate_history.clear();
    }
}
