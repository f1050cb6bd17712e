//! 提示词模板
//!
//! 所有发给模型的固定提示词集中在这里，业务代码只负责填充参数。
//! 提示词本身保持英文（模型对英文指令的遵循度更稳定）。

/// 辩论对手人设
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebatePersona {
    /// 怀疑论者：要求证据
    Skeptic,
    /// 五岁小孩：要求简单
    FiveYearOld,
    /// 逻辑瓦肯人：找逻辑谬误
    LogicalVulcan,
}

impl DebatePersona {
    /// 人设的展示名称（也会嵌入提示词）
    pub fn label(self) -> &'static str {
        match self {
            DebatePersona::Skeptic => "The Skeptic (Demands Evidence)",
            DebatePersona::FiveYearOld => "The 5-Year Old (Needs Simplicity)",
            DebatePersona::LogicalVulcan => "The Logical Vulcan (Finds Fallacies)",
        }
    }

    /// 从用户输入解析人设
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "skeptic" | "1" => Some(DebatePersona::Skeptic),
            "child" | "five" | "2" => Some(DebatePersona::FiveYearOld),
            "vulcan" | "3" => Some(DebatePersona::LogicalVulcan),
            _ => None,
        }
    }
}

// ========== 课程表智能体 ==========

/// 纯文本课程表的分析提示词
///
/// 文件内容直接嵌入提示词（文本文件不走内联数据通道）
pub fn syllabus_text_prompt(file_content: &str) -> String {
    format!(
        "You are an expert Academic Project Manager. Analyze this syllabus content:\n\
         ---\n\
         {}\n\
         ---\n\
         Identify all deadlines. Then, create 'Ghost Tasks' (prep work) for each.\n\
         Output the result as a Markdown table with columns: Date, Task, Type (Hard Deadline/Ghost Task).",
        file_content
    )
}

/// 二进制课程表（PDF / 图片）的分析提示词，材料作为内联数据一起发送
pub fn syllabus_binary_prompt() -> String {
    "You are an expert Academic Project Manager. Analyze the syllabus document provided above.\n\n\
     YOUR TASKS:\n\
     1. Identify all explicit deadlines (Exams, Papers, Assignments).\n\
     2. For every deadline, create a 'Ghost Task' (preparation step) that is due 3-7 days before the real deadline.\n\n\
     OUTPUT FORMAT:\n\
     Do not add any additional text. Place the Ghost Tasks before their associated Deadlines.\n\
     Provide only a Markdown table with these columns:\n\
     | Date | Task Name | Type (Deadline vs. Ghost Task) |"
        .to_string()
}

// ========== 学习工作流（三步生成） ==========

/// 第 1 步：概念图
pub fn concept_map_prompt() -> String {
    "You are a study coach. Read the attached study material and produce a concept map \
     in Markdown: a bullet hierarchy of the key concepts, grouped by theme, with one-line \
     explanations. Do not add any text outside the concept map."
        .to_string()
}

/// 第 2 步：闪卡（CSV 文本）
pub fn flashcard_prompt() -> String {
    "You are a study coach. From the attached study material, extract 10 question/answer \
     flashcards. Return only raw CSV with the header line `front,back` and one card per \
     line. Do not wrap the output in a code block."
        .to_string()
}

/// 第 3 步：测验的第一个问题
pub fn quiz_kickoff_prompt() -> String {
    "You are a quiz master. Based on the attached study material, ask the student one \
     short quiz question to start a practice session. Ask only the question, nothing else."
        .to_string()
}

// ========== 辩论智能体 ==========

/// 辩论对手的系统指令
pub fn debate_system_instruction(persona: DebatePersona, topic: &str) -> String {
    format!(
        "You are debating the user. Your persona is: {}.\n\
         The topic is: {}.\n\
         Keep responses short (under 3 sentences) and challenging.\n\
         Do not be mean, but be rigorous. Find weak points in their logic.",
        persona.label(),
        topic
    )
}

// ========== 测验批改智能体 ==========

/// 测验批改的系统指令（与上传的材料一起发送）
pub fn quiz_grader_instruction() -> String {
    "You are a quiz master grading a student on the attached study material. \
     Grade the last answer and ask the next question. Be encouraging but precise: \
     point out what was missing, then ask exactly one new question."
        .to_string()
}

// ========== 聊天复合提示词 ==========

/// 组装一次聊天调用的完整提示词
///
/// 固定结构：系统指令 + 完整对话记录 + 任务指令
pub fn chat_prompt(system_instruction: &str, transcript: &str) -> String {
    format!(
        "{}\n\nConversation so far:\n{}\n\nRespond to the last user message:",
        system_instruction, transcript
    )
}

// ========== 研究智能体 ==========

/// 第 1 步：把研究主题拆成 3 个检索子问题
pub fn decompose_prompt(topic: &str) -> String {
    format!(
        "Break this research topic into 3 specific search queries: '{}'. \
         Return only the queries separated by commas.",
        topic
    )
}

/// 第 2 步：基于子问题做带引用的综述（配合联网搜索）
pub fn synthesis_prompt(topic: &str, sub_queries: &[String]) -> String {
    format!(
        "Write a research summary on '{}'.\n\
         Structure it based on the results of researching these sub-questions: {:?}.\n\
         Provide website links for all sources used in the summary.",
        topic, sub_queries
    )
}
