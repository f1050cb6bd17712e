//! 端到端流程测试
//!
//! 用记录调用的假网关验证各智能体的关键行为，不发起真实远程调用。

use std::sync::Mutex;

use student_agent_hub::models::session::render_transcript;
use student_agent_hub::workflow::split_sub_queries;
use student_agent_hub::{
    Attachment, ChatFlow, ChatRole, Config, GenerateRequest, ModelGateway, ResearchFlow, Session,
    StudyFlow, SyllabusFlow, WorkflowStatus, MISSING_KEY_WARNING,
};

/// 记录全部请求的假网关
struct RecordingGateway {
    has_key: bool,
    responses: Vec<String>,
    calls: Mutex<Vec<GenerateRequest>>,
}

impl RecordingGateway {
    fn new(responses: Vec<&str>) -> Self {
        Self {
            has_key: true,
            responses: responses.into_iter().map(String::from).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn without_credential() -> Self {
        Self {
            has_key: false,
            responses: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn prompt_of_call(&self, index: usize) -> String {
        self.calls.lock().unwrap()[index].prompt.clone()
    }
}

impl ModelGateway for RecordingGateway {
    fn has_credential(&self) -> bool {
        self.has_key
    }

    async fn generate(&self, request: GenerateRequest) -> String {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push(request);
        self.responses
            .get(index)
            .cloned()
            .unwrap_or_else(|| "canned response".to_string())
    }
}

fn text_artifact(content: &str) -> Attachment {
    Attachment::new("syllabus.txt", "text/plain", content.as_bytes().to_vec())
}

/// 端到端：上传课程表文本后，提示词必须嵌入原文并要求三列 Markdown 表格
#[tokio::test]
async fn test_syllabus_prompt_embeds_uploaded_text() {
    let gateway = RecordingGateway::new(vec!["| Date | Task | Type |"]);
    let flow = SyllabusFlow::new(&Config::default());
    let artifact = text_artifact("Exam on Oct 5, Paper due Oct 1");

    let plan = flow.analyze(&gateway, &artifact).await;

    assert_eq!(plan, "| Date | Task | Type |");
    let prompt = gateway.prompt_of_call(0);
    assert!(prompt.contains("Exam on Oct 5, Paper due Oct 1"));
    assert!(prompt.contains("Markdown table with columns: Date, Task, Type"));
}

/// 端到端：idle --launch--> processing --自动--> done，恰好三次网关调用
#[tokio::test]
async fn test_workflow_state_machine_three_calls() {
    let gateway = RecordingGateway::new(vec!["map", "front,back\nq,a", "Q1?"]);
    let flow = StudyFlow::new(&Config::default());
    let mut session = Session::new();
    session.attach(text_artifact("浮力 阿基米德原理"));
    assert_eq!(session.status(), WorkflowStatus::Idle);

    flow.launch(&gateway, &mut session).await.unwrap();

    assert_eq!(session.status(), WorkflowStatus::Done);
    assert_eq!(gateway.call_count(), 3);
    assert_eq!(session.concept_map.as_deref(), Some("map"));
    assert_eq!(session.flashcards.as_deref(), Some("front,back\nq,a"));
    assert_eq!(session.quiz_history.len(), 1);
}

/// 网关失败只产生 "Error:" 前缀文本，流程照常推进，不向上抛错
#[tokio::test]
async fn test_gateway_failure_is_stored_not_raised() {
    let gateway = RecordingGateway::new(vec![
        "Error: network unreachable",
        "Error: network unreachable",
        "Error: network unreachable",
    ]);
    let flow = StudyFlow::new(&Config::default());
    let mut session = Session::new();
    session.attach(text_artifact("材料"));

    let result = flow.launch(&gateway, &mut session).await;

    assert!(result.is_ok());
    assert_eq!(session.status(), WorkflowStatus::Done);
    assert!(session
        .concept_map
        .as_deref()
        .unwrap()
        .starts_with("Error:"));
}

/// 凭证缺失：调用计数必须为 0，且返回警告
#[tokio::test]
async fn test_missing_credential_zero_calls() {
    let gateway = RecordingGateway::without_credential();
    let config = Config::default();

    // 学习工作流不启动
    let mut session = Session::new();
    session.attach(text_artifact("材料"));
    assert!(StudyFlow::new(&config)
        .launch(&gateway, &mut session)
        .await
        .is_err());

    // 聊天循环返回警告
    let mut history = Vec::new();
    let reply = ChatFlow::debate(&config)
        .respond(&gateway, &mut history, "系统指令", None, "观点")
        .await;
    assert_eq!(reply, MISSING_KEY_WARNING);

    // 研究流程直接报错
    assert!(ResearchFlow::new(&config)
        .run(&gateway, "主题")
        .await
        .is_err());

    assert_eq!(gateway.call_count(), 0);
}

/// 固定的用户消息序列：重建的对话记录必须包含每条历史、顺序不变、角色标签保留
#[tokio::test]
async fn test_transcript_contains_all_turns_in_order() {
    let gateway = RecordingGateway::new(vec!["反问 1", "反问 2"]);
    let flow = ChatFlow::debate(&Config::default());
    let mut history = Vec::new();

    flow.respond(&gateway, &mut history, "指令", None, "论点一")
        .await;
    flow.respond(&gateway, &mut history, "指令", None, "论点二")
        .await;

    // 第二次调用的提示词必须包含前三条记录
    let prompt = gateway.prompt_of_call(1);
    let p1 = prompt.find("user: 论点一").unwrap();
    let p2 = prompt.find("assistant: 反问 1").unwrap();
    let p3 = prompt.find("user: 论点二").unwrap();
    assert!(p1 < p2 && p2 < p3);

    // 历史本身也是完整且有序的
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].role, ChatRole::User);
    let transcript = render_transcript(&history);
    assert_eq!(transcript.lines().count(), 4);
}

/// 替换 / 移除材料必须把全部派生字段一起清空
#[tokio::test]
async fn test_artifact_replacement_resets_everything() {
    let gateway = RecordingGateway::new(vec!["map", "cards", "Q1?"]);
    let flow = StudyFlow::new(&Config::default());
    let mut session = Session::new();
    session.attach(text_artifact("旧材料"));
    flow.launch(&gateway, &mut session).await.unwrap();
    assert!(session.concept_map.is_some());

    session.attach(text_artifact("新材料"));

    assert_eq!(session.status(), WorkflowStatus::Idle);
    assert!(session.concept_map.is_none());
    assert!(session.flashcards.is_none());
    assert!(session.quiz_history.is_empty());
}

/// 拆解回复 "a, b, c" 必须得到恰好三个去掉空白的子问题
#[tokio::test]
async fn test_research_decomposition_split() {
    assert_eq!(split_sub_queries("a, b, c"), vec!["a", "b", "c"]);

    let gateway = RecordingGateway::new(vec!["a, b, c", "带引用的综述"]);
    let report = ResearchFlow::new(&Config::default())
        .run(&gateway, "黑洞")
        .await
        .unwrap();

    assert_eq!(report.sub_queries, vec!["a", "b", "c"]);
    assert_eq!(gateway.call_count(), 2);
    // 第二次调用启用联网搜索
    assert!(gateway.calls.lock().unwrap()[1].web_search);
}
