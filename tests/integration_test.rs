//! 真实 API 集成测试
//!
//! 默认忽略，需要配置 GEMINI_API_KEY 后手动运行：
//! cargo test -- --ignored --nocapture

use student_agent_hub::utils::logging;
use student_agent_hub::{
    Attachment, Config, CredentialProvider, GeminiGateway, ResearchFlow, Session, StudyFlow,
    SyllabusFlow, WorkflowStatus,
};

fn live_gateway(config: &Config) -> GeminiGateway {
    let api_key = CredentialProvider::from_config(config);
    assert!(api_key.is_some(), "需要配置 GEMINI_API_KEY");
    GeminiGateway::new(api_key, config)
}

#[tokio::test]
#[ignore]
async fn test_live_syllabus_text_plan() {
    logging::init();

    let config = Config::from_env();
    let gateway = live_gateway(&config);

    let artifact = Attachment::new(
        "syllabus.txt",
        "text/plain",
        b"Midterm exam on March 3. Final paper due March 20.".to_vec(),
    );

    let plan = SyllabusFlow::new(&config).analyze(&gateway, &artifact).await;

    println!("\n========== 行动计划 ==========");
    println!("{}", plan);
    println!("==============================\n");

    assert!(!plan.is_empty());
    assert!(!plan.starts_with("Error:"), "模型调用失败: {}", plan);
}

#[tokio::test]
#[ignore]
async fn test_live_study_workflow() {
    logging::init();

    let config = Config::from_env();
    let gateway = live_gateway(&config);

    let mut session = Session::new();
    session.attach(Attachment::new(
        "notes.txt",
        "text/plain",
        b"Photosynthesis converts light energy into chemical energy in plants.".to_vec(),
    ));

    StudyFlow::new(&config)
        .launch(&gateway, &mut session)
        .await
        .expect("工作流启动失败");

    assert_eq!(session.status(), WorkflowStatus::Done);
    assert!(session.concept_map.is_some());
    assert!(session.flashcards.is_some());
    assert_eq!(session.quiz_history.len(), 1);

    println!("\n========== 概念图 ==========");
    println!("{}", session.concept_map.as_deref().unwrap());
    println!("\n========== 闪卡 ==========");
    println!("{}", session.flashcards.as_deref().unwrap());
    println!("\n========== 测验第一问 ==========");
    println!("{}", session.quiz_history[0].text);
}

#[tokio::test]
#[ignore]
async fn test_live_research() {
    logging::init();

    let config = Config::from_env();
    let gateway = live_gateway(&config);

    let report = ResearchFlow::new(&config)
        .run(&gateway, "How do spaced repetition systems work?")
        .await
        .expect("研究流程失败");

    println!("\n========== 子问题 ==========");
    for q in &report.sub_queries {
        println!("  - {}", q);
    }
    println!("\n========== 研究报告 ==========");
    println!("{}", report.report);

    assert!(!report.report.is_empty());
}
