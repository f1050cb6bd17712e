//! 交互主循环
//!
//! 逐行读取指令，每条指令同步执行到底再读下一条。
//! 模型输出直接打印到 stdout，进度和警告走日志。

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::config::Config;
use crate::models::attachment::Attachment;
use crate::models::session::{Session, WorkflowStatus};
use crate::prompts::{self, DebatePersona};
use crate::services::{CredentialProvider, FlashcardExporter, GeminiGateway};
use crate::utils::logging;
use crate::workflow::{ChatFlow, ResearchFlow, StudyFlow, SyllabusFlow};

/// 可选择的智能体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AgentChoice {
    /// 📅 课程表：上传课程表，产出行动计划
    Syllabus,
    /// 📚 学习教练：三步工作流 + 测验问答
    StudyCoach,
    /// ⚔️ 辩论对手：挑战用户的论点
    Debate,
    /// 🔬 研究助手：拆解主题并联网综述
    Research,
}

impl AgentChoice {
    fn name(self) -> &'static str {
        match self {
            AgentChoice::Syllabus => "课程表",
            AgentChoice::StudyCoach => "学习教练",
            AgentChoice::Debate => "辩论对手",
            AgentChoice::Research => "研究助手",
        }
    }

    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "syllabus" | "plan" => Some(AgentChoice::Syllabus),
            "study" | "coach" => Some(AgentChoice::StudyCoach),
            "debate" => Some(AgentChoice::Debate),
            "research" => Some(AgentChoice::Research),
            _ => None,
        }
    }
}

/// 应用主结构
pub struct App {
    gateway: GeminiGateway,
    session: Session,
    study_flow: StudyFlow,
    syllabus_flow: SyllabusFlow,
    debate_flow: ChatFlow,
    quiz_flow: ChatFlow,
    research_flow: ResearchFlow,
    exporter: FlashcardExporter,
    /// 当前智能体（切换时清空辩论历史）
    agent: AgentChoice,
    /// 辩论人设
    persona: DebatePersona,
    /// 辩论话题（更换时清空辩论历史）
    topic: String,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup();

        // 凭证：配置优先，交互兜底；拿不到也继续运行（调用只显示警告）
        let api_key = CredentialProvider::resolve(&config);
        let gateway = GeminiGateway::new(api_key, &config);

        Ok(Self {
            gateway,
            session: Session::new(),
            study_flow: StudyFlow::new(&config),
            syllabus_flow: SyllabusFlow::new(&config),
            debate_flow: ChatFlow::debate(&config),
            quiz_flow: ChatFlow::quiz_grader(&config),
            research_flow: ResearchFlow::new(&config),
            exporter: FlashcardExporter::new(config.flashcard_export_dir.clone()),
            agent: AgentChoice::StudyCoach,
            persona: DebatePersona::Skeptic,
            topic: String::new(),
        })
    }

    /// 运行交互主循环
    pub async fn run(&mut self) -> Result<()> {
        Self::print_help();

        let stdin = std::io::stdin();
        loop {
            print!("[{}] > ", self.agent.name());
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break; // EOF
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == "quit" || line == "exit" {
                break;
            }

            // 每条指令同步执行到底，再读下一条
            self.dispatch(line).await;
        }

        info!("👋 会话结束（状态不持久化）");
        Ok(())
    }

    /// 分发一条指令
    async fn dispatch(&mut self, line: &str) {
        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "help" => Self::print_help(),
            "agent" => self.switch_agent(rest),
            "upload" => self.upload(rest),
            "remove" => {
                self.session.remove_artifact();
                info!("🗑️ 材料已移除，派生内容已全部清空");
            }
            "launch" => self.launch().await,
            "show" => self.show(rest),
            "answer" => self.answer(rest).await,
            "export" => self.export(),
            "persona" => self.set_persona(rest),
            "topic" => self.set_topic(rest),
            "argue" => self.argue(rest).await,
            "research" => self.research(rest).await,
            "plan" => self.plan().await,
            _ => warn!("未知指令: {} （输入 help 查看指令列表）", command),
        }
    }

    fn print_help() {
        println!("🎓 Student Agent Hub");
        println!("  agent <syllabus|study|debate|research>  切换智能体");
        println!("  upload <文件路径>   上传学习材料 (png/jpg/jpeg/pdf/txt/mp3/wav/mp4)");
        println!("  remove              移除材料（同时清空生成结果）");
        println!("  launch              启动三步学习工作流");
        println!("  show <map|cards|quiz>  查看缓存的生成结果");
        println!("  answer <文本>       回答当前测验问题");
        println!("  export              导出闪卡 CSV");
        println!("  persona <skeptic|child|vulcan>  选择辩论人设");
        println!("  topic <文本>        设置辩论话题（清空辩论历史）");
        println!("  argue <文本>        向辩论对手陈述观点");
        println!("  research <主题>     启动两步研究");
        println!("  plan                分析已上传的课程表");
        println!("  quit                退出");
    }

    fn switch_agent(&mut self, rest: &str) {
        match AgentChoice::parse(rest) {
            Some(choice) => {
                if choice != self.agent {
                    // 切换智能体时清空辩论历史
                    self.session.clear_debate_history();
                    self.agent = choice;
                    info!("🤖 已切换到: {}", choice.name());
                }
            }
            None => warn!("未知智能体: {}", rest),
        }
    }

    fn upload(&mut self, path: &str) {
        if path.is_empty() {
            warn!("用法: upload <文件路径>");
            return;
        }
        match Attachment::from_path(path) {
            Ok(attachment) => {
                info!(
                    "📎 已上传: {} ({}, {} 字节)",
                    attachment.file_name,
                    attachment.mime_type,
                    attachment.data.len()
                );
                // 替换材料会同时清空旧的生成结果
                self.session.attach(attachment);
            }
            Err(e) => warn!("上传失败: {}", e),
        }
    }

    async fn launch(&mut self) {
        if let Err(e) = self.study_flow.launch(&self.gateway, &mut self.session).await {
            warn!("工作流未启动: {}", e);
            return;
        }
        // 渲染只读缓存
        self.show("map");
        self.show("cards");
        self.show("quiz");
    }

    /// 渲染缓存的生成结果（不发起任何模型调用）
    fn show(&self, what: &str) {
        match what {
            "map" => match &self.session.concept_map {
                Some(text) => println!("\n### 🧠 概念图\n{}\n", text),
                None => println!("（还没有概念图，先 upload 再 launch）"),
            },
            "cards" => match &self.session.flashcards {
                Some(text) => println!("\n### 🗂️ 闪卡\n{}\n", text),
                None => println!("（还没有闪卡）"),
            },
            "quiz" => {
                if self.session.quiz_history.is_empty() {
                    println!("（测验还没开始）");
                } else {
                    for turn in &self.session.quiz_history {
                        println!("{}: {}", turn.role.as_str(), turn.text);
                    }
                }
            }
            _ => warn!("用法: show <map|cards|quiz>"),
        }
    }

    async fn answer(&mut self, text: &str) {
        if text.is_empty() {
            warn!("用法: answer <文本>");
            return;
        }
        if self.session.status() != WorkflowStatus::Done {
            warn!("测验还没开始，先 upload 再 launch");
            return;
        }
        let attachment = self.session.uploaded.clone();
        let instruction = prompts::quiz_grader_instruction();
        let reply = self
            .quiz_flow
            .respond(
                &self.gateway,
                &mut self.session.quiz_history,
                &instruction,
                attachment,
                text,
            )
            .await;
        println!("\n{}\n", reply);
    }

    fn export(&self) {
        let flashcards = match &self.session.flashcards {
            Some(text) => text,
            None => {
                warn!("还没有闪卡可导出");
                return;
            }
        };
        match self.exporter.export(flashcards) {
            Ok(path) => info!("💾 闪卡已导出: {}", path.display()),
            Err(e) => warn!("导出失败: {}", e),
        }
    }

    fn set_persona(&mut self, rest: &str) {
        match DebatePersona::parse(rest) {
            Some(persona) => {
                self.persona = persona;
                info!("🎭 辩论人设: {}", persona.label());
            }
            None => warn!("用法: persona <skeptic|child|vulcan>"),
        }
    }

    fn set_topic(&mut self, rest: &str) {
        if rest.is_empty() {
            warn!("用法: topic <文本>");
            return;
        }
        self.topic = rest.to_string();
        // 换话题重新开局
        self.session.clear_debate_history();
        info!("📌 辩论话题: {}", self.topic);
    }

    async fn argue(&mut self, text: &str) {
        if text.is_empty() {
            warn!("用法: argue <文本>");
            return;
        }
        let instruction = prompts::debate_system_instruction(self.persona, &self.topic);
        let reply = self
            .debate_flow
            .respond(
                &self.gateway,
                &mut self.session.debate_history,
                &instruction,
                None,
                text,
            )
            .await;
        println!("\n{}\n", reply);
    }

    async fn research(&mut self, topic: &str) {
        if topic.is_empty() {
            warn!("用法: research <主题>");
            return;
        }
        match self.research_flow.run(&self.gateway, topic).await {
            Ok(report) => {
                println!("\n### 📝 研究报告: {}\n", report.topic);
                println!("{}\n", report.report);
            }
            Err(e) => warn!("研究失败: {}", e),
        }
    }

    async fn plan(&mut self) {
        let attachment = match &self.session.uploaded {
            Some(attachment) => attachment.clone(),
            None => {
                warn!("先用 upload 上传课程表");
                return;
            }
        };
        let plan = self.syllabus_flow.analyze(&self.gateway, &attachment).await;
        println!("\n{}\n", plan);
    }
}
