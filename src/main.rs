use anyhow::Result;
use student_agent_hub::utils::logging;
use student_agent_hub::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::load();

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
