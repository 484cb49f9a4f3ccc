use anyhow::Result;
use pdf_translator_client::{logger, App, Settings};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let settings = Settings::from_env();

    // 命令行参数即待翻译的文件列表
    let files: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();

    // 初始化并运行应用
    App::initialize(settings).await?.run(&files).await?;

    Ok(())
}
