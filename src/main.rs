mod api;
mod config;
mod error;
mod model;
mod service;
mod util;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, fmt, Layer};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // 创建日志目录
    let log_dir = PathBuf::from("logs");
    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)?;
    }

    // 配置日志文件（按日期滚动）
    let file_appender = tracing_appender::rolling::daily(&log_dir, "vectorizer_tool.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // 环境过滤器
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // 控制台输出层（带颜色）
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_filter(filter.clone());

    // 文件输出层（无颜色）
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(filter);

    // 初始化日志：同时输出到控制台和文件
    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!("日志文件位置: {}/vectorizer_tool.log", log_dir.display());

    // 加载配置
    let config = config::AppConfig::load("config.toml").await?;
    let bind_addr = config.bind_addr();

    // 构建应用状态（产物目录在这里创建）
    let app_state = api::AppState::new(config)?;

    // 配置路由
    let app = api::routes::create_router(app_state);

    // 启动服务器
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
