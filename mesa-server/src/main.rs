use mesa_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 环境变量 (.env 可选)
    dotenv::dotenv().ok();

    // 2. 加载配置
    let config = Config::from_env();

    // 3. 日志 (work_dir/logs 存在时滚动写文件)
    std::fs::create_dir_all(config.logs_dir()).ok();
    init_logger_with_file(
        Some(&config.log_level),
        config.logs_dir().to_str(),
    );

    print_banner();
    tracing::info!("Mesa server starting...");

    // 4. 初始化服务器状态
    let state = ServerState::initialize(&config).await;

    // 5. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
