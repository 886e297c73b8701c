use order_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv is optional, real env wins)
    dotenv::dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Logging: file output in production, stdout otherwise
    let log_dir = format!("{}/logs", config.work_dir);
    if config.is_production() {
        let _ = std::fs::create_dir_all(&log_dir);
        init_logger_with_file(Some(&config.log_level), Some(&log_dir));
    } else {
        init_logger_with_file(Some(&config.log_level), None);
    }

    tracing::info!("Order server starting...");

    // 4. Initialize server state and run
    let state = ServerState::initialize(config.clone())?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
