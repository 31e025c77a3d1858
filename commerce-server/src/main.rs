use commerce_server::{AppState, Config, Server};
use commerce_server::utils::logger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    logger::init_logger_with_file(Some(&config.log_level), Some(&config.work_dir));

    tracing::info!(environment = %config.environment, "Commerce server starting...");

    let state = AppState::initialize(&config)?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
