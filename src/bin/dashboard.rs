use eduimagina::config::Config;
use eduimagina::logger::{self, LoggerConfig};
use eduimagina::web;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_with_config(LoggerConfig::development())?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    let config = Config::from_env();

    logger::log_startup_info(
        "EduImagina Dashboard",
        env!("CARGO_PKG_VERSION"),
        config.port.unwrap_or(8080),
    );
    logger::log_config_info(&config);
    log::info!("💤 The AI engine loads lazily, on the first page visit");

    web::dashboard::run(config).await?;
    Ok(())
}
