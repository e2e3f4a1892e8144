use std::sync::Arc;

use eduimagina::config::Config;
use eduimagina::diffusion::{self, ImageSynthesizer};
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
        "EduImagina Form Demo",
        env!("CARGO_PKG_VERSION"),
        config.port.unwrap_or(8081),
    );
    logger::log_config_info(&config);

    // Eager load: this shell refuses to start without a working engine.
    log::info!("🔄 Loading the AI engine before serving...");
    let client = diffusion::shared(&config.gateway()).await?;
    log::info!("✅ Engine ready: {}", client.model());

    web::form::run(Arc::new(client.clone()), config).await?;
    Ok(())
}
