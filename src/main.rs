use clap::Parser;
use reach_gateway::utils::error::ErrorSeverity;
use reach_gateway::utils::{logger, validation::Validate};
use reach_gateway::{CliConfig, GatewayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 先讀 .env，讓 ORS_API_KEY 可以放在檔案裡
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting reach-gateway");
    if dotenv_loaded {
        tracing::debug!("Loaded environment from .env");
    }

    let config = match GatewayConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        let exit_code = match e.severity() {
            ErrorSeverity::Critical => 3,
            _ => 1,
        };
        std::process::exit(exit_code);
    }

    display_config_summary(&config);

    if cli.check {
        tracing::info!("✅ Configuration is valid");
        return Ok(());
    }

    reach_gateway::serve(config).await
}

fn display_config_summary(config: &GatewayConfig) {
    tracing::info!("📋 Configuration summary:");
    tracing::info!("  listen: {}", config.bind_address());
    tracing::info!("  routing provider: {}", config.routing_base_url);
    tracing::info!(
        "  routing api key: {}",
        if config.routing_api_key.is_some() {
            "set"
        } else {
            "missing"
        }
    );
    tracing::info!(
        "  feature provider: {} (timeout {}s)",
        config.feature_endpoint,
        config.feature_timeout.as_secs()
    );
    match config.directions_timeout {
        Some(timeout) => tracing::info!("  directions timeout: {}s", timeout.as_secs()),
        None => tracing::info!("  directions timeout: none"),
    }
    match config.bulk_concurrency {
        Some(limit) => tracing::info!("  bulk concurrency: {}", limit),
        None => tracing::info!("  bulk concurrency: unbounded"),
    }
}
