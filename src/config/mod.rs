pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ROUTING_BASE_URL: &str = "https://api.openrouteservice.org";
pub const DEFAULT_FEATURE_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_FEATURE_TIMEOUT_SECS: u64 = 20;
pub const API_KEY_ENV: &str = "ORS_API_KEY";

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "reach-gateway")]
#[command(about = "Isochrone, POI and routing gateway for the map client")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// OpenRouteService base URL
    #[arg(long)]
    pub ors_base_url: Option<String>,

    /// Overpass interpreter endpoint
    #[arg(long)]
    pub overpass_url: Option<String>,

    #[arg(long)]
    pub overpass_timeout_secs: Option<u64>,

    /// Per-request ceiling for directions calls, bulk legs included
    #[arg(long)]
    pub directions_timeout_secs: Option<u64>,

    /// Maximum in-flight legs per bulk request (default: all at once)
    #[arg(long)]
    pub bulk_concurrency: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    /// Validate configuration, print a summary and exit
    #[arg(long)]
    pub check: bool,
}

/// 啟動時解析一次的不可變設定
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub routing_base_url: String,
    pub routing_api_key: Option<String>,
    pub feature_endpoint: String,
    pub feature_timeout: Duration,
    pub directions_timeout: Option<Duration>,
    pub bulk_concurrency: Option<usize>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            routing_base_url: DEFAULT_ROUTING_BASE_URL.to_string(),
            routing_api_key: None,
            feature_endpoint: DEFAULT_FEATURE_ENDPOINT.to_string(),
            feature_timeout: Duration::from_secs(DEFAULT_FEATURE_TIMEOUT_SECS),
            directions_timeout: None,
            bulk_concurrency: None,
        }
    }
}

impl GatewayConfig {
    /// 載入順序：命令列 > TOML 檔案 > 環境變數 > 預設值
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };

        let env_key = std::env::var(API_KEY_ENV).ok();
        Ok(Self::resolve(cli, file.unwrap_or_default(), env_key))
    }

    pub fn resolve(cli: &CliConfig, file: TomlConfig, env_api_key: Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: cli
                .host
                .clone()
                .or(file.server.host.clone())
                .unwrap_or(defaults.host),
            port: cli.port.or(file.server.port).unwrap_or(defaults.port),
            routing_base_url: cli
                .ors_base_url
                .clone()
                .or(file.routing.base_url.clone())
                .unwrap_or(defaults.routing_base_url),
            routing_api_key: file
                .api_key()
                .or(env_api_key.filter(|key| !key.is_empty())),
            feature_endpoint: cli
                .overpass_url
                .clone()
                .or(file.features.endpoint.clone())
                .unwrap_or(defaults.feature_endpoint),
            feature_timeout: cli
                .overpass_timeout_secs
                .or(file.features.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(defaults.feature_timeout),
            directions_timeout: cli
                .directions_timeout_secs
                .or(file.routing.timeout_secs)
                .map(Duration::from_secs),
            bulk_concurrency: cli.bulk_concurrency.or(file.bulk.concurrency),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ConfigProvider for GatewayConfig {
    fn routing_base_url(&self) -> &str {
        &self.routing_base_url
    }

    fn routing_api_key(&self) -> Option<&str> {
        self.routing_api_key.as_deref()
    }

    fn feature_endpoint(&self) -> &str {
        &self.feature_endpoint
    }

    fn feature_timeout(&self) -> Duration {
        self.feature_timeout
    }

    fn directions_timeout(&self) -> Option<Duration> {
        self.directions_timeout
    }

    fn bulk_concurrency(&self) -> Option<usize> {
        self.bulk_concurrency
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;
        validate_url("routing.base_url", &self.routing_base_url)?;
        validate_url("features.endpoint", &self.feature_endpoint)?;
        validate_positive_number("features.timeout_secs", self.feature_timeout.as_secs(), 1)?;

        if let Some(timeout) = self.directions_timeout {
            validate_positive_number("routing.timeout_secs", timeout.as_secs(), 1)?;
        }

        if let Some(limit) = self.bulk_concurrency {
            validate_range("bulk.concurrency", limit, 1, 256)?;
        }

        // 未設定金鑰不阻止啟動，請求會在服務商端驗證失敗
        if self.routing_api_key.is_none() {
            tracing::warn!("⚠️ {} is not set; routing requests will be unauthenticated", API_KEY_ENV);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_any_source() {
        let config = GatewayConfig::resolve(&CliConfig::default(), TomlConfig::default(), None);

        assert_eq!(config, GatewayConfig::default());
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
        assert_eq!(config.feature_timeout, Duration::from_secs(20));
        assert!(config.directions_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_file_and_file_overrides_defaults() {
        let file = TomlConfig::from_toml_str(
            r#"
[server]
host = "0.0.0.0"
port = 9000

[features]
timeout_secs = 30

[bulk]
concurrency = 4
"#,
        )
        .unwrap();

        let cli = CliConfig {
            port: Some(7000),
            bulk_concurrency: Some(16),
            ..Default::default()
        };

        let config = GatewayConfig::resolve(&cli, file, None);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 7000);
        assert_eq!(config.feature_timeout, Duration::from_secs(30));
        assert_eq!(config.bulk_concurrency, Some(16));
    }

    #[test]
    fn test_api_key_prefers_file_then_env() {
        let file = TomlConfig::from_toml_str("[routing]\napi_key = \"file-key\"\n").unwrap();
        let config = GatewayConfig::resolve(&CliConfig::default(), file, Some("env-key".into()));
        assert_eq!(config.routing_api_key(), Some("file-key"));

        let config = GatewayConfig::resolve(
            &CliConfig::default(),
            TomlConfig::default(),
            Some("env-key".into()),
        );
        assert_eq!(config.routing_api_key(), Some("env-key"));

        let config =
            GatewayConfig::resolve(&CliConfig::default(), TomlConfig::default(), Some(String::new()));
        assert_eq!(config.routing_api_key(), None);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = GatewayConfig {
            routing_base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GatewayConfig {
            feature_timeout: Duration::from_secs(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GatewayConfig {
            bulk_concurrency: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GatewayConfig {
            directions_timeout: Some(Duration::from_secs(0)),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = CliConfig::parse_from([
            "reach-gateway",
            "--port",
            "8080",
            "--overpass-timeout-secs",
            "5",
            "--bulk-concurrency",
            "3",
            "--verbose",
        ]);

        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.overpass_timeout_secs, Some(5));
        assert_eq!(cli.bulk_concurrency, Some(3));
        assert!(cli.verbose);
        assert!(!cli.check);
    }
}
