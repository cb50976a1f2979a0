use crate::service::IngestOptions;
use config::builder::{ConfigBuilder, DefaultState};
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub ingest: IngestOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// 上传请求体上限 (字节)
    pub max_bytes: usize,
}

const DEFAULT_MAX_UPLOAD_BYTES: i64 = 10 * 1024 * 1024;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            upload: UploadConfig {
                max_bytes: DEFAULT_MAX_UPLOAD_BYTES as usize,
            },
            ingest: IngestOptions::default(),
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 -> config/invoice-ingest.{toml,json,yaml} (可选) -> INGEST__ 前缀的环境变量
    ///
    /// 例: `INGEST__SERVER__PORT=9000`, `INGEST__INGEST__BASE_CURRENCY=USD`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::with_defaults()?
            .add_source(config::File::with_name("config/invoice-ingest").required(false))
            .add_source(
                config::Environment::with_prefix("INGEST")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// 只含默认值的配置构建器, 外部配置源在其上叠加
    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        let defaults = IngestOptions::default();

        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080_i64)?
            .set_default("upload.max_bytes", DEFAULT_MAX_UPLOAD_BYTES)?
            .set_default("ingest.base_currency", defaults.base_currency)?
            .set_default("ingest.reject_missing_currencies", defaults.reject_missing_currencies)
    }
}
