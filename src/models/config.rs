use serde::Deserialize;

/// Configuration options specific to the VOD catalog service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Base URL of the upstream listing API (`?ac=list&pg=N` is appended).
    pub upstream_url: String,
    /// Key expected in the `api_key` query parameter of `/admin/collect`.
    pub admin_key: String,
    /// Value expected in the `X-Cron-Auth` header of `/cron/collect`.
    pub cron_secret: String,
    /// Pause between two upstream page fetches, in milliseconds.
    #[serde(default = "default_collect_delay_ms")]
    pub collect_delay_ms: u64,
}

fn default_collect_delay_ms() -> u64 {
    1000
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Merge `config/default.yaml`, `config/{APP_ENV}.yaml` and `APP_*`
    /// environment variables, later sources winning.
    pub fn load() -> Result<Self, config::ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
