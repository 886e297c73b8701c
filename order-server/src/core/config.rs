/// Server configuration for one tenant-serving node
///
/// # Environment variables
///
/// Every field can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/order-server | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | Log level filter |
/// | NOTIFY_CHANNEL_CAPACITY | 256 | Per-shop notification channel capacity |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/orders HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory, holds the order database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Log level filter
    pub log_level: String,
    /// Per-shop notification channel capacity
    pub notify_channel_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/order-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            notify_channel_capacity: std::env::var("NOTIFY_CHANNEL_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(256),
        }
    }

    /// Override selected fields, mostly for tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Path of the redb database file under the working directory
    pub fn database_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("orders.redb")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
