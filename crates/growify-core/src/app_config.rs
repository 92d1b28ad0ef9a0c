use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Shared secret for CRM webhook signatures. `None` disables
    /// validation (logged as a weak default at startup).
    pub webhook_secret: Option<String>,
    pub hubspot_api_key: Option<String>,
    pub hubspot_base_url: String,
    pub read_timeout_ms: u64,
    pub sync_page_size: usize,
    pub rate_limit_backoff_secs: u64,
    pub sync_max_retries: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "hubspot_api_key",
                &self.hubspot_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("hubspot_base_url", &self.hubspot_base_url)
            .field("read_timeout_ms", &self.read_timeout_ms)
            .field("sync_page_size", &self.sync_page_size)
            .field("rate_limit_backoff_secs", &self.rate_limit_backoff_secs)
            .field("sync_max_retries", &self.sync_max_retries)
            .finish()
    }
}
