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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub nominatim_base_url: String,
    pub overpass_base_url: String,
    pub osm_user_agent: String,
    pub osm_timeout_secs: u64,
    pub osm_max_retries: u32,
    pub osm_retry_backoff_base_ms: u64,
    pub search_radius_m: u32,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
}
