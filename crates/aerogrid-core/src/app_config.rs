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
    /// Maximum cached prediction responses; `0` disables the cache.
    pub cache_capacity: usize,
    /// Decimal places kept from the center coordinates when building cache keys.
    pub cache_coord_decimals: u32,
    pub rate_limit_per_minute: usize,
    /// Fixed seed for the variation source. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}
