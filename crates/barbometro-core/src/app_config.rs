use std::net::SocketAddr;
use std::path::PathBuf;

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
    pub sheet_id: String,
    pub sheet_range: String,
    pub csv_gid: u32,
    pub sheets_api_key: Option<String>,
    pub maps_api_key: Option<String>,
    /// Trusted backend asked for the spreadsheet key when `sheets_api_key` is unset.
    pub sheets_key_endpoint: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub map_load_timeout_ms: u64,
    pub map_poll_interval_ms: u64,
    pub guides_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("sheet_id", &self.sheet_id)
            .field("sheet_range", &self.sheet_range)
            .field("csv_gid", &self.csv_gid)
            .field(
                "sheets_api_key",
                &self.sheets_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "maps_api_key",
                &self.maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("sheets_key_endpoint", &self.sheets_key_endpoint)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("map_load_timeout_ms", &self.map_load_timeout_ms)
            .field("map_poll_interval_ms", &self.map_poll_interval_ms)
            .field("guides_path", &self.guides_path)
            .finish()
    }
}
