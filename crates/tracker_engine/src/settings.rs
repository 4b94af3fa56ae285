use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://codeforces.com/api/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Base the method names (`problemset.problems`, ...) are joined onto.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Upper bound on a response body; the full catalog is several megabytes.
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 64 * 1024 * 1024,
            user_agent: concat!("cf-tracker/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
