use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the catalog search service
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,

    /// Base URL of the streaming-link service
    #[serde(default = "default_stream_base_url")]
    pub stream_base_url: String,

    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,

    #[serde(default = "default_stream_timeout_secs")]
    pub stream_timeout_secs: u64,

    /// Value of the `account` cookie sent with search calls
    #[serde(default = "default_account_cookie")]
    pub account_cookie: String,

    /// Timezone reported in the `x-client-info` header
    #[serde(default = "default_client_timezone")]
    pub client_timezone: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_search_base_url() -> String {
    "https://moviebox.ph".to_string()
}

fn default_stream_base_url() -> String {
    "https://fmoviesunblocked.net".to_string()
}

fn default_search_timeout_secs() -> u64 {
    15
}

fn default_stream_timeout_secs() -> u64 {
    10
}

fn default_account_cookie() -> String {
    "7687286686308878808|0|H5|1753483183|".to_string()
}

fn default_client_timezone() -> String {
    "Africa/Casablanca".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/139.0.0.0 Safari/537.36"
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            search_base_url: default_search_base_url(),
            stream_base_url: default_stream_base_url(),
            search_timeout_secs: default_search_timeout_secs(),
            stream_timeout_secs: default_stream_timeout_secs(),
            account_cookie: default_account_cookie(),
            client_timezone: default_client_timezone(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Immutable upstream profile the catalog client builds its requests from
    pub fn upstream_profile(&self) -> UpstreamProfile {
        UpstreamProfile {
            search_base_url: self.search_base_url.trim_end_matches('/').to_string(),
            stream_base_url: self.stream_base_url.trim_end_matches('/').to_string(),
            search_timeout: Duration::from_secs(self.search_timeout_secs),
            stream_timeout: Duration::from_secs(self.stream_timeout_secs),
            account_cookie: self.account_cookie.clone(),
            client_timezone: self.client_timezone.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Fixed hosts, timeouts and browser identity used for every outbound call.
///
/// Never mutated after construction; per-call headers such as the referer are
/// layered on top of it when a request is built.
#[derive(Debug, Clone)]
pub struct UpstreamProfile {
    pub search_base_url: String,
    pub stream_base_url: String,
    pub search_timeout: Duration,
    pub stream_timeout: Duration,
    pub account_cookie: String,
    pub client_timezone: String,
    pub user_agent: String,
}

impl Default for UpstreamProfile {
    fn default() -> Self {
        Config::default().upstream_profile()
    }
}
