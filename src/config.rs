use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation/sentiment backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Redis connection URL; visitor storage stays in memory when unset
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Path to the static movie catalog
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Quiet period before a search keystroke is evaluated
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Viewport width assumed for a new session until it reports a resize
    #[serde(default = "default_viewport_width")]
    pub default_viewport_width: u32,

    /// Seconds without a request after which a visitor session is dropped
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,

    /// Upper bound on sessions held in memory
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_catalog_path() -> String {
    "assets/movies.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_search_debounce_ms() -> u64 {
    500
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_session_idle_secs() -> u64 {
    1800
}

fn default_max_sessions() -> usize {
    10_000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn search_quiet_period(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_env_is_empty() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.backend_url, "http://localhost:5000");
        assert_eq!(config.redis_url, None);
        assert_eq!(config.search_quiet_period(), Duration::from_millis(500));
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.session_idle_timeout(), Duration::from_secs(1800));
        assert_eq!(config.max_sessions, 10_000);
    }

    #[test]
    fn test_overrides_from_env() {
        let vars = vec![
            ("BACKEND_URL".to_string(), "http://recs:8000".to_string()),
            ("REDIS_URL".to_string(), "redis://cache:6379".to_string()),
            ("SEARCH_DEBOUNCE_MS".to_string(), "250".to_string()),
            ("MAX_SESSIONS".to_string(), "50".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.backend_url, "http://recs:8000");
        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.max_sessions, 50);
    }
}
