// src/config/fetch.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 120;

fn default_timeout_secs() -> u64 {
    15
}
fn default_batch_delay_ms() -> u64 {
    1_000
}
fn default_user_agent() -> String {
    "DailyFetch/1.0".to_string()
}
fn default_reddit_limit() -> u32 {
    5
}

/// Upstream base URLs. Overridable so tests can target local mocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderEndpoints {
    pub reddit: String,
    pub google_news: String,
    pub guardian: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            reddit: "https://www.reddit.com".to_string(),
            google_news: "https://news.google.com".to_string(),
            guardian: "https://www.theguardian.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout; clamped to 1..=120 s.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Pause between category batches.
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_reddit_limit")]
    pub reddit_limit: u32,
    #[serde(default)]
    pub endpoints: ProviderEndpoints,
    /// token → URL template with `{category}`; bodies are passed through raw.
    #[serde(default)]
    pub custom_sources: BTreeMap<String, String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            batch_delay_ms: default_batch_delay_ms(),
            user_agent: default_user_agent(),
            reddit_limit: default_reddit_limit(),
            endpoints: ProviderEndpoints::default(),
            custom_sources: BTreeMap::new(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS))
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// Fix values that would make the engine misbehave.
    pub(crate) fn sanitize(&mut self) {
        self.timeout_secs = self.timeout_secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);
        if self.user_agent.trim().is_empty() {
            self.user_agent = default_user_agent();
        }
        if self.reddit_limit == 0 {
            self.reddit_limit = default_reddit_limit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_feeds() {
        let cfg = FetchConfig::default();
        assert_eq!(cfg.timeout(), Duration::from_secs(15));
        assert_eq!(cfg.batch_delay(), Duration::from_secs(1));
        assert_eq!(cfg.user_agent, "DailyFetch/1.0");
        assert_eq!(cfg.endpoints.guardian, "https://www.theguardian.com");
    }

    #[test]
    fn timeout_is_bounded() {
        let mut cfg = FetchConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(cfg.timeout(), Duration::from_secs(1));
        cfg.timeout_secs = 10_000;
        assert_eq!(cfg.timeout(), Duration::from_secs(120));
        cfg.sanitize();
        assert_eq!(cfg.timeout_secs, 120);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: FetchConfig = toml::from_str(
            r#"
batch_delay_ms = 250

[endpoints]
reddit = "http://127.0.0.1:8080"

[custom_sources]
hn = "https://hnrss.org/newest?q={category}"
"#,
        )
        .unwrap();
        assert_eq!(cfg.batch_delay_ms, 250);
        assert_eq!(cfg.timeout_secs, 15);
        assert_eq!(cfg.endpoints.reddit, "http://127.0.0.1:8080");
        assert_eq!(cfg.endpoints.google_news, "https://news.google.com");
        assert_eq!(
            cfg.custom_sources.get("hn").map(String::as_str),
            Some("https://hnrss.org/newest?q={category}")
        );
    }
}
