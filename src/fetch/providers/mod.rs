// src/fetch/providers/mod.rs
pub mod google_news;
pub mod guardian;
pub mod reddit;

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::fetch::FetchConfig;
use crate::fetch::types::NewsItem;

pub use google_news::GoogleNewsAdapter;
pub use guardian::GuardianAdapter;
pub use reddit::RedditAdapter;

/// Placeholder substituted by the category in custom source templates.
pub const CATEGORY_PLACEHOLDER: &str = "{category}";

/// Provider-specific URL builder + response parser pair.
///
/// Both halves are pure; all I/O lives in the worker.
pub trait NewsAdapter: Send + Sync {
    /// Source token this adapter answers to (e.g. "reddit").
    fn name(&self) -> &'static str;
    fn build_url(&self, category: &str) -> String;
    /// All-or-nothing: a malformed payload fails the whole task.
    fn parse(&self, body: &[u8]) -> Result<Vec<NewsItem>>;
}

/// Resolves source tokens to adapters and custom pass-through templates.
pub struct ProviderRegistry {
    adapters: HashMap<&'static str, Arc<dyn NewsAdapter>>,
    custom: HashMap<String, String>,
}

impl ProviderRegistry {
    pub fn new(adapters: Vec<Arc<dyn NewsAdapter>>) -> Self {
        Self {
            adapters: adapters.into_iter().map(|a| (a.name(), a)).collect(),
            custom: HashMap::new(),
        }
    }

    /// Built-in adapters (reddit, googlenews, guardian) plus configured custom sources.
    pub fn from_config(cfg: &FetchConfig) -> Self {
        let adapters: Vec<Arc<dyn NewsAdapter>> = vec![
            Arc::new(RedditAdapter::new(&cfg.endpoints.reddit, cfg.reddit_limit)),
            Arc::new(GoogleNewsAdapter::new(&cfg.endpoints.google_news)),
            Arc::new(GuardianAdapter::new(&cfg.endpoints.guardian)),
        ];
        let mut registry = Self::new(adapters);
        for (token, template) in &cfg.custom_sources {
            registry = registry.with_custom_source(token, template);
        }
        registry
    }

    /// Register a source without an adapter. Its body is returned verbatim.
    /// A custom token never shadows a built-in adapter.
    pub fn with_custom_source(mut self, token: &str, template: &str) -> Self {
        let token = token.trim();
        if token.is_empty() || self.adapters.contains_key(token) {
            tracing::warn!(target: "fetch", token, "ignoring custom source");
            return self;
        }
        self.custom.insert(token.to_string(), template.to_string());
        self
    }

    /// Request URL for `(source, category)`.
    ///
    /// `None` means the source is unknown: it yields no task and no entry in
    /// the report, indistinguishable from a source that was never requested.
    pub fn build_url(&self, source: &str, category: &str) -> Option<String> {
        if let Some(adapter) = self.adapters.get(source) {
            return Some(adapter.build_url(category));
        }
        self.custom
            .get(source)
            .map(|tpl| tpl.replace(CATEGORY_PLACEHOLDER, category))
    }

    /// `None` puts the worker into pass-through mode.
    pub fn adapter(&self, source: &str) -> Option<Arc<dyn NewsAdapter>> {
        self.adapters.get(source).cloned()
    }

    /// Every token that produces tasks, sorted.
    pub fn known_sources(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .adapters
            .keys()
            .map(|k| k.to_string())
            .chain(self.custom.keys().cloned())
            .collect();
        out.sort();
        out
    }
}

/// RSS feeds routinely carry HTML entities that XML does not define.
pub(crate) fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&hellip;", "...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ProviderRegistry {
        ProviderRegistry::from_config(&FetchConfig::default())
            .with_custom_source("local", "http://127.0.0.1:9/feed/{category}")
    }

    #[test]
    fn known_tokens_resolve_to_adapters() {
        let r = registry();
        for token in ["reddit", "googlenews", "guardian"] {
            assert!(r.adapter(token).is_some(), "{token} should have an adapter");
            assert!(r.build_url(token, "science").is_some());
        }
    }

    #[test]
    fn unknown_source_has_no_url() {
        let r = registry();
        assert!(r.build_url("newsapi", "general").is_none());
        assert!(r.adapter("newsapi").is_none());
    }

    #[test]
    fn custom_source_interpolates_category_and_passes_through() {
        let r = registry();
        assert_eq!(
            r.build_url("local", "sport").as_deref(),
            Some("http://127.0.0.1:9/feed/sport")
        );
        assert!(r.adapter("local").is_none());
    }

    #[test]
    fn custom_source_cannot_shadow_builtin() {
        let r = registry().with_custom_source("reddit", "http://evil/{category}");
        assert!(r
            .build_url("reddit", "general")
            .unwrap()
            .contains("/r/news/top.json"));
    }

    #[test]
    fn known_sources_sorted() {
        assert_eq!(
            registry().known_sources(),
            vec!["googlenews", "guardian", "local", "reddit"]
        );
    }

    #[test]
    fn scrub_replaces_html_only_entities() {
        assert_eq!(
            scrub_html_entities_for_xml("a&nbsp;b &ldquo;c&rdquo; &amp;"),
            "a b \"c\" &amp;"
        );
    }
}
