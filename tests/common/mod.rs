// tests/common/mod.rs
//
// Shared helpers: local mock upstreams on 127.0.0.1:0 and fetchers wired to them.
#![allow(dead_code)]

use axum::Router;
use news_fetcher::config::fetch::{FetchConfig, ProviderEndpoints};
use news_fetcher::NewsFetcher;

pub const REDDIT_JSON: &str = include_str!("../fixtures/reddit_top.json");
pub const GOOGLE_NEWS_XML: &str = include_str!("../fixtures/google_news.xml");
pub const GUARDIAN_XML: &str = include_str!("../fixtures/guardian.xml");

/// Serve `router` on an ephemeral port; returns its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock upstream");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock upstream");
    });
    format!("http://{addr}")
}

/// Base URL of a port nothing listens on.
pub async fn dead_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind scratch listener");
    let addr = listener.local_addr().expect("scratch listener addr");
    drop(listener);
    format!("http://{addr}")
}

/// All three providers point at `base`.
pub fn config_for(base: &str, batch_delay_ms: u64) -> FetchConfig {
    FetchConfig {
        timeout_secs: 5,
        batch_delay_ms,
        endpoints: ProviderEndpoints {
            reddit: base.to_string(),
            google_news: base.to_string(),
            guardian: base.to_string(),
        },
        ..FetchConfig::default()
    }
}

pub fn fetcher_for(base: &str, batch_delay_ms: u64) -> NewsFetcher {
    NewsFetcher::from_config(&config_for(base, batch_delay_ms)).expect("build fetcher")
}
