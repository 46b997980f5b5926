// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod fetch;
pub mod metrics;
pub mod tool;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::AppConfig;
pub use crate::fetch::{NewsFetcher, Report};
pub use crate::tool::{fetch_news, NewsInput, NewsOutput};

/// Build the full application router from configuration.
pub fn app(cfg: &AppConfig) -> anyhow::Result<axum::Router> {
    let fetcher = NewsFetcher::from_config(&cfg.fetch)?;
    Ok(router(AppState::new(fetcher)))
}
