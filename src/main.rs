//! news_fetcher — Binary Entrypoint
//! Loads configuration, boots the Axum HTTP server exposing the tool endpoints,
//! `/health` and `/metrics`.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use news_fetcher::fetch::providers::ProviderRegistry;
use news_fetcher::{app, metrics::Metrics, tool, AppConfig};

/// Compact logs; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("news_fetcher=info,fetch=info,tower_http=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = AppConfig::load_default().context("loading configuration")?;
    let metrics = Metrics::init()?;
    let router = app(&cfg)?.merge(metrics.router());

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!("tool server listening on {addr}");
    info!(
        "Available tool: {} (Sources: {}, Categories: {})",
        tool::TOOL_NAME,
        ProviderRegistry::from_config(&cfg.fetch)
            .known_sources()
            .iter()
            .map(|s| format!("'{s}'"))
            .collect::<Vec<_>>()
            .join(", "),
        tool::SUGGESTED_CATEGORIES
            .iter()
            .map(|c| format!("'{c}'"))
            .collect::<Vec<_>>()
            .join(", ")
    );

    axum::serve(listener, router).await.context("server failed")?;
    Ok(())
}
