// src/fetch/dispatcher.rs
//! Task dispatcher: expands `(categories × sources)` into batches, launches one
//! tokio task per fetch, paces between category batches, then joins everything
//! before handing the outcomes to the report.

use anyhow::{Context, Result};
use futures::future::join_all;
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::fetch::FetchConfig;
use crate::fetch::error::FetchError;
use crate::fetch::providers::ProviderRegistry;
use crate::fetch::report::Report;
use crate::fetch::types::{FetchTask, NewsInput, Outcome};
use crate::fetch::worker::Worker;

pub const DEFAULT_SOURCE: &str = "reddit";
pub const DEFAULT_CATEGORY: &str = "general";

/// Empty sources → `["reddit"]`, empty categories → `["general"]`.
pub fn with_defaults(sources: &[String], categories: &[String]) -> (Vec<String>, Vec<String>) {
    let sources = if sources.is_empty() {
        vec![DEFAULT_SOURCE.to_string()]
    } else {
        sources.to_vec()
    };
    let categories = if categories.is_empty() {
        vec![DEFAULT_CATEGORY.to_string()]
    } else {
        categories.to_vec()
    };
    (sources, categories)
}

/// One batch per category, in caller order. Duplicates are kept; unknown
/// sources are skipped without a trace.
pub fn expand_tasks(
    registry: &ProviderRegistry,
    sources: &[String],
    categories: &[String],
) -> Vec<Vec<FetchTask>> {
    let (sources, categories) = with_defaults(sources, categories);

    categories
        .iter()
        .map(|category| {
            sources
                .iter()
                .filter_map(|source| {
                    let url = registry.build_url(source, category)?;
                    Some(FetchTask {
                        source: source.clone(),
                        category: category.clone(),
                        url,
                    })
                })
                .collect()
        })
        .collect()
}

/// Fan-out/fan-in engine behind the `news_fetcher` tool.
#[derive(Clone)]
pub struct NewsFetcher {
    worker: Worker,
    batch_delay: Duration,
}

impl NewsFetcher {
    pub fn new(worker: Worker, batch_delay: Duration) -> Self {
        Self {
            worker,
            batch_delay,
        }
    }

    /// Build the HTTP client and registry from configuration.
    pub fn from_config(cfg: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .build()
            .context("building http client")?;
        let registry = Arc::new(ProviderRegistry::from_config(cfg));
        let worker = Worker::new(client, registry, &cfg.user_agent);
        Ok(Self::new(worker, cfg.batch_delay()))
    }

    pub fn registry(&self) -> &ProviderRegistry {
        self.worker.registry()
    }

    pub fn batch_delay(&self) -> Duration {
        self.batch_delay
    }

    /// Run every task to completion and aggregate. Never fails; per-task
    /// errors are carried inside the report.
    pub async fn fetch(&self, input: &NewsInput) -> Report {
        crate::fetch::ensure_metrics_described();

        let batches = expand_tasks(self.registry(), &input.sources, &input.categories);
        let last = batches.len().saturating_sub(1);
        let mut launched: Vec<(FetchTask, JoinHandle<Outcome>)> = Vec::new();

        for (i, batch) in batches.into_iter().enumerate() {
            debug!(target: "fetch", batch = i, tasks = batch.len(), "dispatching batch");
            for task in batch {
                let worker = self.worker.clone();
                let job = task.clone();
                launched.push((task, tokio::spawn(async move { worker.run(job).await })));
            }
            if i < last && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        let (tasks, handles): (Vec<_>, Vec<_>) = launched.into_iter().unzip();
        let joined = join_all(handles).await;

        // Barrier passed: every worker has reported.
        let outcomes = tasks.iter().zip(joined).map(|(task, res)| match res {
            Ok(outcome) => outcome,
            Err(e) => Outcome::failure(task, FetchError::Worker(e.to_string())),
        });
        let report = Report::from_outcomes(outcomes);

        counter!("fetch_reports_total").increment(1);
        info!(
            target: "fetch",
            tasks = tasks.len(),
            entries = report.len(),
            failed = report.failed(),
            "news fetch finished"
        );
        report.log_summary();
        report
    }
}
