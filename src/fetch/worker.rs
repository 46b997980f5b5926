// src/fetch/worker.rs
use metrics::{counter, histogram};
use reqwest::{header::USER_AGENT, Client};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::fetch::error::FetchError;
use crate::fetch::providers::ProviderRegistry;
use crate::fetch::types::{FetchTask, Outcome};

/// Performs one GET per task and folds every result into an [`Outcome`].
///
/// Cheap to clone; one clone moves into each spawned task.
#[derive(Clone)]
pub struct Worker {
    client: Client,
    registry: Arc<ProviderRegistry>,
    user_agent: Arc<str>,
}

impl Worker {
    pub fn new(client: Client, registry: Arc<ProviderRegistry>, user_agent: &str) -> Self {
        Self {
            client,
            registry,
            user_agent: Arc::from(user_agent),
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Never fails: errors come back as `Outcome::failure`.
    pub async fn run(&self, task: FetchTask) -> Outcome {
        let t0 = Instant::now();
        let outcome = match self.fetch(&task).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(
                    target: "fetch",
                    source = %task.source,
                    category = %task.category,
                    kind = e.kind(),
                    error = %e,
                    "fetch failed"
                );
                Outcome::failure(&task, e)
            }
        };

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("fetch_duration_ms", "source" => task.source.clone()).record(ms);
        counter!(
            "fetch_outcomes_total",
            "source" => task.source.clone(),
            "outcome" => outcome.label()
        )
        .increment(1);
        debug!(
            target: "fetch",
            source = %task.source,
            category = %task.category,
            outcome = outcome.label(),
            ms,
            "task finished"
        );
        outcome
    }

    // Classification order: build, transport, status, empty body, parse.
    async fn fetch(&self, task: &FetchTask) -> Result<Outcome, FetchError> {
        let request = self
            .client
            .get(&task.url)
            .header(USER_AGENT, self.user_agent.as_ref())
            .build()
            .map_err(|e| FetchError::RequestBuild(e.to_string()))?;

        let resp = self
            .client
            .execute(request)
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(format!("reading body: {e}")))?;
        if body.is_empty() {
            return Err(FetchError::EmptyBody);
        }

        match self.registry.adapter(&task.source) {
            Some(adapter) => {
                let items = adapter
                    .parse(&body)
                    .map_err(|e| FetchError::Parse(describe_parse_error(&e)))?;
                Ok(Outcome::success(task, items))
            }
            None => Ok(Outcome::passthrough(
                task,
                String::from_utf8_lossy(&body).into_owned(),
            )),
        }
    }
}

/// Joins the error chain with `: `, skipping links whose text the previous
/// link already carries (quick-xml errors embed their source message).
fn describe_parse_error(e: &anyhow::Error) -> String {
    let mut msg = String::new();
    let mut last = String::new();
    for cause in e.chain() {
        let text = cause.to_string();
        if !last.is_empty() && last.contains(&text) {
            continue;
        }
        if !msg.is_empty() {
            msg.push_str(": ");
        }
        msg.push_str(&text);
        last = text;
    }
    msg
}
