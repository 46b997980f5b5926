// src/fetch/mod.rs
pub mod dispatcher;
pub mod error;
pub mod providers;
pub mod report;
pub mod types;
pub mod worker;

use metrics::{describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

pub use dispatcher::{expand_tasks, NewsFetcher};
pub use error::FetchError;
pub use report::Report;
pub use types::{FetchTask, NewsInput, NewsItem, Outcome, OutcomeData};

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "fetch_outcomes_total",
            "Fetch tasks finished, by source and outcome."
        );
        describe_histogram!(
            "fetch_duration_ms",
            "Per-task fetch + parse time in milliseconds."
        );
        describe_counter!("fetch_reports_total", "Reports assembled.");
    });
}
