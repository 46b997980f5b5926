// src/fetch/report.rs
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, info};

use crate::fetch::types::{Outcome, OutcomeData};

/// category → source → outcome. Ordered maps keep the output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub results: BTreeMap<String, BTreeMap<String, Outcome>>,
}

impl Report {
    /// Later outcomes overwrite earlier ones on the same `(category, source)` key.
    pub fn from_outcomes<I: IntoIterator<Item = Outcome>>(outcomes: I) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            report.insert(outcome);
        }
        report
    }

    pub fn insert(&mut self, outcome: Outcome) {
        self.results
            .entry(outcome.category.clone())
            .or_default()
            .insert(outcome.source.clone(), outcome);
    }

    pub fn get(&self, category: &str, source: &str) -> Option<&Outcome> {
        self.results.get(category).and_then(|m| m.get(source))
    }

    /// Number of `(category, source)` entries.
    pub fn len(&self) -> usize {
        self.results.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn failed(&self) -> usize {
        self.results
            .values()
            .flat_map(BTreeMap::values)
            .filter(|o| !o.is_ok())
            .count()
    }

    pub fn log_summary(&self) {
        for (category, sources) in &self.results {
            for (source, outcome) in sources {
                match (&outcome.data, &outcome.error) {
                    (_, Some(e)) => {
                        info!(target: "fetch", %category, %source, error = %e, "entry failed")
                    }
                    (Some(OutcomeData::Items(items)), None) => {
                        info!(target: "fetch", %category, %source, items = items.len(), "entry ok")
                    }
                    (Some(OutcomeData::Raw(raw)), None) => {
                        info!(target: "fetch", %category, %source, bytes = raw.len(), "entry passthrough")
                    }
                    (None, None) => {
                        error!(target: "fetch", %category, %source, "entry has neither data nor error")
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::error::FetchError;
    use crate::fetch::types::FetchTask;

    fn task(source: &str, category: &str) -> FetchTask {
        FetchTask {
            source: source.into(),
            category: category.into(),
            url: format!("http://localhost/{source}/{category}"),
        }
    }

    #[test]
    fn groups_by_category_then_source() {
        let report = Report::from_outcomes(vec![
            Outcome::success(&task("guardian", "science"), vec![]),
            Outcome::failure(&task("googlenews", "science"), FetchError::EmptyBody),
            Outcome::passthrough(&task("local", "sport"), "raw".into()),
        ]);
        assert_eq!(report.len(), 3);
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.failed(), 1);
        assert!(report.get("science", "guardian").unwrap().is_ok());
        assert!(report.get("sport", "guardian").is_none());
    }

    #[test]
    fn last_write_wins_on_duplicate_key() {
        let report = Report::from_outcomes(vec![
            Outcome::failure(&task("reddit", "sport"), FetchError::EmptyBody),
            Outcome::passthrough(&task("reddit", "sport"), "second".into()),
        ]);
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.get("sport", "reddit").unwrap().data(),
            Some(&OutcomeData::Raw("second".into()))
        );
    }

    #[test]
    fn serializes_under_results_key() {
        let report = Report::from_outcomes(vec![Outcome::passthrough(
            &task("local", "general"),
            "hello".into(),
        )]);
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["results"]["general"]["local"]["data"], "hello");
    }
}
