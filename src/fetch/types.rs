// src/fetch/types.rs
use serde::{Deserialize, Serialize, Serializer};

use crate::fetch::error::FetchError;

/// Caller request: which sources to query for which categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsInput {
    /// Empty → `["reddit"]`.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Empty → `["general"]`.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl NewsInput {
    pub fn new<S: Into<String>, C: Into<String>>(
        sources: impl IntoIterator<Item = S>,
        categories: impl IntoIterator<Item = C>,
    ) -> Self {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }
}

/// One provider request for one category. Built by the dispatcher,
/// consumed once by a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub source: String,   // e.g. "reddit", "guardian"
    pub category: String, // e.g. "technology"
    pub url: String,
}

/// Social-aggregator post, as extracted from `data.children[].data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RedditItem {
    pub subreddit: String,
    pub title: String,
    pub link_flair_text: String,
    pub domain: String,
    pub url_overridden_by_dest: String,
    pub permalink: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GoogleNewsItem {
    pub title: String,
    pub description: String,
    pub source_name: String,
    pub source_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GuardianItem {
    pub title: String,
    pub description: String,
    pub source_url: String,
}

/// Normalized item. The shape is fixed per adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NewsItem {
    Reddit(RedditItem),
    GoogleNews(GoogleNewsItem),
    Guardian(GuardianItem),
}

impl NewsItem {
    pub fn title(&self) -> &str {
        match self {
            NewsItem::Reddit(it) => &it.title,
            NewsItem::GoogleNews(it) => &it.title,
            NewsItem::Guardian(it) => &it.title,
        }
    }
}

/// Successful payload: parsed items, or the raw body for sources without an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutcomeData {
    Items(Vec<NewsItem>),
    Raw(String),
}

/// Terminal result of a [`FetchTask`]. Exactly one of `data` / `error` is set;
/// the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub(crate) source: String,
    pub(crate) category: String,
    pub(crate) data: Option<OutcomeData>,
    #[serde(serialize_with = "error_as_message")]
    pub(crate) error: Option<FetchError>,
}

impl Outcome {
    pub fn success(task: &FetchTask, items: Vec<NewsItem>) -> Self {
        Self {
            source: task.source.clone(),
            category: task.category.clone(),
            data: Some(OutcomeData::Items(items)),
            error: None,
        }
    }

    pub fn passthrough(task: &FetchTask, body: String) -> Self {
        Self {
            source: task.source.clone(),
            category: task.category.clone(),
            data: Some(OutcomeData::Raw(body)),
            error: None,
        }
    }

    pub fn failure(task: &FetchTask, error: FetchError) -> Self {
        Self {
            source: task.source.clone(),
            category: task.category.clone(),
            data: None,
            error: Some(error),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn data(&self) -> Option<&OutcomeData> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Parsed items, if this outcome carries any.
    pub fn items(&self) -> Option<&[NewsItem]> {
        match &self.data {
            Some(OutcomeData::Items(v)) => Some(v),
            _ => None,
        }
    }

    /// Label used for metrics and log lines.
    pub fn label(&self) -> &'static str {
        match (&self.data, &self.error) {
            (_, Some(e)) => e.kind(),
            (Some(OutcomeData::Raw(_)), None) => "passthrough",
            _ => "ok",
        }
    }
}

fn error_as_message<S: Serializer>(err: &Option<FetchError>, s: S) -> Result<S::Ok, S::Error> {
    match err {
        Some(e) => s.serialize_str(&e.to_string()),
        None => s.serialize_none(),
    }
}
