// src/tool.rs
//! The `news_fetcher` tool: input/output shapes, metadata, and the entry point
//! the HTTP layer forwards to.

use serde::Serialize;
use serde_json::{json, Value};

use crate::fetch::{NewsFetcher, Report};

pub use crate::fetch::types::NewsInput;

pub const TOOL_NAME: &str = "news_fetcher";
pub const TOOL_DESCRIPTION: &str = "Retrieves news from several sources";

/// Categories advertised to callers. Any other string is still accepted.
pub const SUGGESTED_CATEGORIES: &[&str] = &[
    "technology",
    "business",
    "entertainment",
    "science",
    "sport",
    "general",
];

/// Wire shape: `{"results": {category: {source: outcome}}}`.
pub type NewsOutput = Report;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME,
        description: TOOL_DESCRIPTION,
        input_schema: input_schema(),
    }
}

fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "sources": {
                "type": "array",
                "items": { "type": "string" },
                "description": "list of sources such as 'reddit', 'googlenews', 'guardian'"
            },
            "categories": {
                "type": "array",
                "items": { "type": "string" },
                "description": format!("list of categories such as {}", SUGGESTED_CATEGORIES.iter().map(|c| format!("'{c}'")).collect::<Vec<_>>().join(", "))
            }
        }
    })
}

/// Tool entry point. Always yields a report; failures live inside it.
pub async fn fetch_news(fetcher: &NewsFetcher, input: NewsInput) -> NewsOutput {
    tracing::info!(
        target: "fetch",
        sources = ?input.sources,
        categories = ?input.categories,
        "news_fetcher called"
    );
    fetcher.fetch(&input).await
}
