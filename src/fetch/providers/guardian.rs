// src/fetch/providers/guardian.rs
use anyhow::{Context, Result};
use quick_xml::de::from_str;
use serde::Deserialize;

use super::{scrub_html_entities_for_xml, NewsAdapter};
use crate::fetch::types::{GuardianItem, NewsItem};

#[derive(Debug, Deserialize)]
struct Rss {
    #[serde(default)]
    channel: Channel,
}

#[derive(Debug, Default, Deserialize)]
struct Channel {
    #[serde(default, rename = "item")]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
}

/// The Guardian section RSS feeds.
pub struct GuardianAdapter {
    base: String,
}

impl GuardianAdapter {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

impl NewsAdapter for GuardianAdapter {
    fn name(&self) -> &'static str {
        "guardian"
    }

    fn build_url(&self, category: &str) -> String {
        match category {
            "entertainment" => format!("{}/uk/culture/rss", self.base),
            "general" => format!("{}/uk/rss", self.base),
            "science" => format!("{}/science/rss", self.base),
            other => format!("{}/uk/{}/rss", self.base, other),
        }
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<NewsItem>> {
        let text = std::str::from_utf8(body).context("guardian body is not utf-8")?;
        let xml_clean = scrub_html_entities_for_xml(text);
        let rss: Rss = from_str(&xml_clean).context("parsing guardian rss xml")?;

        Ok(rss
            .channel
            .item
            .into_iter()
            .map(|it| {
                NewsItem::Guardian(GuardianItem {
                    title: it.title.unwrap_or_default(),
                    description: it.description.unwrap_or_default(),
                    source_url: it.link.unwrap_or_default(),
                })
            })
            .collect())
    }
}
