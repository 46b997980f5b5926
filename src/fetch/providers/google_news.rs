// src/fetch/providers/google_news.rs
use anyhow::{Context, Result};
use quick_xml::de::from_str;
use serde::Deserialize;

use super::{scrub_html_entities_for_xml, NewsAdapter};
use crate::fetch::types::{GoogleNewsItem, NewsItem};

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
    description: Option<String>,
    source: Option<Source>,
}

// <source url="https://publisher.example">Publisher</source>
#[derive(Debug, Default, Deserialize)]
struct Source {
    #[serde(rename = "$text", default)]
    name: String,
    #[serde(rename = "@url", default)]
    url: String,
}

/// Google News search RSS.
pub struct GoogleNewsAdapter {
    base: String,
}

impl GoogleNewsAdapter {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

impl NewsAdapter for GoogleNewsAdapter {
    fn name(&self) -> &'static str {
        "googlenews"
    }

    fn build_url(&self, category: &str) -> String {
        format!(
            "{}/rss/search?hl=en-US&gl=US&ceid=US-en&q={}",
            self.base, category
        )
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<NewsItem>> {
        let text = std::str::from_utf8(body).context("google news body is not utf-8")?;
        let xml_clean = scrub_html_entities_for_xml(text);
        let rss: Rss = from_str(&xml_clean).context("parsing google news rss xml")?;

        let mut out = Vec::with_capacity(rss.channel.item.len());
        for it in rss.channel.item {
            let source = it.source.unwrap_or_default();
            out.push(NewsItem::GoogleNews(GoogleNewsItem {
                title: it.title.unwrap_or_default(),
                description: it.description.unwrap_or_default(),
                source_name: source.name,
                source_url: source.url,
            }));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"science" - Google News</title>
    <item>
      <title>Satellite reaches orbit - Space Daily</title>
      <link>https://news.google.com/rss/articles/abc</link>
      <description>&lt;a href="https://x"&gt;Satellite reaches orbit&lt;/a&gt;</description>
      <source url="https://www.spacedaily.com">Space Daily</source>
    </item>
    <item>
      <title>No source here</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn url_interpolates_category_into_query() {
        let a = GoogleNewsAdapter::new("https://news.google.com");
        assert_eq!(
            a.build_url("science"),
            "https://news.google.com/rss/search?hl=en-US&gl=US&ceid=US-en&q=science"
        );
    }

    #[test]
    fn parses_source_text_and_url_attribute() {
        let items = GoogleNewsAdapter::new("x").parse(FEED.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        let NewsItem::GoogleNews(first) = &items[0] else {
            panic!("expected google news item");
        };
        assert_eq!(first.title, "Satellite reaches orbit - Space Daily");
        assert_eq!(
            first.description,
            r#"<a href="https://x">Satellite reaches orbit</a>"#
        );
        assert_eq!(first.source_name, "Space Daily");
        assert_eq!(first.source_url, "https://www.spacedaily.com");

        let NewsItem::GoogleNews(second) = &items[1] else {
            panic!("expected google news item");
        };
        assert_eq!(second.source_name, "");
        assert_eq!(second.description, "");
    }

    #[test]
    fn mismatched_tags_fail_whole_feed() {
        let broken = "<rss><channel><item><title>x</item></channel></rss>";
        assert!(GoogleNewsAdapter::new("x").parse(broken.as_bytes()).is_err());
    }
}
