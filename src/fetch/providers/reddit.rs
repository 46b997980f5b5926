// src/fetch/providers/reddit.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

use super::NewsAdapter;
use crate::fetch::types::{NewsItem, RedditItem};

#[derive(Debug, Deserialize)]
struct Listing {
    data: Option<ListingData>,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Option<Vec<Child>>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Option<Post>,
}

// Every field tolerates absence and wrong types; the listing is loosely typed upstream.
#[derive(Debug, Default, Deserialize)]
struct Post {
    #[serde(default, deserialize_with = "lenient_string")]
    subreddit: String,
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    link_flair_text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    domain: String,
    #[serde(default, deserialize_with = "lenient_string")]
    url_overridden_by_dest: String,
    #[serde(default, deserialize_with = "lenient_string")]
    permalink: String,
    #[serde(default, deserialize_with = "lenient_string")]
    url: String,
}

/// Strings pass through; anything else (null, numbers, objects) becomes "".
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

/// Subreddit top listing (`/r/<sub>/top.json`).
pub struct RedditAdapter {
    base: String,
    limit: u32,
}

impl RedditAdapter {
    pub fn new(base: &str, limit: u32) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            limit,
        }
    }

    fn subreddit_for(category: &str) -> &str {
        match category {
            "general" => "news",
            "sport" => "sports",
            other => other,
        }
    }
}

impl NewsAdapter for RedditAdapter {
    fn name(&self) -> &'static str {
        "reddit"
    }

    fn build_url(&self, category: &str) -> String {
        format!(
            "{}/r/{}/top.json?limit={}",
            self.base,
            Self::subreddit_for(category),
            self.limit
        )
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<NewsItem>> {
        let listing: Listing = serde_json::from_slice(body).context("parsing reddit json")?;
        let children = listing
            .data
            .and_then(|d| d.children)
            .unwrap_or_default();

        Ok(children
            .into_iter()
            .map(|child| {
                let p = child.data.unwrap_or_default();
                NewsItem::Reddit(RedditItem {
                    subreddit: p.subreddit,
                    title: p.title,
                    link_flair_text: p.link_flair_text,
                    domain: p.domain,
                    url_overridden_by_dest: p.url_overridden_by_dest,
                    permalink: p.permalink,
                    url: p.url,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> RedditAdapter {
        RedditAdapter::new("https://www.reddit.com/", 5)
    }

    #[test]
    fn url_maps_general_and_sport() {
        let a = adapter();
        assert_eq!(
            a.build_url("general"),
            "https://www.reddit.com/r/news/top.json?limit=5"
        );
        assert_eq!(
            a.build_url("sport"),
            "https://www.reddit.com/r/sports/top.json?limit=5"
        );
        assert_eq!(
            a.build_url("technology"),
            "https://www.reddit.com/r/technology/top.json?limit=5"
        );
    }

    #[test]
    fn wrong_typed_and_missing_fields_become_empty() {
        let body = br#"{"data":{"children":[
            {"data":{"title":"Hello","subreddit":"technology","link_flair_text":null,"domain":42}},
            {"data":null},
            {}
        ]}}"#;
        let items = adapter().parse(body).unwrap();
        assert_eq!(items.len(), 3);
        match &items[0] {
            NewsItem::Reddit(it) => {
                assert_eq!(it.title, "Hello");
                assert_eq!(it.subreddit, "technology");
                assert_eq!(it.link_flair_text, "");
                assert_eq!(it.domain, "");
                assert_eq!(it.url, "");
            }
            other => panic!("unexpected item {other:?}"),
        }
        assert_eq!(items[1], NewsItem::Reddit(RedditItem::default()));
    }

    #[test]
    fn missing_listing_yields_no_items() {
        assert!(adapter().parse(b"{}").unwrap().is_empty());
        assert!(adapter().parse(br#"{"data":{}}"#).unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(adapter().parse(b"{\"data\": [").is_err());
        assert!(adapter().parse(b"<html>blocked</html>").is_err());
    }
}
