use std::time::Duration;

use feed_rs::parser;
use rand::seq::IndexedRandom;
use rand::Rng;
use reqwest::Client;

use crate::error::Result;
use crate::models::Article;

pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Download and parse one category feed, returning every entry.
    /// Sampling happens in the caller so the random source stays injectable.
    pub async fn fetch_feed(&self, url: &str) -> Result<Vec<Article>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Failed to fetch feed: HTTP {}", response.status()).into());
        }

        let bytes = response.bytes().await?;
        parse_articles(&bytes)
    }
}

/// Extract `{title, link, published}` from a syndication document.
/// Entries without a link are dropped; the link is the dedup key downstream.
pub fn parse_articles(bytes: &[u8]) -> Result<Vec<Article>> {
    let feed = parser::parse(bytes)?;

    let articles = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let link = entry.links.first().map(|l| l.href.clone())?;
            Some(Article {
                title: entry
                    .title
                    .map(|t| t.content)
                    .unwrap_or_else(|| "Untitled".to_string()),
                link,
                published: entry.published.map(|dt| dt.to_rfc2822()),
            })
        })
        .collect();

    Ok(articles)
}

/// Uniform sample of `min(max, len)` distinct articles. Sampling rather
/// than "first N" varies coverage across scheduled runs.
pub fn sample_articles<R: Rng + ?Sized>(
    articles: &[Article],
    max: usize,
    rng: &mut R,
) -> Vec<Article> {
    articles
        .choose_multiple(rng, max.min(articles.len()))
        .cloned()
        .collect()
}
