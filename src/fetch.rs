use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Local;
use rand::Rng;

use crate::categories;
use crate::config::{FetchConfig, FETCH_OUTPUT_FILE};
use crate::error::Result;
use crate::feed::{sample_articles, FeedFetcher};
use crate::models::{CategoryResult, FetchOutput};

/// Fetch every requested category in order, recording failures inline.
/// One bad category never aborts the run.
pub async fn fetch_all<R: Rng + ?Sized>(
    config: &FetchConfig,
    fetcher: &FeedFetcher,
    rng: &mut R,
) -> FetchOutput {
    let mut data = BTreeMap::new();
    let timestamp = Local::now().format("%d%m%Y.%H.%M.%S").to_string();

    tracing::info!(categories = ?config.categories, "Fetching TOI RSS feeds");

    for category in &config.categories {
        let result = fetch_category(config, fetcher, category, rng).await;
        if result.error {
            tracing::warn!(
                %category,
                message = result.message.as_deref().unwrap_or(""),
                "Category failed"
            );
        }
        data.insert(category.clone(), result);
    }

    FetchOutput { timestamp, data }
}

async fn fetch_category<R: Rng + ?Sized>(
    config: &FetchConfig,
    fetcher: &FeedFetcher,
    category: &str,
    rng: &mut R,
) -> CategoryResult {
    let Some(feed_id) = categories::feed_id(category) else {
        return CategoryResult::failed("Invalid category");
    };

    let url = categories::feed_url(&config.base_url, feed_id);
    tracing::info!(%url, "Fetching feed");

    match fetcher.fetch_feed(&url).await {
        Ok(articles) if articles.is_empty() => CategoryResult::failed("Empty feed"),
        Ok(articles) => {
            let selected = sample_articles(&articles, config.sample_size, rng);
            tracing::info!(
                category,
                total = articles.len(),
                selected = selected.len(),
                "Retrieved feed entries"
            );
            CategoryResult::ok(selected)
        }
        Err(e) => CategoryResult::failed(e.to_string()),
    }
}

/// Persist the fetch result as pretty-printed UTF-8 JSON.
pub fn write_output(output: &FetchOutput, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(FETCH_OUTPUT_FILE);
    let json = serde_json::to_string_pretty(output)?;
    std::fs::write(&path, json)?;
    Ok(path)
}
