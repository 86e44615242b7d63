mod fetcher;

pub use fetcher::{parse_articles, sample_articles, FeedFetcher};
