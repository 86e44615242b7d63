use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, Result};

const DEFAULT_CATEGORIES: &str = "world,technology";
const DEFAULT_BASE_URL: &str = "https://timesofindia.indiatimes.com/rssfeeds";
const DEFAULT_PROMPT: &str = "Summarize briefly and clearly.";
const DEFAULT_DB_PATH: &str = "news_summaries.db";
const USER_AGENT: &str = "Mozilla/5.0 (Kestra RSS Fetcher)";

/// Output mount provided by the orchestrator. Both stages resolve through
/// this single policy so stage 2 always finds what stage 1 wrote.
const OUTPUT_MOUNT: &str = "/kestra/output";

pub const FETCH_OUTPUT_FILE: &str = "toi_rss_output.json";

/// Prefer the orchestrator mount; fall back to the working directory when
/// running outside the container.
pub fn resolve_output_dir() -> PathBuf {
    let mount = Path::new(OUTPUT_MOUNT);
    if mount.is_dir() {
        mount.to_path_buf()
    } else {
        PathBuf::from(".")
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub categories: Vec<String>,
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub sample_size: usize,
    pub output_dir: PathBuf,
}

impl FetchConfig {
    pub fn from_env() -> Self {
        let categories_env =
            std::env::var("CATEGORIES").unwrap_or_else(|_| DEFAULT_CATEGORIES.to_string());
        Self {
            categories: parse_categories(&categories_env),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            sample_size: 2,
            output_dir: resolve_output_dir(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummarizeConfig {
    pub api_key: String,
    pub prompt: String,
    pub database_url: String,
    pub timeout: Duration,
    pub output_dir: PathBuf,
}

impl SummarizeConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AppError::Config("GEMINI_API_KEY environment variable missing".to_string())
            })?;
        let prompt =
            std::env::var("CUSTOM_PROMPT").unwrap_or_else(|_| DEFAULT_PROMPT.to_string());
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        Ok(Self {
            api_key,
            prompt,
            database_url,
            timeout: Duration::from_secs(30),
            output_dir: resolve_output_dir(),
        })
    }
}

fn parse_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn categories_are_trimmed_and_lowercased() {
        assert_eq!(
            parse_categories(" World, TECHNOLOGY ,,sports "),
            vec!["world", "technology", "sports"]
        );
        assert!(parse_categories(" , ").is_empty());
    }

    #[test]
    #[serial]
    fn fetch_config_defaults() {
        std::env::remove_var("CATEGORIES");
        let config = FetchConfig::from_env();
        assert_eq!(config.categories, vec!["world", "technology"]);
        assert_eq!(config.sample_size, 2);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    #[serial]
    fn missing_api_key_is_fatal() {
        std::env::remove_var("GEMINI_API_KEY");
        let err = SummarizeConfig::from_env().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    #[serial]
    fn summarize_config_reads_env() {
        std::env::set_var("GEMINI_API_KEY", "test-key");
        std::env::set_var("CUSTOM_PROMPT", "One sentence only.");
        std::env::remove_var("DATABASE_URL");
        let config = SummarizeConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.prompt, "One sentence only.");
        assert_eq!(config.database_url, DEFAULT_DB_PATH);
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("CUSTOM_PROMPT");
    }
}
