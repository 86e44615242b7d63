use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One syndication-feed entry. Identity is `link`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub published: Option<String>,
}

/// Per-category outcome recorded in the fetch output. Failures are data,
/// not errors: a bad category never aborts the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResult {
    pub articles: Vec<Article>,
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CategoryResult {
    pub fn ok(articles: Vec<Article>) -> Self {
        Self {
            articles,
            error: false,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            articles: Vec::new(),
            error: true,
            message: Some(message.into()),
        }
    }
}

/// The stage-1 artifact: what stage 2 reads from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchOutput {
    pub timestamp: String,
    pub data: BTreeMap<String, CategoryResult>,
}

/// A newly summarized article, buffered for per-category export files.
#[derive(Debug, Clone, Serialize)]
pub struct SummarizedArticle {
    pub title: String,
    pub link: String,
    #[serde(skip_serializing)]
    pub summary: String,
}

/// One row of the global export, straight from the datastore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedLink {
    pub category: String,
    pub title: String,
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_result_omits_message_key() {
        let result = CategoryResult::ok(vec![Article {
            title: "t".into(),
            link: "https://example.com/a".into(),
            published: None,
        }]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], false);
        assert!(json.get("message").is_none());
        assert_eq!(json["articles"][0]["link"], "https://example.com/a");
    }

    #[test]
    fn failed_result_carries_message() {
        let result = CategoryResult::failed("Invalid category");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], true);
        assert_eq!(json["message"], "Invalid category");
        assert_eq!(json["articles"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn fetch_output_round_trips() {
        let mut data = BTreeMap::new();
        data.insert("world".to_string(), CategoryResult::ok(vec![]));
        data.insert(
            "bogus".to_string(),
            CategoryResult::failed("Invalid category"),
        );
        let output = FetchOutput {
            timestamp: "30082026.12.00.00".into(),
            data,
        };
        let json = serde_json::to_string(&output).unwrap();
        let parsed: FetchOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.timestamp, output.timestamp);
        assert!(parsed.data["bogus"].error);
        assert!(!parsed.data["world"].error);
    }

    #[test]
    fn summarized_article_serializes_without_summary() {
        let entry = SummarizedArticle {
            title: "t".into(),
            link: "l".into(),
            summary: "s".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("summary").is_none());
        assert_eq!(json["title"], "t");
    }
}
