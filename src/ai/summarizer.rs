use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-2.0-flash-lite";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

pub struct Summarizer {
    client: Client,
    api_key: String,
    base_url: String,
}

impl Summarizer {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Redirect API calls, used by tests to simulate endpoint failures.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn generate_summary(&self, prompt: &str, article_text: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, GEMINI_MODEL
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("{}\n\n{}", prompt, article_text),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::GeminiApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let generated: GenerateResponse = response.json().await?;

        let summary = generated
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::GeminiApi("empty response".to_string()))?;

        Ok(summary)
    }

    pub fn model_version(&self) -> &'static str {
        GEMINI_MODEL
    }
}
