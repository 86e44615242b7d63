use std::collections::BTreeMap;

use chrono::Local;

use crate::ai::Summarizer;
use crate::config::{SummarizeConfig, FETCH_OUTPUT_FILE};
use crate::db::{NewSummary, Repository};
use crate::error::{AppError, Result};
use crate::export;
use crate::models::{FetchOutput, SummarizedArticle};

#[derive(Debug, Default)]
pub struct RunReport {
    pub new_summaries: usize,
    pub total_stored: usize,
}

/// Stage 2: read the fetch output, summarize every not-yet-seen article,
/// persist, and write the export artifacts. Per-article failures degrade
/// to recorded error summaries; only configuration problems are fatal.
pub async fn run(
    config: &SummarizeConfig,
    repo: &Repository,
    summarizer: &Summarizer,
) -> Result<RunReport> {
    let input = load_fetch_output(config)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let file_stamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();

    let mut new_by_category: BTreeMap<String, Vec<SummarizedArticle>> = BTreeMap::new();
    let mut new_summaries = 0usize;

    for (category, content) in &input.data {
        for article in &content.articles {
            if repo.link_exists(&article.link).await? {
                tracing::debug!(link = %article.link, "Already summarized, skipping");
                continue;
            }

            tracing::info!(title = %article.title, "Summarizing new article");
            let article_text = format!("Title: {}\nLink: {}\n", article.title, article.link);
            let summary = match summarizer
                .generate_summary(&config.prompt, &article_text)
                .await
            {
                Ok(summary) => summary,
                Err(e) => {
                    tracing::warn!(link = %article.link, error = %e, "Summarization failed");
                    format!("Gemini summarization failed: {}", e)
                }
            };

            let inserted = repo
                .insert_summary(NewSummary {
                    category: category.clone(),
                    title: article.title.clone(),
                    link: article.link.clone(),
                    summary: summary.clone(),
                })
                .await?;
            if !inserted {
                // Lost the check-then-insert race: some other writer owns
                // this link now, so it is not new work of this run.
                tracing::debug!(link = %article.link, "Link already stored, not counting as new");
                continue;
            }

            new_summaries += 1;
            new_by_category
                .entry(category.clone())
                .or_default()
                .push(SummarizedArticle {
                    title: article.title.clone(),
                    link: article.link.clone(),
                    summary,
                });
        }
    }

    for (category, entries) in &new_by_category {
        let (summary_path, links_path) = export::write_category_exports(
            &config.output_dir,
            category,
            entries,
            summarizer.model_version(),
            &timestamp,
            &file_stamp,
        )?;
        tracing::info!(
            %category,
            summary = %summary_path.display(),
            links = %links_path.display(),
            "Wrote category exports"
        );
    }

    let all_links = repo.all_processed_links().await?;
    let all_path = export::write_all_processed(&config.output_dir, &all_links)?;
    tracing::info!(path = %all_path.display(), "Wrote all processed links");

    let report = RunReport {
        new_summaries,
        total_stored: all_links.len(),
    };
    tracing::info!(
        new = report.new_summaries,
        total = report.total_stored,
        "Summarization run complete"
    );
    Ok(report)
}

fn load_fetch_output(config: &SummarizeConfig) -> Result<FetchOutput> {
    let input_path = config.output_dir.join(FETCH_OUTPUT_FILE);
    if !input_path.exists() {
        return Err(AppError::Config(format!(
            "RSS output file not found ({})",
            input_path.display()
        )));
    }
    let raw = std::fs::read_to_string(&input_path)?;
    Ok(serde_json::from_str(&raw)?)
}
