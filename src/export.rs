use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{ProcessedLink, SummarizedArticle};

pub const ALL_PROCESSED_FILE: &str = "all_processed_links.json";

/// Render one category's summary report in the pipeline's text format.
pub fn render_summary_text(
    category: &str,
    entries: &[SummarizedArticle],
    model: &str,
    timestamp: &str,
) -> String {
    let mut lines = Vec::new();
    lines.push(format!("{} | {}\n{}\n", model, timestamp, "=".repeat(60)));
    lines.push(format!("### {} NEWS ###\n", category.to_uppercase()));
    for entry in entries {
        lines.push(format!("- (New) {}\n{}\n", entry.title, entry.summary));
    }
    lines.join("\n")
}

/// Write `summary-<stamp>.txt` and `links-<stamp>.json` for one category.
/// Called only for categories that produced new articles this run.
pub fn write_category_exports(
    output_dir: &Path,
    category: &str,
    entries: &[SummarizedArticle],
    model: &str,
    timestamp: &str,
    file_stamp: &str,
) -> Result<(PathBuf, PathBuf)> {
    let category_dir = output_dir.join(category);
    std::fs::create_dir_all(&category_dir)?;

    let summary_path = category_dir.join(format!("summary-{}.txt", file_stamp));
    std::fs::write(
        &summary_path,
        render_summary_text(category, entries, model, timestamp),
    )?;

    let links_path = category_dir.join(format!("links-{}.json", file_stamp));
    std::fs::write(&links_path, serde_json::to_string_pretty(entries)?)?;

    Ok((summary_path, links_path))
}

/// Overwrite the rolling export with the complete datastore contents.
pub fn write_all_processed(output_dir: &Path, links: &[ProcessedLink]) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(ALL_PROCESSED_FILE);
    std::fs::write(&path, serde_json::to_string_pretty(links)?)?;
    Ok(path)
}
