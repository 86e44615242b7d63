pub const SCHEMA: &str = r#"
-- news_summaries: the pipeline's only durable state.
-- At most one row per distinct link; rows are never updated or deleted.
CREATE TABLE IF NOT EXISTS news_summaries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL,
    title TEXT NOT NULL,
    link TEXT NOT NULL,
    summary TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Kept separate from the table definition so re-running setup against a
-- pre-existing table still ends up with the constraint in place.
CREATE UNIQUE INDEX IF NOT EXISTS idx_news_summaries_link ON news_summaries(link);
"#;
