use rusqlite::{params, OptionalExtension};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::ProcessedLink;

use super::schema::SCHEMA;

#[derive(Debug, Clone)]
pub struct NewSummary {
    pub category: String,
    pub title: String,
    pub link: String,
    pub summary: String,
}

pub struct Repository {
    conn: Connection,
}

impl Repository {
    /// Open the database and run idempotent schema setup.
    pub async fn open(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path.to_string()).await?;

        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    pub async fn link_exists(&self, link: &str) -> Result<bool> {
        let link = link.to_string();
        let exists = self
            .conn
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM news_summaries WHERE link = ?1",
                    params![link],
                    |row| row.get(0),
                )?;
                Ok(count > 0)
            })
            .await?;
        Ok(exists)
    }

    /// Insert-or-ignore on the link key. Returns whether a row landed, so
    /// a concurrent insert between the existence check and this call just
    /// reads as "already there".
    pub async fn insert_summary(&self, summary: NewSummary) -> Result<bool> {
        let inserted = self
            .conn
            .call(move |conn| {
                let rows = conn.execute(
                    r#"INSERT INTO news_summaries (category, title, link, summary)
                       VALUES (?1, ?2, ?3, ?4)
                       ON CONFLICT(link) DO NOTHING"#,
                    params![summary.category, summary.title, summary.link, summary.summary],
                )?;
                Ok(rows > 0)
            })
            .await?;
        Ok(inserted)
    }

    pub async fn summary_for_link(&self, link: &str) -> Result<Option<String>> {
        let link = link.to_string();
        let summary = self
            .conn
            .call(move |conn| {
                let summary = conn
                    .query_row(
                        "SELECT summary FROM news_summaries WHERE link = ?1",
                        params![link],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(summary)
            })
            .await?;
        Ok(summary)
    }

    /// Every row ever stored, newest first. Feeds the global export.
    pub async fn all_processed_links(&self) -> Result<Vec<ProcessedLink>> {
        let links = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT category, title, link FROM news_summaries
                       ORDER BY created_at DESC, id DESC"#,
                )?;
                let links = stmt
                    .query_map([], |row| {
                        Ok(ProcessedLink {
                            category: row.get(0)?,
                            title: row.get(1)?,
                            link: row.get(2)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(links)
            })
            .await?;
        Ok(links)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .call(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM news_summaries", [], |row| row.get(0))?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(link: &str) -> NewSummary {
        NewSummary {
            category: "world".into(),
            title: format!("title for {link}"),
            link: link.into(),
            summary: "a summary".into(),
        }
    }

    async fn temp_repo() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let repo = Repository::open(path.to_str().unwrap()).await.unwrap();
        (dir, repo)
    }

    #[tokio::test]
    async fn schema_setup_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let repo = Repository::open(path.to_str().unwrap()).await.unwrap();
        repo.insert_summary(summary("https://example.com/1"))
            .await
            .unwrap();
        drop(repo);

        // Reopening runs setup against the existing table without error.
        let repo = Repository::open(path.to_str().unwrap()).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_link_is_ignored() {
        let (_dir, repo) = temp_repo().await;
        assert!(repo.insert_summary(summary("https://example.com/1")).await.unwrap());
        assert!(!repo.insert_summary(summary("https://example.com/1")).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.link_exists("https://example.com/1").await.unwrap());
        assert!(!repo.link_exists("https://example.com/2").await.unwrap());
        assert_eq!(
            repo.summary_for_link("https://example.com/1").await.unwrap(),
            Some("a summary".to_string())
        );
        assert_eq!(
            repo.summary_for_link("https://example.com/2").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn all_processed_links_is_newest_first() {
        let (_dir, repo) = temp_repo().await;
        for i in 1..=3 {
            repo.insert_summary(summary(&format!("https://example.com/{i}")))
                .await
                .unwrap();
        }
        let links = repo.all_processed_links().await.unwrap();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].link, "https://example.com/3");
        assert_eq!(links[2].link, "https://example.com/1");
    }
}
