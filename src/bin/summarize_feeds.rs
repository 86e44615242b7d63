use toi_digest::ai::Summarizer;
use toi_digest::config::SummarizeConfig;
use toi_digest::db::Repository;
use toi_digest::{summarize, Result};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SummarizeConfig::from_env()?;
    let repo = Repository::open(&config.database_url).await?;
    let summarizer = Summarizer::new(config.api_key.clone(), config.timeout);

    let report = summarize::run(&config, &repo, &summarizer).await?;

    println!(
        "{} new articles added, total {} stored in DB.",
        report.new_summaries, report.total_stored
    );
    Ok(())
}
