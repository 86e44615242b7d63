use toi_digest::config::FetchConfig;
use toi_digest::feed::FeedFetcher;
use toi_digest::{fetch, Result};

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

    let config = FetchConfig::from_env();
    let fetcher = FeedFetcher::new(config.timeout, &config.user_agent);
    let mut rng = rand::rng();

    let output = fetch::fetch_all(&config, &fetcher, &mut rng).await;
    let path = fetch::write_output(&output, &config.output_dir)?;

    println!("RSS fetch completed successfully!");
    println!("Output saved at: {}", path.display());
    Ok(())
}
