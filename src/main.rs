use clap::Parser;
use newswire::{
    FetchConfig, NewsAggregator, SourceRegistry, DEFAULT_AGGREGATED_LIMIT, DEFAULT_SOURCE_LIMIT,
};
use tracing::info;

/// Fetch one page of aggregated (or single-source) news and print it.
#[derive(Parser, Debug)]
#[command(name = "newswire", about = "Aggregate and filter AI/social news feeds")]
struct Args {
    /// Restrict the run to one source from the registry
    #[arg(long)]
    source: Option<String>,

    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Articles per page (defaults: 50 aggregated, 30 single-source)
    #[arg(long)]
    limit: Option<usize>,

    /// Emit the page as JSON instead of a listing
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let registry = SourceRegistry::default_sources();
    info!("Loaded registry with {} sources", registry.len());

    let aggregator = NewsAggregator::new(registry, FetchConfig::default());

    let page = match &args.source {
        Some(name) => {
            let limit = args.limit.unwrap_or(DEFAULT_SOURCE_LIMIT);
            aggregator
                .fetch_news_from_source(name, args.page, limit)
                .await?
        }
        None => {
            let limit = args.limit.unwrap_or(DEFAULT_AGGREGATED_LIMIT);
            aggregator.fetch_aggregated_news(args.page, limit).await
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    println!(
        "{} articles ({} total after filtering)",
        page.articles.len(),
        page.total_results
    );
    for article in &page.articles {
        println!(
            "[{}] {} - {}\n    {}",
            article.published_at.format("%Y-%m-%d %H:%M"),
            article.source_name,
            article.title,
            article.url
        );
    }

    Ok(())
}
