use crate::fetcher::{FeedTransport, Fetcher};
use crate::filter::ContentFilter;
use crate::normalizer::Normalizer;
use crate::registry::{FeedSource, SourceRegistry};
use crate::types::{AggregatorError, Article, ArticlePage, FetchConfig, Result};
use chrono::{DateTime, Utc};
use tracing::{error, info};

pub const DEFAULT_AGGREGATED_LIMIT: usize = 50;
pub const DEFAULT_SOURCE_LIMIT: usize = 30;

/// Single entry point over the whole pipeline: fetch, normalize, filter,
/// sort, paginate. Stateless per invocation; every call re-fetches.
pub struct NewsAggregator {
    registry: SourceRegistry,
    fetcher: Fetcher,
    normalizer: Normalizer,
    filter: ContentFilter,
}

impl NewsAggregator {
    pub fn new(registry: SourceRegistry, config: FetchConfig) -> Self {
        Self {
            registry,
            fetcher: Fetcher::new(config),
            normalizer: Normalizer::new(),
            filter: ContentFilter::new(),
        }
    }

    /// Build with a custom transport; used by tests to serve canned
    /// feeds instead of hitting the network.
    pub fn with_transport(registry: SourceRegistry, transport: Box<dyn FeedTransport>) -> Self {
        Self {
            registry,
            fetcher: Fetcher::with_transport(transport),
            normalizer: Normalizer::new(),
            filter: ContentFilter::new(),
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Multi-source entry point. Never fails outward: any unexpected
    /// pipeline error degrades to an empty `status: "ok"` page.
    pub async fn fetch_aggregated_news(&self, page: usize, limit: usize) -> ArticlePage {
        let now = Utc::now();
        match self.run(self.registry.sources(), page, limit, now).await {
            Ok(result) => result,
            Err(e) => {
                error!("Aggregated fetch failed, degrading to empty page: {}", e);
                ArticlePage::empty()
            }
        }
    }

    /// Single-source entry point. An unknown source name is a caller
    /// error and the only condition this module propagates outward; the
    /// lookup happens before any network call.
    pub async fn fetch_news_from_source(
        &self,
        source_name: &str,
        page: usize,
        limit: usize,
    ) -> Result<ArticlePage> {
        let source = self
            .registry
            .get(source_name)
            .ok_or_else(|| AggregatorError::SourceNotFound {
                name: source_name.to_string(),
            })?
            .clone();

        let now = Utc::now();
        self.run(std::slice::from_ref(&source), page, limit, now).await
    }

    async fn run(
        &self,
        sources: &[FeedSource],
        page: usize,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<ArticlePage> {
        let fetched = self.fetcher.fetch_all(sources).await;

        let articles: Vec<Article> = fetched
            .iter()
            .flat_map(|(source, entries)| {
                entries
                    .iter()
                    .map(|entry| self.normalizer.normalize(source, entry, now))
            })
            .collect();

        let filtered = self.filter.apply(&articles, now);

        info!(
            "Pipeline run: {} raw, {} after filtering",
            articles.len(),
            filtered.len()
        );

        Ok(paginate(filtered, page, limit))
    }
}

/// Contiguous page slice over the filtered, sorted set. Pages beyond the
/// end are not a fault: they yield an empty article list with the full
/// `total_results` intact.
fn paginate(filtered: Vec<Article>, page: usize, limit: usize) -> ArticlePage {
    let page = page.max(1);
    let limit = limit.max(1);

    let total_results = filtered.len();
    let start = (page - 1) * limit;
    let end = start.saturating_add(limit).min(total_results);

    let articles = if start < total_results {
        filtered[start..end].to_vec()
    } else {
        Vec::new()
    };

    ArticlePage {
        status: "ok".to_string(),
        total_results,
        articles,
    }
}
