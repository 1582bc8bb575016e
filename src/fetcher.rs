use crate::registry::FeedSource;
use crate::types::{AggregatorError, FetchConfig, Result};
use async_trait::async_trait;
use feed_rs::parser;
use futures::future::join_all;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Network seam between the pipeline and the outside world.
///
/// The production implementation fetches over HTTP and parses the body;
/// tests substitute a stub serving canned documents or failures.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn fetch(&self, source: &FeedSource) -> Result<feed_rs::model::Feed>;
}

/// Reqwest-backed transport: one GET per source with a bounded timeout
/// and a declared client identity, body handed to feed-rs.
pub struct HttpTransport {
    client: Client,
    max_feed_bytes: usize,
}

impl HttpTransport {
    pub fn new(config: &FetchConfig) -> Self {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            max_feed_bytes: config.max_feed_size_mb * 1024 * 1024,
        }
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn fetch(&self, source: &FeedSource) -> Result<feed_rs::model::Feed> {
        debug!("Fetching feed: {} ({})", source.name, source.feed_url);

        let response = self.client.get(&source.feed_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(AggregatorError::General(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_feed_bytes {
                return Err(AggregatorError::FeedTooLarge {
                    size_mb: content_length as usize / (1024 * 1024),
                });
            }
        }

        let body = response.bytes().await?;
        if body.len() > self.max_feed_bytes {
            return Err(AggregatorError::FeedTooLarge {
                size_mb: body.len() / (1024 * 1024),
            });
        }

        parser::parse(&body[..])
            .map_err(|e| AggregatorError::Parse(format!("Failed to parse feed: {}", e)))
    }
}

/// Fans out one fetch per source and collects whatever arrives.
pub struct Fetcher {
    transport: Box<dyn FeedTransport>,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self {
            transport: Box::new(HttpTransport::new(&config)),
        }
    }

    pub fn with_transport(transport: Box<dyn FeedTransport>) -> Self {
        Self { transport }
    }

    /// Fetch every source concurrently and wait for all of them to
    /// settle. A failed source contributes an empty entry list; it never
    /// aborts or delays the others.
    pub async fn fetch_all<'a>(
        &self,
        sources: &'a [FeedSource],
    ) -> Vec<(&'a FeedSource, Vec<feed_rs::model::Entry>)> {
        let fetches = sources.iter().map(|source| async move {
            match self.transport.fetch(source).await {
                Ok(feed) => {
                    debug!("Fetched {} entries from {}", feed.entries.len(), source.name);
                    (source, feed.entries)
                }
                Err(e) => {
                    warn!("Failed to fetch feed {}: {}", source.name, e);
                    (source, Vec::new())
                }
            }
        });

        let results = join_all(fetches).await;

        let total: usize = results.iter().map(|(_, entries)| entries.len()).sum();
        info!("Fetched {} raw entries from {} sources", total, sources.len());

        results
    }
}
