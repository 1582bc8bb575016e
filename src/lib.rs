pub mod aggregator;
pub mod fetcher;
pub mod filter;
pub mod normalizer;
pub mod registry;
pub mod types;

pub use aggregator::{NewsAggregator, DEFAULT_AGGREGATED_LIMIT, DEFAULT_SOURCE_LIMIT};
pub use fetcher::{FeedTransport, Fetcher, HttpTransport};
pub use filter::ContentFilter;
pub use normalizer::{ImageExtractor, Normalizer, RegexImageExtractor};
pub use registry::{FeedSource, SourceRegistry};
pub use types::{AggregatorError, Article, ArticlePage, FetchConfig, Result};
