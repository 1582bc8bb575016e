use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical article record produced by the normalizer.
///
/// Never mutated after creation; one pipeline run builds a fresh set and
/// discards it when the run completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub source_id: String,
    pub source_name: String,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub content: Option<String>,
}

/// Response envelope returned by the aggregator entry points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticlePage {
    pub status: String,
    pub total_results: usize,
    pub articles: Vec<Article>,
}

impl ArticlePage {
    /// Empty page with `status: "ok"`: the degraded shape callers see
    /// when the pipeline has nothing to give them.
    pub fn empty() -> Self {
        Self {
            status: "ok".to_string(),
            total_results: 0,
            articles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_feed_size_mb: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "newswire/0.1".to_string(),
            timeout_seconds: 15,
            max_feed_size_mb: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Source not found: {name}")]
    SourceNotFound { name: String },

    #[error("Feed size exceeds limit: {size_mb}MB")]
    FeedTooLarge { size_mb: usize },

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
