//! Decides which normalized articles are eligible for a response.
//!
//! Two composable predicates: the strict pass (recency + language +
//! topicality + URL sanity) and a relaxed fallback (language + URL rules
//! only) that kicks in when the strict pass comes back too sparse, so
//! callers rarely see a fully empty page.

use crate::types::Article;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, info};
use url::Url;

/// Trailing window the strict pass accepts, in days.
pub const RECENCY_WINDOW_DAYS: i64 = 7;

/// Below this many strict survivors the relaxed fallback pass runs.
pub const MIN_STRICT_RESULTS: usize = 10;

/// Cap on the combined strict+relaxed set.
pub const MAX_COMBINED_RESULTS: usize = 200;

/// Minimum length for a link to count as plausible.
pub const MIN_URL_LENGTH: usize = 10;

/// Domains whose articles are dropped outright.
const BLOCKED_DOMAINS: &[&str] = &["pypi.org"];

/// Topical relevance keyword list, matched case-insensitively against
/// title and description.
pub const TOPIC_KEYWORDS: &[&str] = &[
    "artificial intelligence",
    "machine learning",
    "deep learning",
    "neural network",
    "gpt",
    "llm",
    "large language model",
    "chatgpt",
    "openai",
    "anthropic",
    "gemini",
    "copilot",
    "midjourney",
    "stable diffusion",
    "hugging face",
    "generative ai",
    "genai",
    "transformer model",
    "diffusion model",
    "computer vision",
    "natural language",
    "ai model",
    "ai startup",
    "ai research",
    "ai agent",
    "social media",
    "influencer",
    "tiktok",
    "instagram",
    "creator economy",
    "content creator",
    "short-form video",
];

pub struct ContentFilter {
    non_latin: Regex,
    tags: Regex,
    links: Regex,
}

impl ContentFilter {
    pub fn new() -> Self {
        Self {
            // Arabic, Cyrillic, CJK, Hiragana, Katakana blocks.
            non_latin: Regex::new(
                "[\\u{0600}-\\u{06FF}\\u{0400}-\\u{04FF}\\u{4E00}-\\u{9FFF}\\u{3040}-\\u{309F}\\u{30A0}-\\u{30FF}]",
            )
            .expect("invalid script regex"),
            tags: Regex::new(r"<[^>]*>").expect("invalid tag regex"),
            links: Regex::new(r"https?://\S+").expect("invalid link regex"),
        }
    }

    /// Strict pass: all four criteria must hold.
    pub fn passes_strict(&self, article: &Article, now: DateTime<Utc>) -> bool {
        self.is_recent(article, now)
            && self.article_looks_english(article)
            && self.is_topical(article)
            && self.has_plausible_url(article)
            && !on_blocked_domain(&article.url)
    }

    /// Relaxed pass: recency and topicality dropped, the domain denylist,
    /// language heuristic, and URL-length rules kept.
    pub fn passes_relaxed(&self, article: &Article) -> bool {
        self.article_looks_english(article)
            && self.has_plausible_url(article)
            && !on_blocked_domain(&article.url)
    }

    /// Published within the trailing recency window ending at `now`.
    pub fn is_recent(&self, article: &Article, now: DateTime<Utc>) -> bool {
        article.published_at >= now - Duration::days(RECENCY_WINDOW_DAYS)
    }

    /// Unicode-range denylist heuristic, not real language detection.
    /// Strings shorter than 10 characters after stripping HTML and URLs
    /// are presumed acceptable.
    pub fn looks_english(&self, text: &str) -> bool {
        let stripped = self.strip_markup(text);
        if stripped.chars().count() < 10 {
            return true;
        }
        !self.non_latin.is_match(&stripped)
    }

    fn article_looks_english(&self, article: &Article) -> bool {
        self.looks_english(&article.title)
            && article
                .description
                .as_deref()
                .map(|d| self.looks_english(d))
                .unwrap_or(true)
    }

    /// Title or description contains at least one topical keyword.
    pub fn is_topical(&self, article: &Article) -> bool {
        let title = article.title.to_lowercase();
        let description = article
            .description
            .as_deref()
            .map(|d| d.to_lowercase())
            .unwrap_or_default();

        TOPIC_KEYWORDS
            .iter()
            .any(|k| title.contains(k) || description.contains(k))
    }

    /// Non-empty link of a minimally plausible length.
    pub fn has_plausible_url(&self, article: &Article) -> bool {
        article.url.len() >= MIN_URL_LENGTH
    }

    /// Strip HTML tags and bare URLs before the script check so markup
    /// noise does not trip or mask the heuristic.
    fn strip_markup(&self, text: &str) -> String {
        let without_tags = self.tags.replace_all(text, " ");
        let without_links = self.links.replace_all(&without_tags, " ");
        without_links.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Full filter policy: strict pass first, relaxed fallback when it
    /// comes back too sparse, merged without URL duplicates, capped, and
    /// stable-sorted newest first.
    pub fn apply(&self, articles: &[Article], now: DateTime<Utc>) -> Vec<Article> {
        let mut selected: Vec<Article> = articles
            .iter()
            .filter(|a| self.passes_strict(a, now))
            .cloned()
            .collect();

        debug!("Strict pass kept {} of {} articles", selected.len(), articles.len());

        if selected.len() < MIN_STRICT_RESULTS {
            let mut seen: HashSet<String> = selected.iter().map(|a| a.url.clone()).collect();

            let before = selected.len();
            for article in articles {
                if self.passes_relaxed(article) && seen.insert(article.url.clone()) {
                    selected.push(article.clone());
                }
            }
            selected.truncate(MAX_COMBINED_RESULTS);

            info!(
                "Relaxed fallback pass added {} articles ({} total)",
                selected.len() - before,
                selected.len()
            );
        }

        // Stable sort: ties retain fetch/merge order.
        selected.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        selected
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Host-based denylist check. Unparseable URLs are not treated as
/// blocked; the URL-length rule deals with junk links.
fn on_blocked_domain(article_url: &str) -> bool {
    let Ok(parsed) = Url::parse(article_url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };

    BLOCKED_DOMAINS
        .iter()
        .any(|blocked| host == *blocked || host.ends_with(&format!(".{}", blocked)))
}
