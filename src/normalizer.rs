//! Maps heterogeneous feed entries into the canonical [`Article`] shape.
//!
//! Pure data transformation: no network, no clock reads. The reference
//! time for the missing-date default is passed in by the caller.

use crate::registry::FeedSource;
use crate::types::Article;
use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use regex::Regex;

/// Pulls the first image reference out of embedded HTML.
///
/// Kept behind a trait so the regex scan can be swapped for a real HTML
/// parser without touching the normalizer's contract.
pub trait ImageExtractor: Send + Sync {
    fn first_image(&self, html: &str) -> Option<String>;
}

/// First `<img src>` match wins, else nothing.
pub struct RegexImageExtractor {
    img_re: Regex,
}

impl RegexImageExtractor {
    pub fn new() -> Self {
        Self {
            img_re: Regex::new(r#"<img[^>]+src=["']([^"']+)["']"#)
                .expect("invalid img regex"),
        }
    }
}

impl Default for RegexImageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageExtractor for RegexImageExtractor {
    fn first_image(&self, html: &str) -> Option<String> {
        self.img_re
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

pub struct Normalizer {
    images: Box<dyn ImageExtractor>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            images: Box::new(RegexImageExtractor::new()),
        }
    }

    pub fn with_extractor(images: Box<dyn ImageExtractor>) -> Self {
        Self { images }
    }

    /// Convert one feed entry into an [`Article`].
    ///
    /// Every field has a fallback chain; missing data never turns into
    /// an error here. Items without a usable link get an empty `url` and
    /// are dropped later by the filter's URL-sanity rule.
    pub fn normalize(&self, source: &FeedSource, entry: &Entry, now: DateTime<Utc>) -> Article {
        let title = entry
            .title
            .as_ref()
            .map(|t| t.content.clone())
            .unwrap_or_else(|| "Untitled".to_string());

        let url = entry
            .links
            .iter()
            .find(|l| l.rel.as_deref() == Some("alternate"))
            .or_else(|| entry.links.first())
            .map(|l| l.href.clone())
            .unwrap_or_default();

        let author = entry.authors.first().map(|p| p.name.clone());

        let content = entry.content.as_ref().and_then(|c| c.body.clone());

        let description = entry
            .summary
            .as_ref()
            .map(|s| s.content.clone())
            .or_else(|| content.clone());

        let published_at = entry.published.or(entry.updated).unwrap_or(now);

        let image_url = self.extract_image(entry);

        Article {
            source_id: source.name.clone(),
            source_name: source.name.clone(),
            author,
            title,
            description,
            url,
            image_url,
            published_at,
            content,
        }
    }

    /// Image fallback chain, first valid candidate wins:
    /// enclosure/media content URL, then media thumbnail, then the first
    /// `<img>` inside the entry's embedded HTML.
    fn extract_image(&self, entry: &Entry) -> Option<String> {
        self.image_candidates(entry)
            .into_iter()
            .find_map(|candidate| normalize_image_url(&candidate))
    }

    fn image_candidates(&self, entry: &Entry) -> Vec<String> {
        let mut candidates = Vec::new();

        // Enclosures and media:content both land in `media` after parsing.
        // The declared media type is not consulted; the URL prefix rule
        // is the only acceptance criterion for candidates.
        for media in &entry.media {
            for content in &media.content {
                if let Some(url) = &content.url {
                    candidates.push(url.to_string());
                }
            }
        }

        for media in &entry.media {
            for thumbnail in &media.thumbnails {
                candidates.push(thumbnail.image.uri.clone());
            }
        }

        // The regex scan is scoped to the encoded/content HTML; plain
        // description text is never scanned.
        if let Some(html) = entry.content.as_ref().and_then(|c| c.body.as_deref()) {
            if let Some(url) = self.images.first_image(html) {
                candidates.push(url);
            }
        }

        candidates
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts a candidate image URL only if it is non-empty, not a stringly
/// null, and carries an http/https/data-image prefix. Applied uniformly
/// no matter which fallback stage produced the candidate.
pub fn normalize_image_url(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim();

    if trimmed.is_empty() || trimmed == "null" || trimmed == "undefined" {
        return None;
    }

    if trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
        || trimmed.starts_with("data:image")
    {
        Some(trimmed.to_string())
    } else {
        None
    }
}
