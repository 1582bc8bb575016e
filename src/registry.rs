//! Feed source registry: the only configuration the pipeline depends on.
//!
//! The registry is plain immutable data passed into the aggregator at
//! construction time, so tests can substitute a small fixed set instead
//! of hitting real feeds.

/// One external publisher's RSS/Atom endpoint.
#[derive(Debug, Clone)]
pub struct FeedSource {
    /// Human-readable name, unique within a registry.
    pub name: String,
    pub feed_url: String,
    /// Logo asset path resolved by the consuming UI.
    pub logo: String,
}

impl FeedSource {
    pub fn new(name: &str, feed_url: &str, logo: &str) -> Self {
        Self {
            name: name.to_string(),
            feed_url: feed_url.to_string(),
            logo: logo.to_string(),
        }
    }
}

pub const DEFAULT_LOGO: &str = "/logos/default.png";

#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<FeedSource>,
}

impl SourceRegistry {
    pub fn new(sources: Vec<FeedSource>) -> Self {
        Self { sources }
    }

    /// The production source list: AI/ML and social-media publishers.
    pub fn default_sources() -> Self {
        Self::new(vec![
            FeedSource::new(
                "TechCrunch AI",
                "https://techcrunch.com/category/artificial-intelligence/feed/",
                "/logos/techcrunch.png",
            ),
            FeedSource::new(
                "VentureBeat",
                "https://venturebeat.com/category/ai/feed/",
                "/logos/venturebeat.png",
            ),
            FeedSource::new(
                "The Verge",
                "https://www.theverge.com/rss/index.xml",
                "/logos/theverge.png",
            ),
            FeedSource::new(
                "Wired",
                "https://www.wired.com/feed/tag/ai/latest/rss",
                "/logos/wired.png",
            ),
            FeedSource::new(
                "MIT Technology Review",
                "https://www.technologyreview.com/feed/",
                "/logos/mit-tech-review.png",
            ),
            FeedSource::new(
                "Ars Technica",
                "https://feeds.arstechnica.com/arstechnica/technology-lab",
                "/logos/ars-technica.png",
            ),
            FeedSource::new(
                "Engadget",
                "https://www.engadget.com/rss.xml",
                "/logos/engadget.png",
            ),
            FeedSource::new(
                "ZDNet AI",
                "https://www.zdnet.com/topic/artificial-intelligence/rss.xml",
                "/logos/zdnet.png",
            ),
            FeedSource::new(
                "Mashable",
                "https://mashable.com/feeds/rss/all",
                "/logos/mashable.png",
            ),
            FeedSource::new(
                "The Next Web",
                "https://thenextweb.com/feed",
                "/logos/tnw.png",
            ),
            FeedSource::new(
                "AI News",
                "https://www.artificialintelligence-news.com/feed/",
                "/logos/ai-news.png",
            ),
            FeedSource::new(
                "MarkTechPost",
                "https://www.marktechpost.com/feed/",
                "/logos/marktechpost.png",
            ),
            FeedSource::new(
                "Machine Learning Mastery",
                "https://machinelearningmastery.com/feed/",
                "/logos/ml-mastery.png",
            ),
            FeedSource::new(
                "Google AI Blog",
                "https://blog.google/technology/ai/rss/",
                "/logos/google-ai.png",
            ),
            FeedSource::new(
                "OpenAI Blog",
                "https://openai.com/blog/rss.xml",
                "/logos/openai.png",
            ),
            FeedSource::new(
                "Hugging Face Blog",
                "https://huggingface.co/blog/feed.xml",
                "/logos/huggingface.png",
            ),
            FeedSource::new(
                "Towards Data Science",
                "https://towardsdatascience.com/feed",
                "/logos/tds.png",
            ),
            FeedSource::new(
                "Social Media Today",
                "https://www.socialmediatoday.com/feeds/news/",
                "/logos/smt.png",
            ),
            FeedSource::new(
                "Later Blog",
                "https://later.com/blog/feed/",
                "/logos/later.png",
            ),
            FeedSource::new(
                "Tubefilter",
                "https://www.tubefilter.com/feed/",
                "/logos/tubefilter.png",
            ),
        ])
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Scoped lookup for the single-source query mode.
    pub fn get(&self, name: &str) -> Option<&FeedSource> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Logo asset for a source name; unknown names fall back to the
    /// default asset.
    pub fn logo_for(&self, name: &str) -> &str {
        self.get(name).map(|s| s.logo.as_str()).unwrap_or(DEFAULT_LOGO)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::default_sources()
    }
}
