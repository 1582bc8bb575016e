use chrono::{DateTime, TimeZone, Utc};
use newswire::normalizer::{normalize_image_url, Normalizer};
use newswire::registry::FeedSource;

fn fetch_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

fn test_source() -> FeedSource {
    FeedSource::new("TestFeed", "https://example.com/feed.xml", "/logos/test.png")
}

fn parse_first_entry(xml: &str) -> feed_rs::model::Entry {
    let feed = feed_rs::parser::parse(xml.as_bytes()).expect("fixture should parse");
    feed.entries.into_iter().next().expect("fixture should have one entry")
}

const FULL_ITEM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>Test Feed</title>
    <link>https://example.com/</link>
    <item>
      <title>New Transformer Model Breaks Records</title>
      <link>https://example.com/articles/transformer</link>
      <dc:creator>Jordan Avery</dc:creator>
      <description>A new neural network architecture sets benchmarks</description>
      <content:encoded><![CDATA[<p>Full write-up with an <img src="https://example.com/inline.jpg"> illustration.</p>]]></content:encoded>
      <pubDate>Thu, 12 Jun 2025 09:00:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

const BARE_ITEM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <link>https://example.com/</link>
    <item>
      <description>An item with nothing else filled in</description>
    </item>
  </channel>
</rss>"#;

const ENCLOSURE_AND_INLINE_IMG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Test Feed</title>
    <link>https://example.com/</link>
    <item>
      <title>Machine learning digest</title>
      <link>https://example.com/articles/digest</link>
      <enclosure url="https://example.com/enclosure.jpg" type="image/jpeg" length="1024"/>
      <content:encoded><![CDATA[<img src="https://example.com/inline.jpg">]]></content:encoded>
      <pubDate>Thu, 12 Jun 2025 09:00:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

const AUDIO_ENCLOSURE_AND_INLINE_IMG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Test Feed</title>
    <link>https://example.com/</link>
    <item>
      <title>Machine learning digest</title>
      <link>https://example.com/articles/digest</link>
      <enclosure url="https://example.com/episode.mp3" type="audio/mpeg" length="4096"/>
      <content:encoded><![CDATA[<img src="https://example.com/inline.jpg">]]></content:encoded>
      <pubDate>Thu, 12 Jun 2025 09:00:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

const IMG_IN_DESCRIPTION_ONLY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <link>https://example.com/</link>
    <item>
      <title>Machine learning digest</title>
      <link>https://example.com/articles/digest</link>
      <description><![CDATA[Teaser with an <img src="https://example.com/teaser.jpg"> inline.]]></description>
      <pubDate>Thu, 12 Jun 2025 09:00:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

const SCRIPT_IMG_ONLY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Test Feed</title>
    <link>https://example.com/</link>
    <item>
      <title>Machine learning digest</title>
      <link>https://example.com/articles/digest</link>
      <content:encoded><![CDATA[<img src="javascript:alert(1)">]]></content:encoded>
      <pubDate>Thu, 12 Jun 2025 09:00:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

const DATA_IMAGE_ITEM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Test Feed</title>
    <link>https://example.com/</link>
    <item>
      <title>Machine learning digest</title>
      <link>https://example.com/articles/digest</link>
      <content:encoded><![CDATA[<img src="data:image/png;base64,iVBORw0KGgo=">]]></content:encoded>
      <pubDate>Thu, 12 Jun 2025 09:00:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

const ATOM_UPDATED_ONLY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Test</title>
  <id>https://example.com/atom</id>
  <updated>2025-06-13T08:30:00Z</updated>
  <entry>
    <title>GPT evaluation notes</title>
    <link href="https://example.com/articles/eval"/>
    <id>https://example.com/articles/eval</id>
    <updated>2025-06-13T08:30:00Z</updated>
    <summary>Notes on large language model benchmarks</summary>
  </entry>
</feed>"#;

#[test]
fn maps_all_fields_with_source_identity() {
    let normalizer = Normalizer::new();
    let entry = parse_first_entry(FULL_ITEM);

    let article = normalizer.normalize(&test_source(), &entry, fetch_time());

    assert_eq!(article.source_id, "TestFeed");
    assert_eq!(article.source_name, "TestFeed");
    assert_eq!(article.title, "New Transformer Model Breaks Records");
    assert_eq!(article.url, "https://example.com/articles/transformer");
    assert_eq!(article.author.as_deref(), Some("Jordan Avery"));
    assert_eq!(
        article.description.as_deref(),
        Some("A new neural network architecture sets benchmarks")
    );
    assert!(article.content.as_deref().unwrap_or_default().contains("Full write-up"));
    assert_eq!(
        article.published_at,
        Utc.with_ymd_and_hms(2025, 6, 12, 9, 0, 0).unwrap()
    );
}

#[test]
fn normalization_is_idempotent() {
    let normalizer = Normalizer::new();
    let entry = parse_first_entry(FULL_ITEM);
    let now = fetch_time();

    let first = normalizer.normalize(&test_source(), &entry, now);
    let second = normalizer.normalize(&test_source(), &entry, now);

    assert_eq!(first, second);
}

#[test]
fn missing_fields_get_defaults() {
    let normalizer = Normalizer::new();
    let entry = parse_first_entry(BARE_ITEM);

    let article = normalizer.normalize(&test_source(), &entry, fetch_time());

    assert_eq!(article.title, "Untitled");
    assert_eq!(article.url, "");
    assert_eq!(article.author, None);
    // Missing dates default to the injected fetch time.
    assert_eq!(article.published_at, fetch_time());
}

#[test]
fn atom_updated_serves_as_the_publish_date() {
    let normalizer = Normalizer::new();
    let entry = parse_first_entry(ATOM_UPDATED_ONLY);

    let article = normalizer.normalize(&test_source(), &entry, fetch_time());

    assert_eq!(
        article.published_at,
        Utc.with_ymd_and_hms(2025, 6, 13, 8, 30, 0).unwrap()
    );
}

#[test]
fn enclosure_wins_over_embedded_img() {
    let normalizer = Normalizer::new();
    let entry = parse_first_entry(ENCLOSURE_AND_INLINE_IMG);

    let article = normalizer.normalize(&test_source(), &entry, fetch_time());

    assert_eq!(article.image_url.as_deref(), Some("https://example.com/enclosure.jpg"));
}

#[test]
fn enclosure_wins_regardless_of_declared_media_type() {
    let normalizer = Normalizer::new();
    let entry = parse_first_entry(AUDIO_ENCLOSURE_AND_INLINE_IMG);

    let article = normalizer.normalize(&test_source(), &entry, fetch_time());

    // The enclosure stage does not inspect the declared type; the URL
    // prefix rule is the only acceptance criterion.
    assert_eq!(article.image_url.as_deref(), Some("https://example.com/episode.mp3"));
}

#[test]
fn description_html_is_not_scanned_for_images() {
    let normalizer = Normalizer::new();
    let entry = parse_first_entry(IMG_IN_DESCRIPTION_ONLY);

    let article = normalizer.normalize(&test_source(), &entry, fetch_time());

    assert_eq!(article.image_url, None);
}

#[test]
fn embedded_img_is_the_fallback() {
    let normalizer = Normalizer::new();
    let entry = parse_first_entry(FULL_ITEM);

    let article = normalizer.normalize(&test_source(), &entry, fetch_time());

    assert_eq!(article.image_url.as_deref(), Some("https://example.com/inline.jpg"));
}

#[test]
fn script_scheme_images_are_rejected() {
    let normalizer = Normalizer::new();
    let entry = parse_first_entry(SCRIPT_IMG_ONLY);

    let article = normalizer.normalize(&test_source(), &entry, fetch_time());

    assert_eq!(article.image_url, None);
}

#[test]
fn data_image_urls_are_accepted() {
    let normalizer = Normalizer::new();
    let entry = parse_first_entry(DATA_IMAGE_ITEM);

    let article = normalizer.normalize(&test_source(), &entry, fetch_time());

    assert_eq!(
        article.image_url.as_deref(),
        Some("data:image/png;base64,iVBORw0KGgo=")
    );
}

#[test]
fn image_url_validation_rules() {
    assert_eq!(normalize_image_url(""), None);
    assert_eq!(normalize_image_url("null"), None);
    assert_eq!(normalize_image_url("undefined"), None);
    assert_eq!(normalize_image_url("ftp://example.com/a.jpg"), None);
    assert_eq!(normalize_image_url("//example.com/a.jpg"), None);
    assert_eq!(
        normalize_image_url("https://example.com/a.jpg").as_deref(),
        Some("https://example.com/a.jpg")
    );
    assert_eq!(
        normalize_image_url("http://example.com/a.jpg").as_deref(),
        Some("http://example.com/a.jpg")
    );
    assert!(normalize_image_url("data:image/gif;base64,R0lGOD=").is_some());
}
