//! Data models for scraped headlines and their aggregated representation.
//!
//! This module defines the core data structures used throughout the application:
//! - [`HeadlineItem`]: A single headline extracted from a news site
//! - [`SourceMetadata`]: Static name, logo, and homepage of a news site
//! - [`SourceResult`]: One site's metadata together with its headlines
//! - [`AggregateResult`]: One [`SourceResult`] per configured source, in order
//!
//! Field names follow Rust conventions; serde renames map them onto the
//! JSON wire format served at `/api/headlines`:
//!
//! ```json
//! [{ "source": { "name": "...", "logo": "...", "homepage": "..." },
//!    "headlines": [{ "title": "...", "url": "..." }] }]
//! ```

use serde::{Deserialize, Serialize};

/// A single headline scraped from a news site.
///
/// Produced once by a scraper and never mutated afterwards. The title is
/// whitespace-trimmed and the URL has been absolutized against the site's
/// base URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeadlineItem {
    /// The headline text.
    pub title: String,
    /// Absolute link to the article.
    pub url: String,
}

impl HeadlineItem {
    /// Build an item, trimming surrounding whitespace from the title.
    pub fn new(title: impl AsRef<str>, url: impl Into<String>) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            url: url.into(),
        }
    }
}

/// Static description of a news site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceMetadata {
    /// Display name of the site.
    pub name: String,
    /// URL of the site's logo image.
    #[serde(rename = "logo")]
    pub logo_url: String,
    /// URL of the site's front page.
    #[serde(rename = "homepage")]
    pub homepage_url: String,
}

/// Headlines scraped from one source.
///
/// `items` preserves document order and does not suppress duplicates. An
/// empty `items` list is also how a failed source is reported.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceResult {
    #[serde(rename = "source")]
    pub metadata: SourceMetadata,
    #[serde(rename = "headlines")]
    pub items: Vec<HeadlineItem>,
}

impl SourceResult {
    /// A result carrying only the source's metadata, used in place of a failed source.
    pub fn placeholder(metadata: SourceMetadata) -> Self {
        Self {
            metadata,
            items: Vec::new(),
        }
    }
}

/// One [`SourceResult`] per configured source, in configuration order.
pub type AggregateResult = Vec<SourceResult>;
