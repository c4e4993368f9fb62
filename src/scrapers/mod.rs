//! News source scrapers for fetching front-page headlines.
//!
//! Every site is a [`Source`]: it knows its own metadata and how to produce a
//! [`SourceResult`]. The sites in this module share one implementation,
//! [`SiteSource`], which fetches the configured URL through the shared
//! [`Fetcher`] and hands the parsed document to a per-site [`Extract`]
//! strategy. Adding a site means adding an `Extract` impl and a [`Site`]
//! variant; the fetcher and the aggregator stay untouched.
//!
//! # Supported Sources
//!
//! | Source | Module | Matched elements |
//! |--------|--------|------------------|
//! | Prothom Alo | [`prothomalo`] | `h3.headline-title > a > span` |
//! | Manab Zamin | [`mzamin`] | `h1.display-3`, every `h3` |
//! | Daily Star Bangla | [`dailystar_bangla`] | `.card-content > h3.title > a` inside front-page panels |
//!
//! # Failure Modes
//!
//! - Transport failure from the fetcher: [`Error::FetchFailed`]
//! - Body is binary rather than markup text: [`Error::ParseFailed`]
//! - Stray invalid UTF-8 bytes: replaced with U+FFFD, extraction carries on
//! - Markup of the wrong shape: not an error, just zero items

pub mod dailystar_bangla;
pub mod mzamin;
pub mod prothomalo;

use crate::error::{Error, Result};
use crate::fetcher::Fetcher;
use crate::models::{HeadlineItem, SourceMetadata, SourceResult};
use crate::utils::truncate_for_log;
use async_trait::async_trait;
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Leading bytes inspected when deciding whether a body is markup at all.
const BINARY_SNIFF_LEN: usize = 1024;

/// A news site that can be asked for its current headlines.
#[async_trait]
pub trait Source: Send + Sync {
    /// Static name, logo, and homepage of the site.
    fn metadata(&self) -> SourceMetadata;

    /// Fetch the site and extract its headlines.
    ///
    /// Zero matches is a successful, empty result.
    async fn fetch_headlines(&self) -> Result<SourceResult>;
}

/// Per-site extraction rule applied to a parsed document.
pub trait Extract: Send + Sync {
    fn metadata(&self) -> SourceMetadata;

    /// Pull headlines out of `document` in document order, resolving links
    /// against `base_url`.
    fn extract(&self, document: &Html, base_url: &str) -> Vec<HeadlineItem>;
}

/// A [`Source`] that fetches one URL and applies an [`Extract`] rule to it.
pub struct SiteSource<E> {
    url: String,
    fetcher: Arc<Fetcher>,
    extractor: E,
}

impl<E: Extract> SiteSource<E> {
    pub fn new(url: impl Into<String>, fetcher: Arc<Fetcher>, extractor: E) -> Self {
        Self {
            url: url.into(),
            fetcher,
            extractor,
        }
    }

    /// Decode and parse `body`, then run the extraction rule.
    ///
    /// Kept synchronous so the parsed document never lives across an await.
    fn extract_items(&self, body: &[u8]) -> Result<Vec<HeadlineItem>> {
        if let Some(offset) = body.iter().take(BINARY_SNIFF_LEN).position(|&b| b == 0) {
            return Err(Error::ParseFailed {
                source_name: self.extractor.metadata().name,
                reason: format!("binary body (NUL byte at offset {offset})"),
            });
        }

        let text = String::from_utf8_lossy(body);
        if matches!(text, Cow::Owned(_)) {
            debug!(url = %self.url, "Replaced invalid UTF-8 in body");
        }
        let document = Html::parse_document(&text);
        let items = self.extractor.extract(&document, &self.url);

        if items.is_empty() {
            warn!(
                url = %self.url,
                preview = %truncate_for_log(&text, 200),
                "No headlines matched"
            );
        }
        Ok(items)
    }
}

impl<E> fmt::Debug for SiteSource<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteSource")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<E: Extract> Source for SiteSource<E> {
    fn metadata(&self) -> SourceMetadata {
        self.extractor.metadata()
    }

    #[instrument(level = "info", skip_all, fields(url = %self.url))]
    async fn fetch_headlines(&self) -> Result<SourceResult> {
        let body = self.fetcher.fetch(&self.url).await?;
        let items = self.extract_items(&body)?;
        let metadata = self.metadata();

        info!(source = %metadata.name, count = items.len(), "Extracted headlines");
        Ok(SourceResult { metadata, items })
    }
}

/// The sites this crate knows how to scrape, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Site {
    #[serde(alias = "prothom-alo")]
    Prothomalo,
    Mzamin,
    DailystarBangla,
}

impl Site {
    /// Build the [`Source`] for this site scraping `url`.
    pub fn build(self, url: &str, fetcher: Arc<Fetcher>) -> Arc<dyn Source> {
        match self {
            Site::Prothomalo => Arc::new(SiteSource::new(url, fetcher, prothomalo::ProthomAlo)),
            Site::Mzamin => Arc::new(SiteSource::new(url, fetcher, mzamin::MZamin)),
            Site::DailystarBangla => Arc::new(SiteSource::new(
                url,
                fetcher,
                dailystar_bangla::DailyStarBangla,
            )),
        }
    }
}

/// Direct element children of `element`, skipping text and comments.
pub(crate) fn child_elements<'a>(
    element: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.children().filter_map(ElementRef::wrap)
}

/// First direct child element with the given tag name.
pub(crate) fn first_child<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    child_elements(element).find(|child| child.value().name() == tag)
}

/// All descendant text of `element`, trimmed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
