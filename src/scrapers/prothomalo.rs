//! Prothom Alo front-page scraper.
//!
//! Headlines on [prothomalo.com](https://www.prothomalo.com) are `h3`
//! elements carrying a `headline-title` class. The first link inside the
//! heading points at the article and wraps the headline text in a `span`:
//!
//! ```html
//! <h3 class="headline-title _1d6-d">
//!   <a href="/bangladesh/abc123"><span>শিরোনাম</span></a>
//! </h3>
//! ```

use super::{Extract, element_text, first_child};
use crate::models::{HeadlineItem, SourceMetadata};
use crate::utils::complete_url;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static HEADLINE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"h3[class*="headline-title"]"#).unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct ProthomAlo;

impl Extract for ProthomAlo {
    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "ProthomAlo".to_string(),
            logo_url: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcSUTX3amtUek4Ia80_rbqUkfwS6sYaeSUdqwg&s".to_string(),
            homepage_url: "https://www.prothomalo.com".to_string(),
        }
    }

    fn extract(&self, document: &Html, base_url: &str) -> Vec<HeadlineItem> {
        document
            .select(&HEADLINE)
            .filter_map(title_and_href)
            .map(|(title, href)| HeadlineItem::new(title, complete_url(base_url, &href)))
            .collect()
    }
}

/// Title from the first link's `span`, href from the first link.
fn title_and_href(heading: ElementRef<'_>) -> Option<(String, String)> {
    let link = first_child(heading, "a")?;
    let href = link.value().attr("href").unwrap_or_default();
    let title = first_child(link, "span")
        .map(element_text)
        .unwrap_or_default();

    if title.is_empty() || href.is_empty() {
        return None;
    }
    Some((title, href.to_string()))
}
