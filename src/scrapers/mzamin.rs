//! Manab Zamin front-page scraper.
//!
//! [mzamin.com](https://mzamin.com) marks its lead story with
//! `h1.display-3` and every other story with a plain `h3`. Both are matched
//! in document order.

use super::{Extract, child_elements, element_text};
use crate::models::{HeadlineItem, SourceMetadata};
use crate::utils::complete_url;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static HEADLINE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"h1[class="display-3"], h3"#).unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct MZamin;

impl Extract for MZamin {
    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "মানবজমিন".to_string(),
            logo_url: "https://mzamin.com/assets/images/logo.png".to_string(),
            homepage_url: "https://mzamin.com/".to_string(),
        }
    }

    fn extract(&self, document: &Html, base_url: &str) -> Vec<HeadlineItem> {
        document
            .select(&HEADLINE)
            .filter_map(|heading| {
                let (title, href) = title_and_href(heading);
                let url = complete_url(base_url, &href);
                (!title.is_empty() && !url.is_empty()).then(|| HeadlineItem::new(title, url))
            })
            .collect()
    }
}

/// Walk the heading's direct children.
///
/// `span` text accumulates into the title until the first link, whose own
/// text then replaces it.
fn title_and_href(heading: ElementRef<'_>) -> (String, String) {
    let mut title = String::new();
    let mut href = String::new();

    for child in child_elements(heading) {
        match child.value().name() {
            "a" => {
                href = child.value().attr("href").unwrap_or_default().to_string();
                title = element_text(child);
                break;
            }
            "span" => {
                let text = element_text(child);
                if !text.is_empty() {
                    title.push_str(&text);
                    title.push(' ');
                }
            }
            _ => {}
        }
    }

    (title, href)
}
