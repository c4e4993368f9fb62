//! The Daily Star (Bangla edition) front-page scraper.
//!
//! Only the top-story and category-news panels of
//! [bangla.thedailystar.net](https://bangla.thedailystar.net) are scraped.
//! Inside them each story is a card:
//!
//! ```html
//! <div class="card-content">
//!   <h3 class="title"><a href="/news/bangladesh/1">শিরোনাম</a></h3>
//! </div>
//! ```

use super::{Extract, child_elements, element_text, first_child};
use crate::models::{HeadlineItem, SourceMetadata};
use crate::utils::complete_url;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static SECTION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(concat!(
        r#"div[class*="panel-pane pane-home-top-v7 no-title block"], "#,
        r#"div[class*="panel-pane pane-category-news no-title block"]"#,
    ))
    .unwrap()
});

static CARD: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"div[class*="card-content"]"#).unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct DailyStarBangla;

impl Extract for DailyStarBangla {
    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Daily Star Bangla".to_string(),
            logo_url: "https://bangla.thedailystar.net/sites/all/themes/sloth/logo-bn.png"
                .to_string(),
            homepage_url: "https://bangla.thedailystar.net/".to_string(),
        }
    }

    fn extract(&self, document: &Html, base_url: &str) -> Vec<HeadlineItem> {
        let mut items = Vec::new();
        for section in document.select(&SECTION) {
            for card in section.select(&CARD) {
                if let Some((title, href)) = card_headline(card) {
                    items.push(HeadlineItem::new(title, complete_url(base_url, &href)));
                }
            }
        }
        items
    }
}

/// The first `h3.title` of a card and the first link inside it.
fn card_headline(card: ElementRef<'_>) -> Option<(String, String)> {
    let heading = child_elements(card).find(|child| {
        child.value().name() == "h3" && child.value().attr("class") == Some("title")
    })?;
    let link = first_child(heading, "a")?;

    let title = element_text(link);
    let href = link.value().attr("href").unwrap_or_default();
    if title.is_empty() || href.is_empty() {
        return None;
    }
    Some((title, href.to_string()))
}
