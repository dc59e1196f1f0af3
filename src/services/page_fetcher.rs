use std::time::Duration;

use itertools::Itertools;
use scraper::{Html, Node};

use crate::error::{CrawlError, ExtractionError};

use super::BrowserSession;

const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

pub async fn fetch_profile_text<S: BrowserSession + ?Sized>(
    session: &mut S,
    url: &str,
    settle_delay: Duration,
) -> Result<String, CrawlError> {
    session.goto(url).await?;
    tokio::time::sleep(settle_delay).await;

    let page_source = session.page_source().await?;
    let text = visible_text(&page_source);
    if text.is_empty() {
        return Err(ExtractionError::EmptyPage.into());
    }

    log::info!("Fetched {} bytes of text from {}", text.len(), url);
    Ok(text)
}

/// Text content of the document outside scripts and styles, with every
/// whitespace run collapsed to one space.
pub fn visible_text(page_source: &str) -> String {
    let document = Html::parse_document(page_source);

    document
        .root_element()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let hidden = node
                    .parent()
                    .and_then(|parent| parent.value().as_element())
                    .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()));
                (!hidden).then_some(&**text)
            }
            _ => None,
        })
        .flat_map(str::split_whitespace)
        .join(" ")
}
