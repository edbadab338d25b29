//! HTML link classification for board and pin pages
//!
//! This module extracts the two kinds of link the crawler cares about:
//! - Pin links in the pin grid of a board page
//! - On a pin page, the primary image (`og:image`) and links to other pins
//!
//! Everything returned is absolute and de-duplicated in document order.
//! Markup that does not parse cleanly yields fewer links, never an error.

use crate::url::resolve_pin_link;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// A link found on a pin page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PinLink {
    /// The pin's primary image
    Asset(String),
    /// Another pin linked from this one
    Recommendation(String),
}

impl PinLink {
    pub fn url(&self) -> &str {
        match self {
            Self::Asset(url) | Self::Recommendation(url) => url,
        }
    }
}

/// Extracts pin and asset links from fetched markup
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    base: Url,
}

impl LinkClassifier {
    /// Creates a classifier that resolves relative links against `base`
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Extracts the pin URLs shown in a board's pin grid
    ///
    /// Only anchors inside `div[data-test-id="pin"]` containers count; links
    /// in the page chrome are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use pin_harvest::crawler::LinkClassifier;
    /// use url::Url;
    ///
    /// let classifier = LinkClassifier::new(Url::parse("https://de.pinterest.com").unwrap());
    /// let html = r#"<div data-test-id="pin"><a href="/pin/7/">x</a></div>"#;
    /// assert_eq!(classifier.board_links(html), vec!["https://de.pinterest.com/pin/7/"]);
    /// ```
    pub fn board_links(&self, markup: &str) -> Vec<String> {
        let document = Html::parse_document(markup);
        let mut links = Vec::new();
        let mut seen = HashSet::new();

        if let Ok(selector) = Selector::parse(r#"div[data-test-id="pin"] a[href]"#) {
            for element in document.select(&selector) {
                let Some(href) = element.value().attr("href") else {
                    continue;
                };
                if let Some(pin_url) = resolve_pin_link(&self.base, href) {
                    let pin_url = pin_url.to_string();
                    if seen.insert(pin_url.clone()) {
                        links.push(pin_url);
                    }
                }
            }
        }

        links
    }

    /// Extracts the asset and recommendation links of a pin page
    ///
    /// At most one `Asset` is returned, always first: the first
    /// `og:image` meta tag with non-empty content. Every same-site pin link
    /// on the page follows as a `Recommendation`.
    pub fn pin_links(&self, markup: &str) -> Vec<PinLink> {
        let document = Html::parse_document(markup);
        let mut links = Vec::new();

        if let Some(asset) = self.extract_asset(&document) {
            links.push(PinLink::Asset(asset));
        }

        let mut seen = HashSet::new();

        if let Ok(selector) = Selector::parse("a[href]") {
            for element in document.select(&selector) {
                let Some(href) = element.value().attr("href") else {
                    continue;
                };
                if let Some(rec_url) = resolve_pin_link(&self.base, href) {
                    let rec_url = rec_url.to_string();
                    if seen.insert(rec_url.clone()) {
                        links.push(PinLink::Recommendation(rec_url));
                    }
                }
            }
        }

        links
    }

    fn extract_asset(&self, document: &Html) -> Option<String> {
        let selector = Selector::parse(r#"meta[property="og:image"]"#).ok()?;

        document
            .select(&selector)
            .filter_map(|element| element.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty())
            .and_then(|content| self.base.join(content).ok())
            .filter(|url| url.scheme() == "http" || url.scheme() == "https")
            .map(|url| url.to_string())
    }
}
