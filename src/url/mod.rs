//! URL handling module for Pin-Harvest
//!
//! This module recognises pin and board URLs, classifies the start URL a
//! crawl is launched with, and resolves pin links found in page markup.

mod domain;
mod matcher;

use crate::HarvestError;
use url::Url;

pub use domain::same_site;
pub use matcher::{is_board_path, is_pin_path};

/// What a crawl was asked to start from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartReference {
    /// A board page; fetched once to seed the frontier with its pins
    Board(Url),
    /// A single pin page; enqueued directly
    Pin(Url),
}

impl StartReference {
    pub fn url(&self) -> &Url {
        match self {
            Self::Board(url) | Self::Pin(url) => url,
        }
    }
}

/// Classifies the start URL of a crawl
///
/// Pins are checked before boards because `/pin/<id>/` also has the
/// two-segment shape of a board path. Query and fragment are dropped from a
/// pin so it is stored under the same key as the links that point to it.
///
/// # Errors
///
/// Returns `HarvestError::UnsupportedStartReference` for anything that is not
/// an HTTP(S) pin or board URL.
///
/// # Examples
///
/// ```
/// use pin_harvest::url::{classify_start_reference, StartReference};
///
/// let start = classify_start_reference("https://de.pinterest.com/pin/123/").unwrap();
/// assert!(matches!(start, StartReference::Pin(_)));
///
/// let start = classify_start_reference("https://de.pinterest.com/user/recipes/").unwrap();
/// assert!(matches!(start, StartReference::Board(_)));
///
/// assert!(classify_start_reference("https://de.pinterest.com/").is_err());
/// ```
pub fn classify_start_reference(raw: &str) -> Result<StartReference, HarvestError> {
    let unsupported = || HarvestError::UnsupportedStartReference {
        url: raw.to_string(),
    };

    let mut url = Url::parse(raw.trim()).map_err(|_| unsupported())?;

    if (url.scheme() != "http" && url.scheme() != "https") || url.host_str().is_none() {
        return Err(unsupported());
    }

    if is_pin_path(url.path()) {
        url.set_query(None);
        url.set_fragment(None);
        canonicalize_pin_path(&mut url);
        return Ok(StartReference::Pin(url));
    }

    if is_board_path(url.path()) {
        return Ok(StartReference::Board(url));
    }

    Err(unsupported())
}

/// Resolves an `href` found on a page into an absolute pin URL
///
/// Relative links are joined onto `base`. The result must stay on the base
/// site, have a pin path, and carry no query string. Fragments are dropped
/// and the path always ends in `/`.
/// Returns `None` for anything else.
pub fn resolve_pin_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let mut resolved = base.join(href).ok()?;

    if !same_site(base, &resolved) || !is_pin_path(resolved.path()) || resolved.query().is_some()
    {
        return None;
    }

    resolved.set_fragment(None);
    canonicalize_pin_path(&mut resolved);
    Some(resolved)
}

/// `/pin/<id>` and `/pin/<id>/` are the same page; store the slashed form
fn canonicalize_pin_path(url: &mut Url) {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
}
