use regex::Regex;
use std::sync::OnceLock;

fn pin_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/pin/\d+/?$").expect("pin path pattern is valid"))
}

fn board_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/[^/]+/.+").expect("board path pattern is valid"))
}

/// Checks if a URL path names a single pin
///
/// Matches `/pin/<digits>` with an optional trailing slash and nothing else.
///
/// # Examples
///
/// ```
/// use pin_harvest::url::is_pin_path;
///
/// assert!(is_pin_path("/pin/123/"));
/// assert!(is_pin_path("/pin/123"));
/// assert!(!is_pin_path("/pin/abc/"));
/// assert!(!is_pin_path("/pin/123/comments/"));
/// ```
pub fn is_pin_path(path: &str) -> bool {
    pin_path_pattern().is_match(path)
}

/// Checks if a URL path has the `/<segment>/<segment...>` shape of a board
///
/// A pin path also has this shape, so callers test for pins first.
pub fn is_board_path(path: &str) -> bool {
    board_path_pattern().is_match(path)
}
