//! Netscape cookie file loading
//!
//! Browser extensions export session cookies as `cookies.txt`: one cookie per
//! line, seven tab-separated fields
//! (`domain  flag  path  secure  expiry  name  value`). Comment lines start
//! with `#` and blank lines are ignored. The loaded cookies are attached to
//! every request the fetcher makes.

use crate::CookieError;
use reqwest::cookie::Jar;
use std::path::Path;
use url::Url;

/// One parsed line of a Netscape cookie file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieLine {
    pub domain: String,
    pub include_subdomains: bool,
    pub path: String,
    pub secure: bool,
    pub expires: String,
    pub name: String,
    pub value: String,
}

impl CookieLine {
    /// Domain without the leading dot used for subdomain cookies
    pub fn host(&self) -> &str {
        self.domain.trim_start_matches('.')
    }

    /// `Set-Cookie` style representation understood by `Jar::add_cookie_str`
    fn to_cookie_string(&self) -> String {
        let mut cookie = format!(
            "{}={}; Domain={}; Path={}",
            self.name,
            self.value,
            self.host(),
            self.path
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    fn origin(&self) -> Option<Url> {
        Url::parse(&format!("https://{}{}", self.host(), self.path)).ok()
    }
}

/// Parses the contents of a Netscape cookie file
///
/// # Errors
///
/// Returns `CookieError::MalformedLine` for the first non-comment line that
/// does not have exactly seven fields. There is no partial load.
pub fn parse_netscape_cookies(content: &str) -> Result<Vec<CookieLine>, CookieError> {
    let mut cookies = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let [domain, flag, path, secure, expires, name, value] = fields.as_slice() else {
            return Err(CookieError::MalformedLine {
                line_number: index + 1,
                fields: fields.len(),
            });
        };

        cookies.push(CookieLine {
            domain: domain.trim().to_string(),
            include_subdomains: flag.eq_ignore_ascii_case("TRUE"),
            path: path.trim().to_string(),
            secure: secure.eq_ignore_ascii_case("TRUE"),
            expires: expires.trim().to_string(),
            name: name.trim().to_string(),
            value: value.to_string(),
        });
    }

    Ok(cookies)
}

/// Adds parsed cookies to a cookie jar
///
/// Returns the number of cookies added. Lines whose domain cannot form a URL
/// are skipped with a warning.
pub fn load_cookies_into_jar(cookies: &[CookieLine], jar: &Jar) -> usize {
    let mut added = 0;

    for cookie in cookies {
        match cookie.origin() {
            Some(origin) => {
                jar.add_cookie_str(&cookie.to_cookie_string(), &origin);
                added += 1;
            }
            None => {
                tracing::warn!(
                    "Skipping cookie {} with unusable domain {:?}",
                    cookie.name,
                    cookie.domain
                );
            }
        }
    }

    added
}

/// Reads a cookie file and builds a jar from it
///
/// # Errors
///
/// * `CookieError::Io` - The file could not be read
/// * `CookieError::MalformedLine` - A line did not have seven fields
pub fn load_cookie_jar(path: &Path) -> Result<Jar, CookieError> {
    let content = std::fs::read_to_string(path).map_err(|source| CookieError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let cookies = parse_netscape_cookies(&content)?;
    let jar = Jar::default();
    let added = load_cookies_into_jar(&cookies, &jar);

    tracing::info!("Loaded {} cookies from {}", added, path.display());

    Ok(jar)
}
