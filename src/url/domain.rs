use url::Url;

/// Checks whether two URLs point at the same site
///
/// Host (case-insensitive) and effective port must agree.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use pin_harvest::url::same_site;
///
/// let base = Url::parse("https://de.pinterest.com").unwrap();
/// assert!(same_site(&base, &Url::parse("https://DE.pinterest.com/pin/1/").unwrap()));
/// assert!(!same_site(&base, &Url::parse("https://evil.example/pin/1/").unwrap()));
/// ```
pub fn same_site(a: &Url, b: &Url) -> bool {
    let host_a = a.host_str().map(str::to_lowercase);
    let host_b = b.host_str().map(str::to_lowercase);

    host_a.is_some() && host_a == host_b && a.port_or_known_default() == b.port_or_known_default()
}
