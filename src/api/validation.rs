use regex::Regex;
use std::sync::LazyLock;

/// http(s)/ftp(s) URL with a domain, `localhost` or dotted-quad host,
/// optional port and optional path/query
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:http|ftp)s?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|",
        r"localhost|",
        r"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})",
        r"(?::[0-9]+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("URL pattern is a valid regex")
});

/// Syntactic URL check; does not resolve or contact the host
pub fn is_valid_url(url: &str) -> bool {
    !url.is_empty() && URL_PATTERN.is_match(url)
}
