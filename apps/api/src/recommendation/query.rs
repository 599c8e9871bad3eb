use std::sync::OnceLock;

use regex::Regex;

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"https?://\S+").expect("URL pattern is valid"))
}

/// Returns the first `http(s)://` URL in `text`, if any.
/// A query containing a URL is handled as a job-posting link.
pub fn extract_url(text: &str) -> Option<&str> {
    url_pattern().find(text).map(|m| m.as_str())
}
