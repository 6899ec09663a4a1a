use url::Url;

use crate::error::{CroError, Result};

/// Normalize a URL to its origin (scheme + host + optional port).
///
/// Falls back to trimming trailing slashes if the input cannot be parsed.
pub fn normalize_origin(input: &str) -> String {
    match Url::parse(input) {
        Ok(parsed) => parsed
            .origin()
            .ascii_serialization()
            .trim_end_matches('/')
            .to_string(),
        Err(_) => input.trim_end_matches('/').to_string(),
    }
}

/// Parse user input as an http(s) URL, assuming https when no scheme is given.
pub fn parse_page_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&candidate).map_err(|e| CroError::InvalidUrl(format!("{input}: {e}")))?;
    if url.host_str().is_none() {
        return Err(CroError::InvalidUrl(format!("{input}: missing host")));
    }
    Ok(url)
}

/// Lowercased path of a URL without trailing slash; `/` for the root.
///
/// Unparseable input is treated as a bare path so that relative URLs from a
/// scraper still classify.
pub fn url_path(input: &str) -> String {
    let raw = match Url::parse(input) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => input
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let trimmed = raw.trim().trim_end_matches('/').to_ascii_lowercase();
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed
    } else {
        format!("/{trimmed}")
    }
}

/// Path segments of a URL, lowercased
pub fn path_segments(input: &str) -> Vec<String> {
    url_path(input)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether `href` points to a different host than `base`
pub fn is_external(base: &Url, href: &str) -> bool {
    match base.join(href) {
        Ok(resolved) => {
            matches!(resolved.scheme(), "http" | "https")
                && resolved.host_str() != base.host_str()
        }
        Err(_) => false,
    }
}
