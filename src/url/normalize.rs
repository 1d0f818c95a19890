use crate::UrlError;
use url::Url;

/// Normalizes a discovered URL so that equal articles compare equal
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Accept only `http` and `https` schemes and require a host
/// 3. Remove fragment (everything after #)
///
/// Scheme, host and query are left as given: the stored URL is the one the
/// site links to.
///
/// # Examples
///
/// ```
/// use treebank_harvest::url::normalize_url;
///
/// let url = normalize_url("https://mordovia-news.ru/news-1-42.html#top").unwrap();
/// assert_eq!(url.as_str(), "https://mordovia-news.ru/news-1-42.html");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(url)
}

/// Resolves a link `href` against the page it was found on, then normalizes it
///
/// Returns `None` for hrefs that cannot point at an article: empty values,
/// fragment-only anchors, `javascript:`/`mailto:`/`tel:`/`data:` links and
/// anything that fails to resolve.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let joined = base_url.join(href).ok()?;
    normalize_parsed(joined).ok()
}

fn normalize_parsed(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);
    Ok(url)
}
