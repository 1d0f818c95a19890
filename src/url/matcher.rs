use url::Url;

/// Checks if a URL points at an article page
///
/// Article pages follow a fixed shape: the last path segment is
/// `news-<digits>-<digits>.html`, for example `/news-1-48213.html`.
///
/// # Examples
///
/// ```
/// use treebank_harvest::url::is_article_url;
/// use url::Url;
///
/// let article = Url::parse("https://mordovia-news.ru/news-1-48213.html").unwrap();
/// let listing = Url::parse("https://mordovia-news.ru/news/").unwrap();
/// assert!(is_article_url(&article));
/// assert!(!is_article_url(&listing));
/// ```
pub fn is_article_url(url: &Url) -> bool {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .is_some_and(matches_article_segment)
}

/// Matches a single path segment against `news-<digits>-<digits>.html`
pub fn matches_article_segment(segment: &str) -> bool {
    let Some(body) = segment
        .strip_prefix("news-")
        .and_then(|rest| rest.strip_suffix(".html"))
    else {
        return false;
    };

    match body.split_once('-') {
        Some((section, number)) => is_digits(section) && is_digits(number),
        None => false,
    }
}

fn is_digits(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}
