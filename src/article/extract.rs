//! Article page extraction
//!
//! Pulls title, date, authors, topics and body text out of an article page.
//! Every field has a fallback, so extraction never fails on a well-formed
//! response body.

use super::{now_without_fraction, Article};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use scraper::{ElementRef, Html, Selector};

// Each list is tried in order; the first present element wins.
const TITLE_SELECTORS: &[&str] = &["h1.title", "h1.entry-title", "title"];
const DATE_SELECTORS: &[&str] = &[".date", ".news-date", "time"];
const AUTHOR_SELECTORS: &[&str] = &[".author", ".written-by"];
const TOPIC_SELECTORS: &[&str] = &[".tags a", ".keywords a"];
const BODY_SELECTORS: &[&str] = &[".article-text", ".content", ".news-text", "#content"];

/// Elements whose text never belongs to the article body
const EXCLUDED_SELECTOR: &str =
    "script, style, noscript, .ad, .ads, .advert, .banner, .related, .related-news, .comments, .comment";

/// Month names in Russian (genitive and nominative) and English
const MONTHS: &[(&str, u32)] = &[
    ("января", 1), ("январь", 1), ("january", 1),
    ("февраля", 2), ("февраль", 2), ("february", 2),
    ("марта", 3), ("март", 3), ("march", 3),
    ("апреля", 4), ("апрель", 4), ("april", 4),
    ("мая", 5), ("май", 5), ("may", 5),
    ("июня", 6), ("июнь", 6), ("june", 6),
    ("июля", 7), ("июль", 7), ("july", 7),
    ("августа", 8), ("август", 8), ("august", 8),
    ("сентября", 9), ("сентябрь", 9), ("september", 9),
    ("октября", 10), ("октябрь", 10), ("october", 10),
    ("ноября", 11), ("ноябрь", 11), ("november", 11),
    ("декабря", 12), ("декабрь", 12), ("december", 12),
];

/// Extracts an article from a page, dating it now when no date is found
pub fn extract_article(html: &str, url: &str, id: usize) -> Article {
    extract_article_at(html, url, id, now_without_fraction())
}

/// Extracts an article from a page
///
/// # Arguments
///
/// * `html` - The page body
/// * `url` - The article URL, stored verbatim
/// * `id` - The article id
/// * `fallback_date` - Used when no publication date can be parsed
pub fn extract_article_at(html: &str, url: &str, id: usize, fallback_date: NaiveDateTime) -> Article {
    let document = Html::parse_document(html);
    let mut article = Article::new(id, url);

    if let Some(title) = extract_title(&document) {
        article.title = title;
    }

    article.date = extract_date(&document).unwrap_or(fallback_date);
    article.set_authors(extract_authors(&document));
    article.topics = extract_topics(&document);
    article.set_text(extract_body(&document));

    tracing::debug!(
        "Extracted article {} ({} chars): {}",
        id,
        article.text.chars().count(),
        article.title
    );

    article
}

/// Parses a publication date in any of the supported layouts
///
/// Recognized forms: ISO 8601 (with or without time and offset),
/// `DD.MM.YYYY[ HH:MM]` and `D <month> YYYY[, HH:MM]` with a Russian or
/// English month name.
pub fn unify_date_format(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    parse_iso(raw)
        .or_else(|| parse_dotted(raw))
        .or_else(|| parse_textual(raw))
}

fn parse_iso(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn parse_dotted(raw: &str) -> Option<NaiveDateTime> {
    for format in ["%d.%m.%Y %H:%M:%S", "%d.%m.%Y %H:%M", "%d.%m.%Y, %H:%M"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    NaiveDate::parse_from_str(raw, "%d.%m.%Y")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn parse_textual(raw: &str) -> Option<NaiveDateTime> {
    let tokens: Vec<String> = raw
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| c == ',' || c == '|').to_lowercase())
        .filter(|token| !token.is_empty())
        .collect();

    let (day, month, year) = match tokens.as_slice() {
        [day, month, year, ..] => (day, month, year),
        _ => return None,
    };

    let day: u32 = day.parse().ok()?;
    let month = month_number(month)?;
    let year: i32 = leading_digits(year).parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    // Optional time anywhere after the year ("в 14:30", "14:30")
    let time = tokens[3..]
        .iter()
        .find_map(|token| chrono::NaiveTime::parse_from_str(token, "%H:%M").ok());

    match time {
        Some(time) => Some(date.and_time(time)),
        None => date.and_hms_opt(0, 0, 0),
    }
}

fn month_number(name: &str) -> Option<u32> {
    let name = name.trim_end_matches('.');
    MONTHS
        .iter()
        .find(|(month, _)| *month == name)
        .map(|(_, number)| *number)
}

fn leading_digits(token: &str) -> &str {
    let end = token
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    &token[..end]
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn extract_title(document: &Html) -> Option<String> {
    TITLE_SELECTORS
        .iter()
        .filter_map(|css| selector(css))
        .flat_map(|sel| document.select(&sel).map(element_text).collect::<Vec<_>>())
        .find(|text| !text.is_empty())
}

/// Parses the first date element found; an unparsable one yields `None`
fn extract_date(document: &Html) -> Option<NaiveDateTime> {
    let element = DATE_SELECTORS
        .iter()
        .filter_map(|css| selector(css))
        .find_map(|sel| document.select(&sel).next())?;

    element
        .value()
        .attr("datetime")
        .and_then(unify_date_format)
        .or_else(|| unify_date_format(&element_text(element)))
}

/// The first non-empty author element, as a one-element list
fn extract_authors(document: &Html) -> Vec<String> {
    AUTHOR_SELECTORS
        .iter()
        .filter_map(|css| selector(css))
        .flat_map(|sel| document.select(&sel).map(element_text).collect::<Vec<_>>())
        .find(|name| !name.is_empty())
        .map(|name| vec![name])
        .unwrap_or_default()
}

fn extract_topics(document: &Html) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for sel in TOPIC_SELECTORS.iter().filter_map(|css| selector(css)) {
        for topic in document.select(&sel).map(element_text) {
            if !topic.is_empty() && !topics.contains(&topic) {
                topics.push(topic);
            }
        }
    }
    topics
}

fn extract_body(document: &Html) -> String {
    let Some(excluded) = selector(EXCLUDED_SELECTOR) else {
        return String::new();
    };
    let Some(paragraph) = selector("p") else {
        return String::new();
    };

    let Some(container) = BODY_SELECTORS
        .iter()
        .filter_map(|css| selector(css))
        .find_map(|sel| document.select(&sel).next())
    else {
        return String::new();
    };

    container
        .select(&paragraph)
        .filter(|p| !is_excluded(*p, container, &excluded))
        .map(|p| visible_text(p, &excluded))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// True when `element` sits inside an excluded block below `container`
fn is_excluded(element: ElementRef<'_>, container: ElementRef<'_>, excluded: &Selector) -> bool {
    if excluded.matches(&element) {
        return true;
    }
    element
        .ancestors()
        .take_while(|node| node.id() != container.id())
        .filter_map(ElementRef::wrap)
        .any(|ancestor| excluded.matches(&ancestor))
}

/// Text of `element` without the text of excluded descendants
fn visible_text(element: ElementRef<'_>, excluded: &Selector) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != element.id())
            .filter_map(ElementRef::wrap)
            .any(|ancestor| excluded.matches(&ancestor));
        if !hidden {
            out.push_str(text);
        }
    }
    out.trim().to_string()
}
