//! Article records and their metadata artifact
//!
//! An [`Article`] is created by the article fetcher, enriched by the
//! annotation stages and never deleted during a run. Its id is unique within
//! a corpus directory.

mod extract;
mod fetcher;

pub use extract::{extract_article, extract_article_at, unify_date_format};
pub use fetcher::ArticleFetcher;

use crate::conllu::ConlluDocument;
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Author sentinel used when no author element is found
pub const AUTHOR_NOT_FOUND: &str = "NOT FOUND";

/// Title used when neither a heading nor a `<title>` is present
pub const TITLE_NOT_FOUND: &str = "title not found";

/// Minimum number of characters a body text must have to be kept
pub const MIN_BODY_CHARS: usize = 50;

/// Replacement for body texts shorter than [`MIN_BODY_CHARS`]
pub const BODY_PLACEHOLDER: &str = "Article text is not available. \
Article text is not available. Article text is not available.";

/// Date format of the metadata artifact
pub const META_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A harvested news article
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: usize,
    pub url: String,
    pub title: String,
    pub date: NaiveDateTime,
    /// Never empty: holds [`AUTHOR_NOT_FOUND`] when unknown
    pub authors: Vec<String>,
    pub topics: Vec<String>,
    pub text: String,
    pub cleaned_text: Option<String>,
    pub conllu: Option<ConlluDocument>,
    pub pos_frequencies: BTreeMap<String, usize>,
}

impl Article {
    /// Creates an empty article with placeholder fields
    pub fn new(id: usize, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            title: TITLE_NOT_FOUND.to_string(),
            date: now_without_fraction(),
            authors: vec![AUTHOR_NOT_FOUND.to_string()],
            topics: Vec::new(),
            text: String::new(),
            cleaned_text: None,
            conllu: None,
            pos_frequencies: BTreeMap::new(),
        }
    }

    /// Sets the body text, replacing it with the placeholder when too short
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.text = if text.chars().count() < MIN_BODY_CHARS {
            BODY_PLACEHOLDER.to_string()
        } else {
            text
        };
    }

    /// Sets the authors, falling back to the sentinel for an empty list
    pub fn set_authors(&mut self, authors: Vec<String>) {
        self.authors = if authors.is_empty() {
            vec![AUTHOR_NOT_FOUND.to_string()]
        } else {
            authors
        };
    }

    /// Builds the metadata record persisted as `{id}_meta.json`
    pub fn meta(&self) -> ArticleMeta {
        ArticleMeta {
            id: self.id,
            url: self.url.clone(),
            title: self.title.clone(),
            date: self.date,
            author: self.authors.clone(),
            topics: self.topics.clone(),
            pos_frequencies: self.pos_frequencies.clone(),
        }
    }

    /// Copies metadata fields onto this article
    pub fn apply_meta(&mut self, meta: ArticleMeta) {
        self.url = meta.url;
        self.title = meta.title;
        self.date = meta.date;
        self.set_authors(meta.author);
        self.topics = meta.topics;
        self.pos_frequencies = meta.pos_frequencies;
    }
}

/// On-disk metadata record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleMeta {
    pub id: usize,
    pub url: String,
    pub title: String,
    #[serde(with = "meta_date")]
    pub date: NaiveDateTime,
    pub author: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pos_frequencies: BTreeMap<String, usize>,
}

/// Current local time truncated to whole seconds
pub fn now_without_fraction() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

mod meta_date {
    use super::META_DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(META_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, META_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
