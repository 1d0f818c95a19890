//! CoNLL-U documents
//!
//! A document is a sequence of sentences; a sentence is a block of `#`
//! comment lines and tab-separated token lines ended by a blank line.
//! Parsing keeps every column verbatim, so a parsed document prints back to
//! the same text.

mod graph;

pub use graph::{DependencyGraph, Edge, GraphError, GraphNode, TreeNode};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Placeholder for an empty column
pub const EMPTY_FIELD: &str = "_";

const COLUMN_COUNT: usize = 10;

/// A CoNLL-U syntax error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ConlluError {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

/// Value of the ID column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenId {
    /// A syntactic word, `3`
    Word(usize),
    /// A multiword token spanning words, `3-4`
    Range(usize, usize),
    /// An empty node, `3.1`
    Empty(usize, usize),
}

impl FromStr for TokenId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = |part: &str| {
            part.parse::<usize>()
                .map_err(|_| format!("invalid token id '{}'", s))
        };

        if let Some((start, end)) = s.split_once('-') {
            Ok(Self::Range(number(start)?, number(end)?))
        } else if let Some((word, sub)) = s.split_once('.') {
            Ok(Self::Empty(number(word)?, number(sub)?))
        } else {
            Ok(Self::Word(number(s)?))
        }
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(i) => write!(f, "{}", i),
            Self::Range(start, end) => write!(f, "{}-{}", start, end),
            Self::Empty(word, sub) => write!(f, "{}.{}", word, sub),
        }
    }
}

/// One token line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConlluToken {
    pub id: TokenId,
    pub form: String,
    pub lemma: String,
    pub upos: String,
    pub xpos: String,
    pub feats: String,
    /// `None` when the column is `_`
    pub head: Option<usize>,
    pub deprel: String,
    pub deps: String,
    pub misc: String,
}

impl ConlluToken {
    /// Word index, or `None` for multiword tokens and empty nodes
    pub fn index(&self) -> Option<usize> {
        match self.id {
            TokenId::Word(index) => Some(index),
            _ => None,
        }
    }

    fn parse_line(line: &str, line_number: usize) -> Result<Self, ConlluError> {
        let error = |message: String| ConlluError {
            line: line_number,
            message,
        };

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() != COLUMN_COUNT {
            return Err(error(format!(
                "expected {} tab-separated columns, found {}",
                COLUMN_COUNT,
                columns.len()
            )));
        }

        let id = columns[0].parse::<TokenId>().map_err(error)?;
        let head = match columns[6] {
            EMPTY_FIELD => None,
            raw => Some(
                raw.parse::<usize>()
                    .map_err(|_| error(format!("invalid head '{}'", raw)))?,
            ),
        };

        Ok(Self {
            id,
            form: columns[1].to_string(),
            lemma: columns[2].to_string(),
            upos: columns[3].to_string(),
            xpos: columns[4].to_string(),
            feats: columns[5].to_string(),
            head,
            deprel: columns[7].to_string(),
            deps: columns[8].to_string(),
            misc: columns[9].to_string(),
        })
    }
}

impl fmt::Display for ConlluToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = self
            .head
            .map(|h| h.to_string())
            .unwrap_or_else(|| EMPTY_FIELD.to_string());
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.id,
            self.form,
            self.lemma,
            self.upos,
            self.xpos,
            self.feats,
            head,
            self.deprel,
            self.deps,
            self.misc
        )
    }
}

/// The part of a word token the dependency graph needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyToken {
    pub index: usize,
    pub text: String,
    pub upos: String,
    /// 0 for the sentence root
    pub head: usize,
    pub deprel: String,
}

/// A sentence block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConlluSentence {
    /// Comment lines including the leading `#`
    pub comments: Vec<String>,
    pub tokens: Vec<ConlluToken>,
}

impl ConlluSentence {
    /// Syntactic words, skipping multiword tokens and empty nodes
    pub fn words(&self) -> impl Iterator<Item = &ConlluToken> {
        self.tokens.iter().filter(|token| token.index().is_some())
    }

    /// Words as dependency tokens; a missing head is read as the root
    pub fn dependency_tokens(&self) -> Vec<DependencyToken> {
        self.tokens
            .iter()
            .filter_map(|token| {
                token.index().map(|index| DependencyToken {
                    index,
                    text: token.form.clone(),
                    upos: token.upos.clone(),
                    head: token.head.unwrap_or(0),
                    deprel: token.deprel.clone(),
                })
            })
            .collect()
    }

    /// Value of the `# text = ...` comment
    pub fn text(&self) -> Option<&str> {
        self.comments
            .iter()
            .find_map(|comment| comment.strip_prefix("# text = "))
    }

    fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.tokens.is_empty()
    }
}

impl fmt::Display for ConlluSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for comment in &self.comments {
            writeln!(f, "{}", comment)?;
        }
        for token in &self.tokens {
            writeln!(f, "{}", token)?;
        }
        writeln!(f)
    }
}

/// A parsed CoNLL-U document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConlluDocument {
    pub sentences: Vec<ConlluSentence>,
}

impl ConlluDocument {
    /// Parses CoNLL-U text
    ///
    /// Blank lines end sentences; a final sentence without a trailing blank
    /// line is still kept. Lines ending in `\r\n` are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ConlluError`] for a token line without exactly ten columns,
    /// an unreadable ID or an unreadable HEAD.
    pub fn parse(input: &str) -> Result<Self, ConlluError> {
        let mut sentences = Vec::new();
        let mut current = ConlluSentence::default();

        for (i, line) in input.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                if !current.is_empty() {
                    sentences.push(std::mem::take(&mut current));
                }
            } else if line.starts_with('#') {
                current.comments.push(line.to_string());
            } else {
                current.tokens.push(ConlluToken::parse_line(line, i + 1)?);
            }
        }

        if !current.is_empty() {
            sentences.push(current);
        }

        Ok(Self { sentences })
    }

    /// Number of words per UPOS tag across all sentences
    pub fn pos_frequencies(&self) -> BTreeMap<String, usize> {
        let mut frequencies = BTreeMap::new();
        for word in self.sentences.iter().flat_map(ConlluSentence::words) {
            *frequencies.entry(word.upos.clone()).or_insert(0) += 1;
        }
        frequencies
    }

    /// Number of sentences
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

impl FromStr for ConlluDocument {
    type Err = ConlluError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ConlluDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sentence in &self.sentences {
            write!(f, "{}", sentence)?;
        }
        Ok(())
    }
}
