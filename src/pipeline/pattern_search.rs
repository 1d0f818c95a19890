//! Syntactic pattern search over dependency graphs
//!
//! A pattern is a (root UPOS, relation, child UPOS) triple. Every edge whose
//! governor, label and dependent all match yields the full subtree of the
//! governor. Results are keyed by the global sentence index across the
//! corpus, counted from 0 in ascending article id order.

use crate::conllu::{ConlluDocument, DependencyGraph, TreeNode};
use crate::corpus::CorpusManager;
use crate::output::save_report;
use crate::storage::Storage;
use crate::HarvestError;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Matches per global sentence index; sentences without a match map to an empty list
pub type PatternMatchReport = BTreeMap<usize, Vec<TreeNode>>;

/// A (root, relation, child) search pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntacticPattern {
    pub root_upos: String,
    pub relation: String,
    pub child_upos: String,
}

impl SyntacticPattern {
    pub fn new(root_upos: &str, relation: &str, child_upos: &str) -> Self {
        Self {
            root_upos: root_upos.to_string(),
            relation: relation.to_string(),
            child_upos: child_upos.to_string(),
        }
    }

    /// True when the edge `governor -> dependent` labeled `relation` matches
    fn matches(&self, graph: &DependencyGraph, governor: usize, dependent: usize, relation: &str) -> bool {
        let (Some(root), Some(child)) = (graph.node(governor), graph.node(dependent)) else {
            return false;
        };
        root.upos == self.root_upos && relation == self.relation && child.upos == self.child_upos
    }
}

impl FromStr for SyntacticPattern {
    type Err = HarvestError;

    /// Parses `"VERB,nsubj,NOUN"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [root, relation, child] if !root.is_empty() && !relation.is_empty() && !child.is_empty() => {
                Ok(Self::new(root, relation, child))
            }
            _ => Err(HarvestError::InvalidPattern(s.to_string())),
        }
    }
}

impl fmt::Display for SyntacticPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.root_upos, self.relation, self.child_upos)
    }
}

/// Builds one graph per sentence; malformed sentences yield `None`
pub fn make_graphs(document: &ConlluDocument) -> Vec<Option<DependencyGraph>> {
    document
        .sentences
        .iter()
        .map(|sentence| match DependencyGraph::from_sentence(sentence) {
            Ok(graph) => Some(graph),
            Err(e) => {
                tracing::warn!(
                    "Skipping malformed sentence {:?}: {}",
                    sentence.text().unwrap_or(""),
                    e
                );
                None
            }
        })
        .collect()
}

/// All matches of `pattern` in one sentence graph
///
/// Matches are ordered by governor position, then by dependent token index.
/// A match whose subtree walk meets a cycle is dropped.
pub fn find_pattern(graph: &DependencyGraph, pattern: &SyntacticPattern) -> Vec<TreeNode> {
    let mut matches = Vec::new();

    for governor in 0..graph.len() {
        for edge in graph.outgoing(governor) {
            if !pattern.matches(graph, governor, edge.dependent, &edge.relation) {
                continue;
            }
            match graph.subtree(governor) {
                Some(tree) => matches.push(tree),
                None => tracing::warn!("Dropping match rooted at a cyclic subtree"),
            }
        }
    }

    matches
}

/// Searches documents in order, numbering sentences globally from 0
pub fn search_documents<'d, I>(documents: I, pattern: &SyntacticPattern) -> PatternMatchReport
where
    I: IntoIterator<Item = &'d ConlluDocument>,
{
    let mut report = PatternMatchReport::new();

    for (index, graph) in documents.into_iter().flat_map(make_graphs).enumerate() {
        let matches = graph
            .map(|graph| find_pattern(&graph, pattern))
            .unwrap_or_default();
        report.insert(index, matches);
    }

    report
}

/// Runs a pattern search over an annotated corpus and writes the report
pub struct PatternSearchPipeline<'a> {
    corpus: &'a CorpusManager,
    storage: &'a dyn Storage,
    pattern: SyntacticPattern,
}

impl<'a> PatternSearchPipeline<'a> {
    pub fn new(corpus: &'a CorpusManager, storage: &'a dyn Storage, pattern: SyntacticPattern) -> Self {
        Self {
            corpus,
            storage,
            pattern,
        }
    }

    /// Searches every article and writes the report to `output`
    ///
    /// Articles are read from memory when annotated there, otherwise from
    /// their CoNLL-U artifact. Articles are not modified.
    ///
    /// # Returns
    ///
    /// * `Ok(PatternMatchReport)` - The report that was written
    /// * `Err(HarvestError)` - An annotation could not be loaded or the report not written
    pub fn run(&self, output: &Path) -> Result<PatternMatchReport, HarvestError> {
        let mut loaded = Vec::with_capacity(self.corpus.len());
        for article in self.corpus.get_articles().values() {
            if article.conllu.is_none() {
                loaded.push(self.storage.load_conllu(article.id)?);
            }
        }

        let mut from_disk = loaded.iter();
        let documents = self
            .corpus
            .get_articles()
            .values()
            .filter_map(|article| article.conllu.as_ref().or_else(|| from_disk.next()));

        let report = search_documents(documents, &self.pattern);
        save_report(&report, output)?;

        let total: usize = report.values().map(Vec::len).sum();
        tracing::info!(
            "Pattern {} matched {} times in {} sentences",
            self.pattern,
            total,
            report.len()
        );
        Ok(report)
    }
}
