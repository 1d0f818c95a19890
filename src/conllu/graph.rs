//! Dependency graph of one sentence
//!
//! Nodes live in an arena indexed by position; edges point from governor to
//! dependent and carry the relation label. Children of every node are kept in
//! ascending token index order.

use super::{ConlluSentence, DependencyToken};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Reasons a sentence cannot be turned into a graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("token index {0} appears more than once")]
    DuplicateToken(usize),

    #[error("token {token} points to missing head {head}")]
    UnknownHead { token: usize, head: usize },
}

/// A word in the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Token index within the sentence (1-based)
    pub index: usize,
    pub upos: String,
    pub text: String,
}

/// Governor to dependent edge, by arena position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub governor: usize,
    pub dependent: usize,
    pub relation: String,
}

/// A subtree rendered for the pattern report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub upos: String,
    pub text: String,
    pub children: Vec<TreeNode>,
}

/// Arena-backed dependency graph
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<Edge>,
    /// Outgoing edge ids per node, sorted by dependent token index
    outgoing: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Builds the graph of a sentence
    pub fn from_sentence(sentence: &ConlluSentence) -> Result<Self, GraphError> {
        Self::from_tokens(&sentence.dependency_tokens())
    }

    /// Builds a graph from dependency tokens
    ///
    /// A token with head 0 gets no incoming edge.
    ///
    /// # Errors
    ///
    /// * [`GraphError::DuplicateToken`] - Two tokens share an index
    /// * [`GraphError::UnknownHead`] - A head index names no token
    pub fn from_tokens(tokens: &[DependencyToken]) -> Result<Self, GraphError> {
        let mut positions: HashMap<usize, usize> = HashMap::with_capacity(tokens.len());
        let mut nodes = Vec::with_capacity(tokens.len());

        for token in tokens {
            if positions.insert(token.index, nodes.len()).is_some() {
                return Err(GraphError::DuplicateToken(token.index));
            }
            nodes.push(GraphNode {
                index: token.index,
                upos: token.upos.clone(),
                text: token.text.clone(),
            });
        }

        let mut edges = Vec::new();
        let mut outgoing = vec![Vec::new(); nodes.len()];

        for (dependent, token) in tokens.iter().enumerate() {
            if token.head == 0 {
                continue;
            }
            let governor = *positions.get(&token.head).ok_or(GraphError::UnknownHead {
                token: token.index,
                head: token.head,
            })?;
            outgoing[governor].push(edges.len());
            edges.push(Edge {
                governor,
                dependent,
                relation: token.deprel.clone(),
            });
        }

        for edge_ids in &mut outgoing {
            edge_ids.sort_by_key(|&edge| nodes[edges[edge].dependent].index);
        }

        Ok(Self {
            nodes,
            edges,
            outgoing,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at arena position `position`
    pub fn node(&self, position: usize) -> Option<&GraphNode> {
        self.nodes.get(position)
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Outgoing edges of a node in ascending dependent index order
    pub fn outgoing(&self, position: usize) -> impl Iterator<Item = &Edge> {
        self.outgoing
            .get(position)
            .into_iter()
            .flatten()
            .map(|&edge| &self.edges[edge])
    }

    /// Renders the subtree rooted at `position`
    ///
    /// Returns `None` when `position` is out of range or when the walk
    /// reaches a node twice.
    pub fn subtree(&self, position: usize) -> Option<TreeNode> {
        let mut visited = vec![false; self.nodes.len()];
        self.build_subtree(position, &mut visited)
    }

    fn build_subtree(&self, position: usize, visited: &mut [bool]) -> Option<TreeNode> {
        let node = self.nodes.get(position)?;
        if std::mem::replace(&mut visited[position], true) {
            return None;
        }

        let children = self
            .outgoing(position)
            .map(|edge| self.build_subtree(edge.dependent, visited))
            .collect::<Option<Vec<_>>>()?;

        Some(TreeNode {
            upos: node.upos.clone(),
            text: node.text.clone(),
            children,
        })
    }
}
