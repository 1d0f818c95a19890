//! Annotation and search stages over a loaded corpus
//!
//! This module contains:
//! - The analyzer capability and its UDPipe backends
//! - Text cleaning and batch CoNLL-U annotation
//! - Part-of-speech frequency counting
//! - Syntactic pattern search over dependency trees

mod analyzer;
mod pattern_search;
mod pos_frequency;
mod text_processing;
mod udpipe;

pub use analyzer::{AnalyzerError, ConlluAnalyzer};
pub use pattern_search::{
    find_pattern, make_graphs, search_documents, PatternMatchReport, PatternSearchPipeline,
    SyntacticPattern,
};
pub use pos_frequency::PosFrequencyPipeline;
pub use text_processing::{clean_text, AnnotationSummary, TextProcessingPipeline};
pub use udpipe::{UdpipeCliAnalyzer, UdpipeServiceAnalyzer};
