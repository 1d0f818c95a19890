//! Artifact file naming inside a corpus directory
//!
//! Every artifact of article `id` lives directly in the corpus directory as
//! `{id}{suffix}`. The id prefix is the only link between artifacts.

/// Kinds of per-article artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Extracted body text
    Raw,
    /// Metadata JSON
    Meta,
    /// Text with non-breaking spaces replaced
    Cleaned,
    /// CoNLL-U produced by a UDPipe analyzer
    UdpipeConllu,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Raw,
        ArtifactKind::Meta,
        ArtifactKind::Cleaned,
        ArtifactKind::UdpipeConllu,
    ];

    /// File name suffix following the id
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Raw => "_raw.txt",
            Self::Meta => "_meta.json",
            Self::Cleaned => "_cleaned.txt",
            Self::UdpipeConllu => "_udpipe_conllu.conllu",
        }
    }

    /// File name of this artifact for article `id`
    pub fn file_name(&self, id: usize) -> String {
        format!("{}{}", id, self.suffix())
    }
}

/// Splits an artifact file name into its id prefix and kind
///
/// The prefix must be a non-empty run of ASCII digits. Leading zeros are
/// accepted, so `"001_raw.txt"` yields id 1 with prefix `"001"`.
///
/// # Example
///
/// ```
/// use treebank_harvest::storage::{parse_artifact_name, ArtifactKind};
///
/// let (prefix, id, kind) = parse_artifact_name("12_meta.json").unwrap();
/// assert_eq!((prefix, id, kind), ("12", 12, ArtifactKind::Meta));
/// assert!(parse_artifact_name("notes_raw.txt").is_none());
/// ```
pub fn parse_artifact_name(file_name: &str) -> Option<(&str, usize, ArtifactKind)> {
    let kind = ArtifactKind::ALL
        .into_iter()
        .find(|kind| file_name.ends_with(kind.suffix()))?;

    let prefix = &file_name[..file_name.len() - kind.suffix().len()];
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Ids start at 1
    let id = prefix.parse().ok().filter(|id: &usize| *id > 0)?;
    Some((prefix, id, kind))
}
