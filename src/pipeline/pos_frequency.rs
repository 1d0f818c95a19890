//! Part-of-speech frequency stage
//!
//! Counts UPOS tags of every annotated article and records them in its
//! metadata artifact.

use crate::corpus::CorpusManager;
use crate::storage::Storage;
use crate::HarvestError;

/// Records UPOS frequencies in each article's metadata
pub struct PosFrequencyPipeline<'a> {
    corpus: &'a mut CorpusManager,
    storage: &'a dyn Storage,
}

impl<'a> PosFrequencyPipeline<'a> {
    pub fn new(corpus: &'a mut CorpusManager, storage: &'a dyn Storage) -> Self {
        Self { corpus, storage }
    }

    /// Counts tags and rewrites `{id}_meta.json` for every article
    ///
    /// Articles without an in-memory annotation are read from their CoNLL-U
    /// artifact, which must exist and hold at least one sentence.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of updated articles
    /// * `Err(HarvestError)` - A CoNLL-U artifact is missing, empty or malformed,
    ///   or the metadata could not be written
    pub fn run(&mut self) -> Result<usize, HarvestError> {
        let mut updated = 0;

        for article in self.corpus.get_articles_mut().values_mut() {
            if article.conllu.is_none() {
                article.conllu = Some(self.storage.load_conllu(article.id)?);
            }
            if let Some(document) = &article.conllu {
                article.pos_frequencies = document.pos_frequencies();
            }
            self.storage.save_meta(article)?;
            updated += 1;
        }

        tracing::info!("Recorded POS frequencies for {} articles", updated);
        Ok(updated)
    }
}
