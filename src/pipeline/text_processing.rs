//! Text cleaning and batch annotation

use crate::corpus::CorpusManager;
use crate::pipeline::ConlluAnalyzer;
use crate::storage::Storage;
use crate::HarvestError;

/// Counts reported by [`TextProcessingPipeline::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    /// Articles whose cleaned text was written
    pub cleaned: usize,
    /// Articles whose CoNLL-U artifact was written
    pub annotated: usize,
}

/// Replaces non-breaking spaces with plain spaces
pub fn clean_text(text: &str) -> String {
    text.replace('\u{a0}', " ")
}

/// Cleans every article and annotates the corpus in one analyzer batch
pub struct TextProcessingPipeline<'a> {
    corpus: &'a mut CorpusManager,
    storage: &'a dyn Storage,
    analyzer: Option<&'a dyn ConlluAnalyzer>,
}

impl<'a> TextProcessingPipeline<'a> {
    /// Creates the pipeline; without an analyzer only cleaning runs
    pub fn new(
        corpus: &'a mut CorpusManager,
        storage: &'a dyn Storage,
        analyzer: Option<&'a dyn ConlluAnalyzer>,
    ) -> Self {
        Self {
            corpus,
            storage,
            analyzer,
        }
    }

    /// Runs cleaning, then annotation
    ///
    /// An analyzer failure, or a result count different from the number of
    /// texts, leaves every article unannotated and is not an error.
    ///
    /// # Returns
    ///
    /// * `Ok(AnnotationSummary)` - Number of cleaned and annotated articles
    /// * `Err(HarvestError)` - An artifact could not be written
    pub fn run(&mut self) -> Result<AnnotationSummary, HarvestError> {
        let mut summary = AnnotationSummary::default();
        let articles = self.corpus.get_articles_mut();

        for article in articles.values_mut() {
            article.cleaned_text = Some(clean_text(&article.text));
            self.storage.save_cleaned(article)?;
            summary.cleaned += 1;
        }

        let Some(analyzer) = self.analyzer else {
            tracing::info!("No analyzer configured, cleaned {} articles", summary.cleaned);
            return Ok(summary);
        };

        let texts: Vec<String> = articles
            .values()
            .map(|article| article.cleaned_text.clone().unwrap_or_else(|| article.text.clone()))
            .collect();

        let documents = match analyzer.analyze(&texts) {
            Ok(documents) => documents,
            Err(e) => {
                tracing::warn!("Annotation skipped: {}", e);
                return Ok(summary);
            }
        };

        if documents.len() != texts.len() {
            tracing::warn!(
                "Annotation skipped: analyzer returned {} documents for {} texts",
                documents.len(),
                texts.len()
            );
            return Ok(summary);
        }

        for (article, document) in articles.values_mut().zip(documents) {
            article.conllu = Some(document);
            self.storage.save_conllu(article)?;
            summary.annotated += 1;
        }

        tracing::info!(
            "Cleaned {} and annotated {} articles",
            summary.cleaned,
            summary.annotated
        );
        Ok(summary)
    }
}
