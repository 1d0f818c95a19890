//! Integration tests for corpus loading, annotation and pattern search
//!
//! Corpora are built in temporary directories through the file storage, and
//! analyzers are replaced by fixed in-memory implementations except for the
//! UDPipe service adapter, which runs against a wiremock server.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use treebank_harvest::article::Article;
use treebank_harvest::conllu::ConlluDocument;
use treebank_harvest::output::load_report;
use treebank_harvest::pipeline::{
    AnalyzerError, ConlluAnalyzer, PatternSearchPipeline, PosFrequencyPipeline, SyntacticPattern,
    TextProcessingPipeline, UdpipeServiceAnalyzer,
};
use treebank_harvest::storage::{ArtifactKind, FileStorage, Storage, StorageError};
use treebank_harvest::{CorpusError, CorpusManager, HarvestError};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CAT_CONLLU: &str = "# text = Кот сидит на окне.\n\
1\tКот\tкот\tNOUN\t_\t_\t2\tnsubj\t_\t_\n\
2\tсидит\tсидеть\tVERB\t_\t_\t0\troot\t_\t_\n\
3\tна\tна\tADP\t_\t_\t4\tcase\t_\t_\n\
4\tокне\tокно\tNOUN\t_\t_\t2\tobl\t_\tSpaceAfter=No\n\
5\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_\n\
\n";

const DOG_CONLLU: &str = "# text = Собака лает.\n\
1\tСобака\tсобака\tNOUN\t_\t_\t2\tnsubj\t_\t_\n\
2\tлает\tлаять\tVERB\t_\t_\t0\troot\t_\tSpaceAfter=No\n\
3\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_\n\
\n\
# text = Тихо.\n\
1\tТихо\tтихо\tADV\t_\t_\t0\troot\t_\tSpaceAfter=No\n\
2\t.\t.\tPUNCT\t_\t_\t1\tpunct\t_\t_\n\
\n";

/// Analyzer returning a fixed list of documents whatever the input
struct FixedAnalyzer {
    documents: Vec<ConlluDocument>,
}

impl ConlluAnalyzer for FixedAnalyzer {
    fn analyze(&self, _texts: &[String]) -> Result<Vec<ConlluDocument>, AnalyzerError> {
        Ok(self.documents.clone())
    }
}

struct FailingAnalyzer;

impl ConlluAnalyzer for FailingAnalyzer {
    fn analyze(&self, _texts: &[String]) -> Result<Vec<ConlluDocument>, AnalyzerError> {
        Err(AnalyzerError::Process("model crashed".to_string()))
    }
}

fn conllu(text: &str) -> ConlluDocument {
    ConlluDocument::parse(text).expect("fixture must parse")
}

/// Writes `count` articles with ids 1..=count into `root`
fn create_corpus(root: &Path, count: usize) -> FileStorage {
    let storage = FileStorage::new(root);
    for id in 1..=count {
        let mut article = Article::new(id, format!("https://mordovia-news.ru/news-1-{}.html", id));
        article.title = format!("Новость {}", id);
        article.set_text(format!(
            "Текст\u{a0}новости номер {} достаточно длинный, чтобы сохраниться целиком.",
            id
        ));
        storage.save_raw(&article).unwrap();
        storage.save_meta(&article).unwrap();
    }
    storage
}

#[test]
fn test_three_raw_two_meta_is_inconsistent() {
    let temp = TempDir::new().unwrap();
    create_corpus(temp.path(), 2);
    fs::write(
        temp.path().join("3_raw.txt"),
        "Третий текст без метаданных, длина которого не имеет значения.",
    )
    .unwrap();

    let result = CorpusManager::new(temp.path());
    assert!(matches!(result, Err(CorpusError::InconsistentDataset { .. })));
}

#[test]
fn test_duplicate_ids_keep_first_scanned() {
    let temp = TempDir::new().unwrap();
    create_corpus(temp.path(), 1);
    fs::write(temp.path().join("001_raw.txt"), "Дубликат, который сканируется первым по имени файла.").unwrap();
    fs::copy(temp.path().join("1_meta.json"), temp.path().join("001_meta.json")).unwrap();

    let corpus = CorpusManager::new(temp.path()).unwrap();
    assert_eq!(corpus.len(), 1);
    assert_eq!(
        corpus.get_articles()[&1].text,
        "Дубликат, который сканируется первым по имени файла."
    );
}

#[test]
fn test_annotation_writes_cleaned_and_conllu() {
    let temp = TempDir::new().unwrap();
    let storage = create_corpus(temp.path(), 2);
    let mut corpus = CorpusManager::new(temp.path()).unwrap();
    let analyzer = FixedAnalyzer {
        documents: vec![conllu(CAT_CONLLU), conllu(DOG_CONLLU)],
    };

    let summary = TextProcessingPipeline::new(&mut corpus, &storage, Some(&analyzer))
        .run()
        .unwrap();

    assert_eq!(summary.cleaned, 2);
    assert_eq!(summary.annotated, 2);

    let cleaned = fs::read_to_string(temp.path().join("1_cleaned.txt")).unwrap();
    assert!(!cleaned.contains('\u{a0}'));
    assert!(cleaned.starts_with("Текст новости номер 1"));

    let written = fs::read_to_string(temp.path().join("2_udpipe_conllu.conllu")).unwrap();
    assert_eq!(conllu(&written), conllu(DOG_CONLLU));
    assert!(corpus.get_articles()[&1].conllu.is_some());
}

#[test]
fn test_annotation_count_mismatch_annotates_nothing() {
    let temp = TempDir::new().unwrap();
    let storage = create_corpus(temp.path(), 3);
    let mut corpus = CorpusManager::new(temp.path()).unwrap();
    let analyzer = FixedAnalyzer {
        documents: vec![conllu(CAT_CONLLU), conllu(DOG_CONLLU)],
    };

    let summary = TextProcessingPipeline::new(&mut corpus, &storage, Some(&analyzer))
        .run()
        .unwrap();

    assert_eq!(summary.cleaned, 3);
    assert_eq!(summary.annotated, 0);
    for id in 1..=3 {
        assert!(corpus.get_articles()[&id].conllu.is_none());
        assert!(!storage.has_artifact(id, ArtifactKind::UdpipeConllu));
        assert!(storage.has_artifact(id, ArtifactKind::Cleaned));
    }
}

#[test]
fn test_analyzer_failure_is_not_fatal() {
    let temp = TempDir::new().unwrap();
    let storage = create_corpus(temp.path(), 1);
    let mut corpus = CorpusManager::new(temp.path()).unwrap();

    let summary = TextProcessingPipeline::new(&mut corpus, &storage, Some(&FailingAnalyzer))
        .run()
        .unwrap();

    assert_eq!(summary.annotated, 0);
    assert!(!storage.has_artifact(1, ArtifactKind::UdpipeConllu));
}

#[test]
fn test_cleaning_without_analyzer() {
    let temp = TempDir::new().unwrap();
    let storage = create_corpus(temp.path(), 2);
    let mut corpus = CorpusManager::new(temp.path()).unwrap();

    let summary = TextProcessingPipeline::new(&mut corpus, &storage, None)
        .run()
        .unwrap();

    assert_eq!(summary.cleaned, 2);
    assert_eq!(summary.annotated, 0);
}

#[test]
fn test_pos_frequencies_written_to_meta() {
    let temp = TempDir::new().unwrap();
    let storage = create_corpus(temp.path(), 1);
    fs::write(temp.path().join("1_udpipe_conllu.conllu"), CAT_CONLLU).unwrap();
    let mut corpus = CorpusManager::new(temp.path()).unwrap();

    let updated = PosFrequencyPipeline::new(&mut corpus, &storage).run().unwrap();
    assert_eq!(updated, 1);

    let meta = storage.load_meta(1).unwrap();
    assert_eq!(meta.pos_frequencies.get("NOUN"), Some(&2));
    assert_eq!(meta.pos_frequencies.get("VERB"), Some(&1));
    assert_eq!(meta.pos_frequencies.get("ADP"), Some(&1));
    assert_eq!(meta.title, "Новость 1");
}

#[test]
fn test_pos_frequencies_require_annotation() {
    let temp = TempDir::new().unwrap();
    let storage = create_corpus(temp.path(), 1);
    fs::write(temp.path().join("1_udpipe_conllu.conllu"), "").unwrap();
    let mut corpus = CorpusManager::new(temp.path()).unwrap();

    let result = PosFrequencyPipeline::new(&mut corpus, &storage).run();
    assert!(matches!(
        result,
        Err(HarvestError::Storage(StorageError::EmptyArtifact(_)))
    ));
}

#[test]
fn test_pattern_search_over_stored_annotations() {
    let temp = TempDir::new().unwrap();
    let storage = create_corpus(temp.path(), 2);
    fs::write(temp.path().join("1_udpipe_conllu.conllu"), CAT_CONLLU).unwrap();
    fs::write(temp.path().join("2_udpipe_conllu.conllu"), DOG_CONLLU).unwrap();
    let corpus = CorpusManager::new(temp.path()).unwrap();

    let output = temp.path().join("pattern_search.json");
    let pattern: SyntacticPattern = "VERB,nsubj,NOUN".parse().unwrap();
    let report = PatternSearchPipeline::new(&corpus, &storage, pattern)
        .run(&output)
        .unwrap();

    // Article 1 has one sentence, article 2 has two
    assert_eq!(report.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);

    let cat = &report[&0];
    assert_eq!(cat.len(), 1);
    assert_eq!(cat[0].text, "сидит");
    let children: Vec<&str> = cat[0].children.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(children, vec!["Кот", "окне", "."]);
    assert_eq!(cat[0].children[1].children[0].text, "на");

    assert_eq!(report[&1][0].text, "лает");
    assert!(report[&2].is_empty());

    assert_eq!(load_report(&output).unwrap(), report);
}

#[test]
fn test_pattern_search_without_matching_relation() {
    let temp = TempDir::new().unwrap();
    let storage = create_corpus(temp.path(), 1);
    fs::write(temp.path().join("1_udpipe_conllu.conllu"), CAT_CONLLU).unwrap();
    let corpus = CorpusManager::new(temp.path()).unwrap();

    let output = temp.path().join("report.json");
    let report = PatternSearchPipeline::new(&corpus, &storage, SyntacticPattern::new("VERB", "obj", "NOUN"))
        .run(&output)
        .unwrap();

    assert_eq!(report.len(), 1);
    assert!(report[&0].is_empty());
}

#[test]
fn test_pattern_search_missing_annotation() {
    let temp = TempDir::new().unwrap();
    let storage = create_corpus(temp.path(), 1);
    let corpus = CorpusManager::new(temp.path()).unwrap();

    let output = temp.path().join("report.json");
    let result = PatternSearchPipeline::new(&corpus, &storage, SyntacticPattern::new("VERB", "nsubj", "NOUN"))
        .run(&output);

    assert!(matches!(
        result,
        Err(HarvestError::Storage(StorageError::MissingArtifact(_)))
    ));
    assert!(!output.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_udpipe_service_adapter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/udpipe/api/process"))
        .and(body_string_contains("model=russian-syntagrus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "russian-syntagrus-ud-2.12",
            "result": CAT_CONLLU
        })))
        .expect(2)
        .mount(&server)
        .await;

    let endpoint = format!("{}/udpipe/api", server.uri());
    let documents = tokio::task::spawn_blocking(move || {
        let analyzer = UdpipeServiceAnalyzer::bootstrap(&endpoint, "russian-syntagrus", None).unwrap();
        analyzer.analyze(&["Кот сидит на окне.".to_string(), "Кот сидит.".to_string()])
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0], conllu(CAT_CONLLU));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_udpipe_service_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Unknown model"))
        .mount(&server)
        .await;

    let endpoint = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let analyzer = UdpipeServiceAnalyzer::bootstrap(&endpoint, "missing", None).unwrap();
        analyzer.analyze(&["Текст".to_string()])
    })
    .await
    .unwrap();

    match result {
        Err(AnalyzerError::Service { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Unknown model");
        }
        other => panic!("expected a service error, got {:?}", other),
    }
}
