//! Treebank-Harvest main entry point
//!
//! This is the command-line interface for the news corpus harvester.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use treebank_harvest::config::{load_config, load_config_with_hash, CrawlConfig};
use treebank_harvest::crawler::harvest;
use treebank_harvest::output::{print_annotation_summary, print_report_summary, print_statistics};
use treebank_harvest::pipeline::{
    ConlluAnalyzer, PatternSearchPipeline, PosFrequencyPipeline, SyntacticPattern,
    TextProcessingPipeline, UdpipeCliAnalyzer, UdpipeServiceAnalyzer,
};
use treebank_harvest::storage::{FileStorage, PATTERN_REPORT_FILE};
use treebank_harvest::CorpusManager;

/// Treebank-Harvest: a news corpus harvester
///
/// Crawls a news site for articles, stores them as a corpus, annotates the
/// corpus with a dependency parser and searches the parse trees for
/// syntactic patterns.
#[derive(Parser, Debug)]
#[command(name = "treebank-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A news corpus harvester with dependency-pattern search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a crawl configuration and print it
    Validate {
        /// Path to the JSON or TOML configuration file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Crawl the seed pages and store articles in the corpus directory
    Scrape {
        /// Path to the JSON or TOML configuration file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        #[command(flatten)]
        assets: AssetsArg,

        /// Pause after each HTTP request, in milliseconds
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,
    },

    /// Clean and annotate the corpus with UDPipe
    Annotate {
        #[command(flatten)]
        assets: AssetsArg,

        #[command(flatten)]
        analyzer: AnalyzerArgs,

        /// Also record POS frequencies in the metadata
        #[arg(long)]
        pos_frequencies: bool,
    },

    /// Search the annotated corpus for a syntactic pattern
    Search {
        /// Pattern as ROOT,relation,CHILD (e.g. VERB,nsubj,NOUN)
        #[arg(short, long)]
        pattern: SyntacticPattern,

        #[command(flatten)]
        assets: AssetsArg,

        /// Report file (defaults to pattern_search.json in the corpus directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct AssetsArg {
    /// Corpus directory
    #[arg(long = "assets", value_name = "DIR", default_value = "tmp/articles")]
    path: PathBuf,
}

#[derive(Args, Debug)]
struct AnalyzerArgs {
    /// UDPipe REST API base URL
    #[arg(long, requires = "model", conflicts_with = "udpipe_bin")]
    udpipe_url: Option<String>,

    /// Model name for the REST API
    #[arg(long)]
    model: Option<String>,

    /// Path to the udpipe binary
    #[arg(long, requires = "model_path")]
    udpipe_bin: Option<PathBuf>,

    /// Path to the UDPipe model file
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// Request timeout for the REST API, in seconds (0 for none)
    #[arg(long, default_value_t = 60)]
    udpipe_timeout: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Validate { config } => handle_validate(&config),
        Command::Scrape {
            config,
            assets,
            delay_ms,
        } => handle_scrape(&config, &assets.path, Duration::from_millis(delay_ms)),
        Command::Annotate {
            assets,
            analyzer,
            pos_frequencies,
        } => handle_annotate(&assets.path, &analyzer, pos_frequencies),
        Command::Search {
            pattern,
            assets,
            output,
        } => {
            let output = output.unwrap_or_else(|| assets.path.join(PATTERN_REPORT_FILE));
            handle_search(&assets.path, pattern, &output)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("treebank_harvest=info,warn"),
            1 => EnvFilter::new("treebank_harvest=debug,info"),
            2 => EnvFilter::new("treebank_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `validate`: loads the configuration and prints it
fn handle_validate(path: &Path) -> Result<()> {
    let config = load_config(path)
        .with_context(|| format!("invalid configuration {}", path.display()))?;

    print_config(&config);
    println!("\n✓ Configuration is valid");
    Ok(())
}

fn print_config(config: &CrawlConfig) {
    println!("=== Crawl Configuration ===\n");
    println!("Seed URLs ({}):", config.seed_urls().len());
    for seed in config.seed_urls() {
        println!("  - {}", seed);
    }
    println!("\nArticles to collect: {}", config.total_articles());
    println!("Encoding: {}", config.encoding());
    match config.timeout() {
        Some(timeout) => println!("Timeout: {}s", timeout.as_secs()),
        None => println!("Timeout: none"),
    }
    println!("Verify certificate: {}", config.verify_certificate());
    println!("Headless mode: {}", config.headless_mode());
    println!("\nHeaders ({}):", config.headers().len());
    for (name, value) in config.headers() {
        println!("  {}: {}", name, value);
    }
}

/// Handles `scrape`: recreates the corpus directory and fills it
fn handle_scrape(config_path: &Path, assets: &Path, delay: Duration) -> Result<()> {
    tracing::info!("Loading configuration from: {}", config_path.display());
    let (config, hash) = load_config_with_hash(config_path)
        .with_context(|| format!("invalid configuration {}", config_path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    let storage = FileStorage::prepare(assets)
        .with_context(|| format!("cannot prepare corpus directory {}", assets.display()))?;

    let stats = harvest(&config, &storage, delay).context("scrape failed")?;
    print_statistics(&stats);
    Ok(())
}

/// Handles `annotate`: cleans, annotates and optionally counts POS tags
fn handle_annotate(assets: &Path, args: &AnalyzerArgs, pos_frequencies: bool) -> Result<()> {
    let analyzer = bootstrap_analyzer(args)?;
    let storage = FileStorage::new(assets);
    let mut corpus = CorpusManager::new(assets)
        .with_context(|| format!("cannot load corpus {}", assets.display()))?;
    let total = corpus.len();

    let summary = TextProcessingPipeline::new(&mut corpus, &storage, Some(analyzer.as_ref()))
        .run()
        .context("annotation failed")?;
    print_annotation_summary(&summary, total);

    if pos_frequencies {
        let updated = PosFrequencyPipeline::new(&mut corpus, &storage)
            .run()
            .context("POS frequency counting failed")?;
        println!("  POS frequencies recorded: {}", updated);
    }

    Ok(())
}

fn bootstrap_analyzer(args: &AnalyzerArgs) -> Result<Box<dyn ConlluAnalyzer>> {
    if let (Some(url), Some(model)) = (&args.udpipe_url, &args.model) {
        let timeout = (args.udpipe_timeout > 0).then(|| Duration::from_secs(args.udpipe_timeout));
        let analyzer = UdpipeServiceAnalyzer::bootstrap(url, model, timeout)
            .context("cannot reach UDPipe service")?;
        return Ok(Box::new(analyzer));
    }

    if let (Some(binary), Some(model)) = (&args.udpipe_bin, &args.model_path) {
        let analyzer =
            UdpipeCliAnalyzer::bootstrap(binary, model).context("cannot start UDPipe")?;
        return Ok(Box::new(analyzer));
    }

    anyhow::bail!("either --udpipe-url with --model or --udpipe-bin with --model-path is required")
}

/// Handles `search`: runs the pattern search and writes the report
fn handle_search(assets: &Path, pattern: SyntacticPattern, output: &Path) -> Result<()> {
    let storage = FileStorage::new(assets);
    let corpus = CorpusManager::new(assets)
        .with_context(|| format!("cannot load corpus {}", assets.display()))?;

    let report = PatternSearchPipeline::new(&corpus, &storage, pattern)
        .run(output)
        .context("pattern search failed")?;
    print_report_summary(&report);
    println!("\n✓ Report written to: {}", output.display());
    Ok(())
}
