use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use pharmacy_search::config::AppConfig;
use pharmacy_search::core::catalog::{CatalogSource, JsonFileCatalog};
use pharmacy_search::core::logging;
use pharmacy_search::core::preprocess::{paths, DictionaryGenerator, WordNetImporter};
use pharmacy_search::core::search::{ProductSearch, SearchResources};
use pharmacy_search::server::{self, AppState};

#[derive(Parser)]
#[command(name = "pharmacy-search")]
#[command(about = "Natural-language product search for pharmacy catalogs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ~/.config/pharmacy-search/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a catalog and print ranked items as JSON
    Search(SearchArgs),

    /// Serve GET /items/search over HTTP
    Serve(ServeArgs),

    /// Generate a spelling dictionary from catalog text
    #[command(name = "build-dictionary")]
    BuildDictionary(BuildDictionaryArgs),

    /// Import synsets and noun exceptions from a WordNet database
    #[command(name = "build-lexicon")]
    BuildLexicon(BuildLexiconArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Catalog JSON export (falls back to data.catalog_path)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Include similarity scores
    #[arg(long)]
    scores: bool,

    /// Print the corrected, normalized and expanded query instead of results
    #[arg(long)]
    explain: bool,
}

#[derive(Args)]
struct ServeArgs {
    /// Catalog JSON export (falls back to data.catalog_path)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Bind address, e.g. 127.0.0.1:8080 (falls back to server.bind)
    #[arg(long)]
    bind: Option<String>,
}

#[derive(Args)]
struct BuildDictionaryArgs {
    /// Catalog JSON export (falls back to data.catalog_path)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output file (defaults to the user data directory)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Frequency multiplier for catalog terms
    #[arg(long, default_value_t = 10)]
    boost: u64,

    /// Minimum occurrences for a term to be written
    #[arg(long, default_value_t = 1)]
    min_frequency: u64,
}

#[derive(Args)]
struct BuildLexiconArgs {
    /// WordNet `dict/` directory (data.noun, data.verb, data.adj, data.adv, noun.exc)
    #[arg(long)]
    wordnet_dir: PathBuf,

    /// Output directory (defaults to the data directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init(if cli.verbose { "debug" } else { "info" });
    log::debug!("{} v{} starting", pharmacy_search::NAME, pharmacy_search::VERSION);

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    match cli.command {
        Commands::Search(args) => run_search(&config, args),
        Commands::Serve(args) => run_serve(&config, args).await,
        Commands::BuildDictionary(args) => run_build_dictionary(&config, args),
        Commands::BuildLexicon(args) => run_build_lexicon(&config, args),
    }
}

fn catalog_path(config: &AppConfig, arg: Option<PathBuf>) -> Result<PathBuf> {
    arg.or_else(|| config.data.catalog_path.clone())
        .context("No catalog given: pass --catalog or set data.catalog_path")
}

fn load_catalog(path: &Path) -> Result<JsonFileCatalog> {
    JsonFileCatalog::load(path).with_context(|| format!("Failed to load catalog {}", path.display()))
}

fn build_search(config: &AppConfig, catalog: Arc<dyn CatalogSource>) -> Result<ProductSearch> {
    let mut search_config = config.search.clone();
    search_config.resolve_data_files(&config.data_dir());

    let resources = SearchResources::init_global(&search_config)
        .context("Failed to load search resources")?;
    Ok(ProductSearch::new(resources, catalog))
}

fn run_search(config: &AppConfig, args: SearchArgs) -> Result<()> {
    let path = catalog_path(config, args.catalog)?;
    let search = build_search(config, Arc::new(load_catalog(&path)?))?;

    let output = if args.explain {
        serde_json::to_string_pretty(&search.process(&args.query)?)?
    } else if args.scores {
        serde_json::to_string_pretty(&search.search_scored(&args.query)?)?
    } else {
        serde_json::to_string_pretty(&search.search(&args.query)?)?
    };

    println!("{output}");
    Ok(())
}

async fn run_serve(config: &AppConfig, args: ServeArgs) -> Result<()> {
    let path = catalog_path(config, args.catalog)?;
    let search = build_search(config, Arc::new(load_catalog(&path)?))?;
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());

    let state = AppState::new(Arc::new(search), config.server.search_timeout());
    server::serve(state, &bind)
        .await
        .with_context(|| format!("Search server on {bind} failed"))
}

fn run_build_dictionary(config: &AppConfig, args: BuildDictionaryArgs) -> Result<()> {
    let path = catalog_path(config, args.catalog)?;
    let catalog = load_catalog(&path)?;
    let items = catalog.snapshot()?;

    let output = args
        .output
        .unwrap_or_else(|| paths::corpus_dictionary_path(&config.data_dir()));

    let generator = DictionaryGenerator::new(args.boost, 2, args.min_frequency);
    let written = generator.build_from_catalog(&items, &output)?;

    println!("Wrote {} terms to {}", written, output.display());
    Ok(())
}

fn run_build_lexicon(config: &AppConfig, args: BuildLexiconArgs) -> Result<()> {
    let output_dir = args.output_dir.unwrap_or_else(|| config.data_dir());
    let summary = WordNetImporter::new(&args.wordnet_dir)
        .import_into(&output_dir)
        .with_context(|| format!("Failed to import WordNet from {}", args.wordnet_dir.display()))?;

    println!(
        "Wrote {} synsets to {} and {} noun exceptions to {}",
        summary.synsets,
        summary.lexicon_path.display(),
        summary.exceptions,
        summary.exceptions_path.display()
    );
    Ok(())
}
