use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ragcore::config::{LoaderConfig, DEFAULT_MAX_CHARS_PER_DOC, DEFAULT_POLICY_QUERY, DEFAULT_TOP_K};
use ragcore::tokenizer::Tokenizer;
use ragcore::{load_documents, search, Index};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an in-memory TF-IDF index over local documents and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct CorpusArgs {
    /// Directory of local documents to index
    #[arg(long)]
    dir: PathBuf,
    /// Comma-separated file extensions to include
    #[arg(long, default_value = "md,txt,json,csv")]
    ext: String,
    /// Maximum characters kept per document
    #[arg(long, default_value_t = DEFAULT_MAX_CHARS_PER_DOC)]
    max_chars: usize,
    /// Term pattern applied to lower-cased text
    #[arg(long)]
    token_pattern: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank documents against a query and print the results as JSON
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Free-text query; a default policy query is used when omitted
        #[arg(long)]
        query: Option<String>,
        /// Number of results to return
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
    /// Print index statistics as JSON
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { corpus, query, top_k } => {
            let index = build_index(&corpus)?;
            let query = query.as_deref().unwrap_or(DEFAULT_POLICY_QUERY);
            let results = search(&index, query, top_k);
            tracing::info!(query, returned = results.len(), "search complete");
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Stats { corpus } => {
            let index = build_index(&corpus)?;
            println!("{}", serde_json::to_string_pretty(&index.stats())?);
        }
    }
    Ok(())
}

fn build_index(args: &CorpusArgs) -> Result<Index> {
    let config = LoaderConfig::from_extension_list(&args.ext, args.max_chars)?;
    let tokenizer = match &args.token_pattern {
        Some(p) => Tokenizer::new(p)?,
        None => Tokenizer::default(),
    };
    let documents = load_documents(&args.dir, &config)
        .with_context(|| format!("loading corpus from {}", args.dir.display()))?;
    Ok(Index::build_with(documents, tokenizer))
}
