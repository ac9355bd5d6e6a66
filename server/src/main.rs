use anyhow::Result;
use axum::Router;
use clap::Parser;
use ragcore::config::{LoaderConfig, DEFAULT_MAX_CHARS_PER_DOC};
use ragcore::tokenizer::Tokenizer;
use server::{build_app, CorpusSource};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Corpus directory to index
    #[arg(long, default_value = "./data/knowledge_base")]
    dir: String,
    /// Comma-separated file extensions to include
    #[arg(long, default_value = "md,txt,json,csv")]
    ext: String,
    /// Maximum characters kept per document
    #[arg(long, default_value_t = DEFAULT_MAX_CHARS_PER_DOC)]
    max_chars: usize,
    /// Term pattern applied to lower-cased text
    #[arg(long)]
    token_pattern: Option<String>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let mut source = CorpusSource::new(&args.dir);
    source.loader = LoaderConfig::from_extension_list(&args.ext, args.max_chars)?;
    if let Some(pattern) = &args.token_pattern {
        source.tokenizer = Tokenizer::new(pattern)?;
    }
    let app: Router = build_app(source)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
