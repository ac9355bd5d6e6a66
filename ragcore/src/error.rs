use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while loading a corpus or configuring the pipeline.
///
/// Searching never fails: every variant here comes from load or build time.
#[derive(Debug, Error)]
pub enum RagError {
    /// The corpus directory does not exist.
    #[error("corpus directory not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No file under the corpus directory passed the extension filter.
    #[error("no readable documents found in {}", .0.display())]
    EmptyCorpus(PathBuf),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RagError>;
