//! Defaults and loader configuration.
//!
//! Runtime overrides come from the binaries' CLI flags and environment.

use crate::error::{RagError, Result};
use serde::{Deserialize, Serialize};

/// File extensions picked up by the corpus loader, lower-case, with leading dot.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".md", ".txt", ".json", ".csv"];

/// Characters kept per document; longer files are cut to this prefix.
pub const DEFAULT_MAX_CHARS_PER_DOC: usize = 12_000;

pub const DEFAULT_TOP_K: usize = 3;

/// Upper bound on `k` accepted by the HTTP surface.
pub const MAX_TOP_K: usize = 100;

pub const EXCERPT_MAX_LEN: usize = 400;

/// Characters of context kept before the matched term in an excerpt.
pub const EXCERPT_LEAD: usize = 120;

pub const DEFAULT_TOKEN_PATTERN: &str = r"[a-z0-9]+";

/// Query used when the caller supplies none.
pub const DEFAULT_POLICY_QUERY: &str = "road transport decarbonization policy evaluation carbon price \
     fuel tax subsidy congestion charge AI efficiency";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub extensions: Vec<String>,
    pub max_chars_per_doc: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_chars_per_doc: DEFAULT_MAX_CHARS_PER_DOC,
        }
    }
}

impl LoaderConfig {
    /// Build a config from a comma-separated extension list such as `"md,txt"`.
    pub fn from_extension_list(list: &str, max_chars_per_doc: usize) -> Result<Self> {
        let extensions = list.split(',').map(|s| s.trim().to_string()).collect();
        let cfg = Self { extensions, max_chars_per_doc };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(RagError::InvalidArgument("extension list is empty".into()));
        }
        for ext in &self.extensions {
            let bare = ext.trim_start_matches('.');
            if bare.is_empty() || bare.contains(|c: char| matches!(c, '/' | '\\' | '.')) {
                return Err(RagError::InvalidArgument(format!("malformed extension: {ext:?}")));
            }
        }
        if self.max_chars_per_doc == 0 {
            return Err(RagError::InvalidArgument("max_chars_per_doc must be positive".into()));
        }
        Ok(())
    }

    /// Extensions normalised to lower case without the leading dot, as
    /// `Path::extension` reports them.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .collect()
    }
}
