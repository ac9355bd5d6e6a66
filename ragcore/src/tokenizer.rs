use crate::config::DEFAULT_TOKEN_PATTERN;
use crate::error::{RagError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DEFAULT: Tokenizer = Tokenizer::new(DEFAULT_TOKEN_PATTERN).expect("valid regex");
}

/// Lower-cases text and extracts the maximal matches of a term pattern.
///
/// The pattern is applied to the lower-cased text, so it should be written
/// in lower case. Indexing and querying must share one tokenizer.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    re: Regex,
}

impl Tokenizer {
    pub fn new(pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern)
            .map_err(|e| RagError::InvalidArgument(format!("token pattern {pattern:?}: {e}")))?;
        Ok(Self { re })
    }

    pub fn pattern(&self) -> &str {
        self.re.as_str()
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.re
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        DEFAULT.clone()
    }
}

/// Tokenize with the default `[a-z0-9]+` pattern.
pub fn tokenize(text: &str) -> Vec<String> {
    DEFAULT.tokenize(text)
}
