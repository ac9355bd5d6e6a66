use crate::config::LoaderConfig;
use crate::error::{RagError, Result};
use crate::Document;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Load every eligible file under `dir` into memory.
///
/// Files are returned sorted by their path relative to `dir`, so document
/// positions are stable across runs over the same tree.
pub fn load_documents(dir: &Path, config: &LoaderConfig) -> Result<Vec<Document>> {
    config.validate()?;
    if !dir.exists() {
        return Err(RagError::NotFound(dir.to_path_buf()));
    }
    // a plain file is not a corpus root
    if !dir.is_dir() {
        return Err(RagError::EmptyCorpus(dir.to_path_buf()));
    }
    let extensions = config.normalized_extensions();

    let mut files: Vec<(PathBuf, PathBuf)> = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable corpus entry");
                continue;
            }
        };
        let p = entry.path();
        // follows symlinks, so linked files are indexed like regular ones
        if !p.is_file() {
            continue;
        }
        let eligible = p
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false);
        if !eligible {
            continue;
        }
        let rel = p.strip_prefix(dir).unwrap_or(p).to_path_buf();
        files.push((rel, p.to_path_buf()));
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut documents = Vec::with_capacity(files.len());
    for (rel, path) in files {
        let bytes = fs::read(&path)?;
        let content = truncate_chars(decode_lossy(&bytes), config.max_chars_per_doc);
        documents.push(Document {
            id: rel.to_string_lossy().into_owned(),
            source: path.to_string_lossy().into_owned(),
            content,
        });
    }

    if documents.is_empty() {
        return Err(RagError::EmptyCorpus(dir.to_path_buf()));
    }
    tracing::info!(dir = %dir.display(), num_docs = documents.len(), "loaded corpus");
    Ok(documents)
}

/// Decode UTF-8, dropping invalid byte sequences.
fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

fn truncate_chars(mut s: String, max_chars: usize) -> String {
    if let Some((byte_idx, _)) = s.char_indices().nth(max_chars) {
        s.truncate(byte_idx);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_is_dropped() {
        assert_eq!(decode_lossy(b"ab\xffcd\xc3"), "abcd");
        assert_eq!(decode_lossy("héllo".as_bytes()), "héllo");
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("abcdefgh".into(), 5), "abcde");
        assert_eq!(truncate_chars("ééééé".into(), 2), "éé");
        assert_eq!(truncate_chars("abc".into(), 10), "abc");
    }
}
