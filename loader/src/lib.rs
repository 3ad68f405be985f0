//! Corpus acquisition: turns game pages and JSON record files into [`Document`]s.
//!
//! Files are visited in sorted path order so that document ids are stable
//! across runs over the same directory.

pub mod html;
pub mod records;

use anyhow::{bail, Result};
use gamesearch_core::Document;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    GamePage,
    Json,
    JsonLines,
}

fn source_kind(path: &Path) -> Option<SourceKind> {
    let ext = path.extension().and_then(|s| s.to_str())?.to_ascii_lowercase();
    match ext.as_str() {
        "html" | "htm" => Some(SourceKind::GamePage),
        "json" => Some(SourceKind::Json),
        "jsonl" => Some(SourceKind::JsonLines),
        _ => None,
    }
}

/// Collect loadable files under `input` (a file or a directory), sorted.
pub fn discover_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && source_kind(p).is_some() {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("corpus path {} does not exist", input.display());
    }
    files.sort();
    Ok(files)
}

/// Load every supported file under `path`. Document ids follow load order.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let files = discover_files(path.as_ref())?;
    let mut docs: Vec<Document> = Vec::new();
    for file in &files {
        match source_kind(file) {
            Some(SourceKind::GamePage) => docs.push(html::load_game_page(file)?),
            Some(SourceKind::Json) => docs.extend(records::read_json(file)?),
            Some(SourceKind::JsonLines) => docs.extend(records::read_jsonl(file)?),
            None => tracing::debug!(file = %file.display(), "skipping unsupported file"),
        }
    }
    tracing::info!(num_files = files.len(), num_docs = docs.len(), "corpus loaded");
    Ok(docs)
}
