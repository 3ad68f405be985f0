//! Console and results-file rendering of a [`SearchReport`].

use anyhow::{Context, Result};
use gamesearch_core::{SearchHit, SearchReport};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn display_title(hit: &SearchHit) -> &str { hit.title.as_deref().unwrap_or("Unknown") }

fn display_url(hit: &SearchHit) -> &str { hit.url.as_deref().unwrap_or("-") }

pub fn render_console<W: Write>(report: &SearchReport, out: &mut W) -> Result<()> {
    writeln!(out, "\n Search Results:")?;
    for hit in &report.results {
        writeln!(out, "    Title: {}", display_title(hit))?;
        writeln!(out, "    Game Info:")?;
        for (key, value) in &hit.metadata {
            writeln!(out, "        {key}: {value}")?;
        }
        writeln!(out, "    File: {}", hit.external_id)?;
        writeln!(out, "    URL: {}", display_url(hit))?;
        writeln!(out, "    Relevance: {} (Similarity: {:.2}%)\n", hit.relevance, hit.score)?;
    }
    if report.is_no_results() {
        writeln!(out, "No results found. Please try a broader search.")?;
    }
    writeln!(out, "\nPrecision@{}: {:.2}", report.k, report.precision_at_k)?;
    Ok(())
}

/// Overwrite `path` with one block per hit; raw similarity is reported, not the boosted score.
pub fn write_results_file(path: &Path, report: &SearchReport) -> Result<()> {
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(f);
    for hit in &report.results {
        writeln!(w, "File: {}", hit.external_id)?;
        writeln!(w, "URL: {}", display_url(hit))?;
        writeln!(w, "Title: {}", display_title(hit))?;
        writeln!(w, "Game Info:")?;
        for (key, value) in &hit.metadata {
            writeln!(w, "    {key}: {value}")?;
        }
        writeln!(w, "Relevance: {}", hit.relevance)?;
        writeln!(w, "Similarity: {:.4}", hit.similarity)?;
        writeln!(w, "\n---")?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamesearch_core::{Document, SearchEngine, SearchParams};

    fn report(query: &str) -> SearchReport {
        let docs = vec![
            Document::new("a.html", "space adventure").with_title("Space RPG").with_field("Genre", "RPG"),
            Document::new("b.html", "fast car"),
        ];
        SearchEngine::with_defaults(docs).unwrap().search(query, SearchParams::default()).unwrap()
    }

    #[test]
    fn console_lists_hits_and_precision() {
        let mut buf = Vec::new();
        render_console(&report("space"), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("    Title: Space RPG"));
        assert!(text.contains("        Genre: RPG"));
        assert!(text.contains("    File: a.html"));
        assert!(text.contains("Relevance: High relevance (Similarity: 100.00%)"));
        assert!(text.contains("Precision@10: 0.10"));
        assert!(!text.contains("No results found"));
    }

    #[test]
    fn console_signals_no_results() {
        let mut buf = Vec::new();
        render_console(&report("the a an"), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("No results found. Please try a broader search."));
        assert!(text.contains("Precision@10: 0.00"));
    }

    #[test]
    fn results_file_has_one_block_per_hit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search_results.txt");
        write_results_file(&path, &report("space")).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("File: a.html\n"));
        assert!(text.contains("Title: Space RPG\n"));
        assert!(text.contains("Relevance: High relevance\n"));
        assert_eq!(text.matches("---").count(), 1);
    }
}
