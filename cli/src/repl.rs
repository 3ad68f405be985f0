use crate::output;
use anyhow::Result;
use gamesearch_core::{SearchEngine, SearchParams};
use std::io::{BufRead, Write};
use std::path::Path;

pub const QUIT_COMMAND: &str = "iquit";

const BANNER: &str = "Videogame Search Engine
^^^^^^^^^^^^^^^^^^^^^^^
=====================================================================
Search for games by name, genre, platform, or description.
For example: 'basketball games', 'RPG' or 'multiplayer action titles.'
(type iquit to quit)
=====================================================================";

/// Prompt loop until `iquit` or end of input. A rejected query never ends the loop.
pub fn run<R: BufRead, W: Write>(engine: &SearchEngine, params: SearchParams, results_path: &Path, input: R, mut out: W) -> Result<()> {
    writeln!(out, "{BANNER}")?;
    let mut lines = input.lines();
    loop {
        write!(out, "\nSearch: ")?;
        out.flush()?;
        let Some(line) = lines.next() else { break };
        let query = line?.trim().to_string();
        if query.eq_ignore_ascii_case(QUIT_COMMAND) {
            writeln!(out, "Quitting....")?;
            break;
        }
        if query.is_empty() {
            writeln!(out, "Please enter a valid query.")?;
            continue;
        }
        match engine.search(&query, params) {
            Ok(report) => {
                output::render_console(&report, &mut out)?;
                if let Err(e) = output::write_results_file(results_path, &report) {
                    tracing::warn!(error = %e, path = %results_path.display(), "could not write results file");
                }
            }
            Err(e) => writeln!(out, "Search rejected: {e}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamesearch_core::Document;

    fn engine() -> SearchEngine {
        SearchEngine::with_defaults(vec![
            Document::new("a.html", "space adventure").with_title("Space RPG"),
            Document::new("b.html", "fast car").with_title("Racing"),
            Document::new("c.html", "space race rpg").with_title("Space Racing RPG"),
        ])
        .unwrap()
    }

    fn session(input: &str, params: SearchParams) -> (String, Option<String>) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search_results.txt");
        let mut out = Vec::new();
        run(&engine(), params, &path, input.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), std::fs::read_to_string(&path).ok())
    }

    #[test]
    fn searches_until_quit() {
        let (text, file) = session("space rpg\n\n  IQUIT \nspace\n", SearchParams::default());
        assert!(text.starts_with("Videogame Search Engine"));
        assert!(text.contains("Title: Space Racing RPG"));
        assert!(text.contains("Precision@10: 0.20"));
        assert!(text.contains("Please enter a valid query."));
        assert!(text.ends_with("Quitting....\n"));
        assert!(file.unwrap().contains("File: c.html"));
    }

    #[test]
    fn end_of_input_ends_the_loop() {
        let (text, file) = session("the a an\n", SearchParams::default());
        assert!(text.contains("No results found."));
        assert!(!text.contains("Quitting"));
        assert_eq!(file.as_deref(), Some(""));
    }

    #[test]
    fn rejected_query_keeps_looping() {
        let (text, _) = session("space\niquit\n", SearchParams::new(0, 0.1));
        assert!(text.contains("Search rejected: invalid parameter `k`"));
        assert!(text.contains("Quitting...."));
    }
}
