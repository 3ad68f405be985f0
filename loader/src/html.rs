use anyhow::{Context, Result};
use gamesearch_core::Document;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use std::fs;
use std::path::Path;

lazy_static! {
    static ref SEL_TITLE: Selector = Selector::parse("span.contenttitle").expect("valid selector");
    static ref SEL_INFO_TABLE: Selector = Selector::parse("table.gameBioInfo").expect("valid selector");
    static ref SEL_ROW: Selector = Selector::parse("tr").expect("valid selector");
    static ref SEL_HEADER: Selector = Selector::parse("td.gameBioInfoHeader").expect("valid selector");
    static ref SEL_VALUE: Selector = Selector::parse("td.gameBioInfoText").expect("valid selector");
}

/// Read and parse one game page. The file name becomes the document id.
pub fn load_game_page(path: &Path) -> Result<Document> {
    let html = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let id = path
        .file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string());
    let abs = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let mut doc = parse_game_page(&id, &html);
    doc.url = Some(format!("file://{}", abs.display()));
    Ok(doc)
}

/// Text fragments of an element, trimmed, empties dropped.
fn stripped_strings<'a>(el: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    el.text().map(str::trim).filter(|s| !s.is_empty())
}

/// Extract title, bio-info table and full text from a game page.
pub fn parse_game_page(id: &str, html: &str) -> Document {
    let page = Html::parse_document(html);

    let title = page
        .select(&SEL_TITLE)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());
    if title.is_none() {
        tracing::warn!(file = id, "no title");
    }

    let mut metadata: IndexMap<String, String> = IndexMap::new();
    match page.select(&SEL_INFO_TABLE).next() {
        None => tracing::warn!(file = id, "no game info table"),
        Some(table) => {
            let rows: Vec<ElementRef> = table.select(&SEL_ROW).collect();
            if rows.is_empty() {
                tracing::warn!(file = id, "no rows in game info table");
            }
            for row in rows {
                let (Some(header), Some(value)) = (row.select(&SEL_HEADER).next(), row.select(&SEL_VALUE).next()) else {
                    tracing::warn!(file = id, "row missing header or value");
                    continue;
                };
                let key = header.text().collect::<String>().trim().to_string();
                // Multi-part values (platform lists, genre paths) keep their parts visible
                let value = stripped_strings(value).collect::<Vec<_>>().join(" / ");
                if !key.is_empty() && !value.is_empty() {
                    metadata.insert(key, value);
                }
            }
        }
    }

    let body = stripped_strings(page.root_element()).collect::<Vec<_>>().join(" ");
    Document { external_id: id.to_string(), title, url: None, metadata, body }
}
