use anyhow::{Context, Result};
use gamesearch_core::Document;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Pre-extracted game record, one per JSON object or JSONL line.
#[derive(Debug, Deserialize)]
struct InputDoc {
    id: String,
    #[serde(default)]
    title: Option<String>,
    body: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    meta: IndexMap<String, String>,
}

impl From<InputDoc> for Document {
    fn from(doc: InputDoc) -> Self {
        Document {
            external_id: doc.id,
            title: doc.title.filter(|t| !t.trim().is_empty()),
            url: doc.url,
            metadata: doc.meta,
            body: doc.body,
        }
    }
}

pub fn read_jsonl(file: &Path) -> Result<Vec<Document>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let mut docs = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid record", file.display(), lineno + 1))?;
        docs.push(doc.into());
    }
    Ok(docs)
}

/// Accepts either a single record object or an array of records.
pub fn read_json(file: &Path) -> Result<Vec<Document>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader).with_context(|| format!("parsing {}", file.display()))?;
    let docs = match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(|v| serde_json::from_value::<InputDoc>(v).map(Document::from))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("{}: invalid record", file.display()))?,
        serde_json::Value::Object(_) => {
            let doc: InputDoc = serde_json::from_value(json).with_context(|| format!("{}: invalid record", file.display()))?;
            vec![doc.into()]
        }
        _ => {
            tracing::warn!(file = %file.display(), "json file holds neither an object nor an array");
            Vec::new()
        }
    };
    Ok(docs)
}
