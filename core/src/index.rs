use crate::error::BuildError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type TermId = u32;
pub type DocId = u32;

/// One corpus record as handed over by the loader. Immutable once the engine is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// File name or record id, unique within one corpus.
    pub external_id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    /// Field name -> field value, in source order.
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
    /// Raw text body; tokenized at build time, never scored verbatim.
    pub body: String,
}

impl Document {
    pub fn new(external_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self { external_id: external_id.into(), body: body.into(), ..Default::default() }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(name.into(), value.into());
        self
    }
}

/// Token -> column mapping plus per-term document frequencies.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    num_docs: u32,
}

impl Vocabulary {
    /// Assign column ids in first-occurrence order over `documents`.
    pub fn build<S: AsRef<str>>(documents: &[Vec<S>]) -> Result<Self, BuildError> {
        let mut dictionary: HashMap<String, TermId> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        for tokens in documents {
            let mut seen_in_doc: HashSet<TermId> = HashSet::new();
            for term in tokens {
                let next_id = dictionary.len() as TermId;
                let tid = *dictionary.entry(term.as_ref().to_string()).or_insert(next_id);
                if tid == next_id { df.push(0); }
                if seen_in_doc.insert(tid) {
                    df[tid as usize] += 1;
                }
            }
        }
        // Also covers documents.is_empty()
        if dictionary.is_empty() {
            return Err(BuildError::EmptyCorpus);
        }
        Ok(Self { dictionary, df, num_docs: documents.len() as u32 })
    }

    pub fn len(&self) -> usize { self.dictionary.len() }

    pub fn is_empty(&self) -> bool { self.dictionary.is_empty() }

    pub fn num_docs(&self) -> u32 { self.num_docs }

    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    pub fn doc_frequency(&self, tid: TermId) -> u32 { self.df.get(tid as usize).copied().unwrap_or(0) }

    pub fn terms(&self) -> impl Iterator<Item = (&str, TermId)> {
        self.dictionary.iter().map(|(t, id)| (t.as_str(), *id))
    }
}

/// Dense per-document weight vectors over one vocabulary. Row `i` belongs to document `i`.
#[derive(Debug, Clone)]
pub struct TermWeightMatrix {
    rows: Vec<Vec<f32>>,
}

impl TermWeightMatrix {
    pub(crate) fn from_rows(rows: Vec<Vec<f32>>) -> Self { Self { rows } }

    pub fn num_docs(&self) -> usize { self.rows.len() }

    pub fn row(&self, doc_id: DocId) -> Option<&[f32]> { self.rows.get(doc_id as usize).map(Vec::as_slice) }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> { self.rows.iter().map(Vec::as_slice) }
}
