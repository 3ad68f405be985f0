use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        // Contractions appear split at the apostrophe since the word pattern excludes it.
        let words: &[&str] = &[
            "a","about","above","after","again","against","ain","all","am","an","and","any","are","aren","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","couldn",
            "d","did","didn","do","does","doesn","doing","don","down","during",
            "each","few","for","from","further",
            "had","hadn","has","hasn","have","haven","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","isn","it","its","itself",
            "just","ll","m","ma","me","mightn","more","most","mustn","my","myself",
            "needn","no","nor","not","now","o","of","off","on","once","only","or","other","our","ours","ourselves","out","over","own",
            "re","s","same","shan","she","should","shouldn","so","some","such",
            "t","than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","ve","very",
            "was","wasn","we","were","weren","what","when","where","which","while","who","whom","why","will","with","won","wouldn",
            "y","you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Normalization policy shared by documents and queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Apply Snowball English stemming to every surviving token.
    pub stem: bool,
    /// Tokens shorter than this many characters are dropped.
    pub min_token_len: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { stem: false, min_token_len: 2 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self { Self { config } }

    /// Whether an already lowercased word survives the length and stopword filters.
    pub fn keeps(&self, token: &str) -> bool {
        token.chars().count() >= self.config.min_token_len && !is_stopword(token)
    }

    /// Tokenize text using NFKC normalization, lowercase, stopword removal and optional stemming.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        let mut tokens = Vec::new();
        for mat in RE.find_iter(&normalized) {
            let token = mat.as_str();
            if !self.keeps(token) { continue; }
            if self.config.stem {
                tokens.push(STEMMER.stem(token).into_owned());
            } else {
                tokens.push(token.to_string());
            }
        }
        tokens
    }
}

/// Tokenize with the default analyzer.
pub fn tokenize(text: &str) -> Vec<String> {
    Analyzer::default().tokenize(text)
}
