use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gamesearch_core::{EngineConfig, SearchEngine, SearchParams};
use gamesearch_loader::load_corpus;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod output;
mod repl;

#[derive(Parser)]
#[command(name = "gamesearch")]
#[command(about = "Search a corpus of video game pages by name, genre, platform or description", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search loop (type `iquit` to quit)
    Repl {
        #[command(flatten)]
        engine: EngineArgs,
        /// File rewritten with the results of each query
        #[arg(long, default_value = "search_results.txt")]
        output: PathBuf,
    },
    /// Run a single query and exit
    Search {
        #[command(flatten)]
        engine: EngineArgs,
        /// Query text
        #[arg(long, short)]
        query: String,
        /// Also write results to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct EngineArgs {
    /// Corpus path: a directory of .html game pages and/or .json/.jsonl records, or one such file
    #[arg(long, default_value = "./videogames")]
    corpus: PathBuf,
    /// JSON engine config (analyzer, weighting, scoring policy, default search params)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of top-ranked candidates to consider
    #[arg(short, long)]
    k: Option<usize>,
    /// Minimum raw similarity a candidate must exceed, in [0, 1)
    #[arg(long)]
    floor: Option<f64>,
}

impl EngineArgs {
    fn load(&self) -> Result<(SearchEngine, SearchParams)> {
        let config = match &self.config {
            Some(path) => EngineConfig::from_path(path)?,
            None => EngineConfig::default(),
        };
        let mut params = config.search;
        if let Some(k) = self.k { params.k = k; }
        if let Some(floor) = self.floor { params.similarity_floor = floor; }
        params.validate()?;

        let docs = load_corpus(&self.corpus).with_context(|| format!("loading corpus from {}", self.corpus.display()))?;
        let engine = SearchEngine::build(docs, config).context("building search engine")?;
        Ok((engine, params))
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Repl { engine, output } => {
            let (engine, params) = engine.load()?;
            repl::run(&engine, params, &output, io::stdin().lock(), io::stdout().lock())
        }
        Commands::Search { engine, query, output } => {
            let (engine, params) = engine.load()?;
            let report = engine.search(&query, params)?;
            output::render_console(&report, &mut io::stdout().lock())?;
            if let Some(path) = output {
                output::write_results_file(&path, &report)?;
            }
            Ok(())
        }
    }
}
