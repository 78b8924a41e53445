use anyhow::Result;
use cinematch_core::config::{DEFAULT_CUTOFF, DEFAULT_TOP_K};
use cinematch_core::tokenizer::TokenizerOptions;
use cinematch_core::{Catalog, Error, RecommendError, Recommendation, Recommender, RecommenderConfig};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recommender")]
#[command(about = "Recommend movies similar to one you like", long_about = None)]
pub struct Args {
    /// Catalog file (.csv, .json or .jsonl) with a `title` column
    #[arg(long, env = "CINEMATCH_DATA", default_value = "movies.csv")]
    pub data: PathBuf,
    /// Feature columns combined, in order, into each movie's document
    #[arg(long, value_delimiter = ',', default_value = "genres,keywords,cast,director")]
    pub features: Vec<String>,
    /// Number of recommendations
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub count: usize,
    /// Minimum title similarity (0.0-1.0) for the query to match
    #[arg(long, default_value_t = DEFAULT_CUTOFF, value_parser = parse_cutoff)]
    pub cutoff: f64,
    /// Strip accents before tokenizing
    #[arg(long, default_value_t = false)]
    pub strip_accents: bool,
    /// Movie title to start from; prompted for on stdin when omitted
    #[arg(long)]
    pub query: Option<String>,
    /// Print the recommendation as JSON
    #[arg(long, default_value_t = false, conflicts_with = "scores")]
    pub json: bool,
    /// Print similarity scores next to titles
    #[arg(long, default_value_t = false)]
    pub scores: bool,
}

impl Args {
    pub fn config(&self) -> RecommenderConfig {
        RecommenderConfig::default()
            .with_features(self.features.iter().map(|f| f.trim()).filter(|f| !f.is_empty()))
            .with_top_k(self.count)
            .with_cutoff(self.cutoff)
            .with_tokenizer(TokenizerOptions { strip_accents: self.strip_accents })
    }
}

fn parse_cutoff(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&v) { Ok(v) } else { Err(format!("{v} is not in 0.0..=1.0")) }
}

/// Load the catalog, read the query, and print recommendations to `out`.
///
/// Returns `Ok(false)` when a catalog, index or query error was reported to the user.
pub fn run<R: BufRead, W: Write>(args: &Args, input: &mut R, out: &mut W) -> Result<bool> {
    let config = args.config();
    let catalog = match Catalog::from_path(&args.data) {
        Ok(c) => c,
        Err(e) => return report(out, e.into()),
    };

    let query = match &args.query {
        Some(q) => q.clone(),
        None => prompt(input, out)?,
    };

    let recommender = match Recommender::new(catalog, config) {
        Ok(r) => r,
        Err(e) => return report(out, e.into()),
    };
    let rec = match recommender.recommend(&query) {
        Ok(rec) => rec,
        Err(e) => return report(out, e.into()),
    };
    tracing::info!(query = %query, matched = %rec.matched_title, results = rec.results.len(), "recommended");

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&rec)?)?;
    } else {
        render(out, &rec, args.scores)?;
    }
    Ok(true)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    write!(out, "Enter your favourite movie: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn render<W: Write>(out: &mut W, rec: &Recommendation, scores: bool) -> Result<()> {
    writeln!(out, "\nMovies recommended for you: ")?;
    for item in &rec.results {
        if scores {
            writeln!(out, "{} ({:.4})", item.title, item.score)?;
        } else {
            writeln!(out, "{}", item.title)?;
        }
    }
    Ok(())
}

fn report<W: Write>(out: &mut W, err: Error) -> Result<bool> {
    tracing::debug!(error = %err, "request failed");
    match err {
        Error::Recommend(RecommendError::NoMatch { .. }) => writeln!(out, "no matches found!")?,
        other => writeln!(out, "error: {other}")?,
    }
    Ok(false)
}
