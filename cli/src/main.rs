use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use search_core::{SearchHit, SearchIndex};
use search_crawler::index_directory;
use tracing_subscriber::{fmt, EnvFilter};

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Index a directory of pages and run AND-queries against it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Directory holding .html pages and .json/.jsonl feeds
    #[arg(long, default_value = "input_pages")]
    input: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single query and print ranked results
    Query {
        #[command(flatten)]
        input: InputArgs,
        /// Query text; every term must match
        query: String,
        /// Maximum number of results to print (at least 1)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        limit: Option<u64>,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Read queries from stdin until `exit` or end of input
    Repl {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print index statistics
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { input, query, limit, json } => {
            let index = load(&input)?;
            let mut hits = index.query(&query);
            if let Some(limit) = limit {
                hits.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                print_results(&mut io::stdout().lock(), &hits)?;
            }
            Ok(())
        }
        Commands::Repl { input } => {
            let index = load(&input)?;
            repl(&index, io::stdin().lock(), &mut io::stdout().lock())
        }
        Commands::Stats { input } => {
            let stats = load(&input)?.stats();
            println!("documents: {}", stats.num_docs);
            println!("terms:     {}", stats.num_terms);
            println!("postings:  {}", stats.num_postings);
            Ok(())
        }
    }
}

fn load(args: &InputArgs) -> Result<SearchIndex> {
    if !args.input.exists() {
        fs::create_dir_all(&args.input)?;
        bail!("created directory '{}'; add HTML files and run again", args.input.display());
    }
    let index = index_directory(&args.input)?;
    let stats = index.stats();
    eprintln!("Indexed {} pages with {} unique terms", stats.num_docs, stats.num_terms);
    Ok(index)
}

fn repl<R: BufRead, W: Write>(index: &SearchIndex, input: R, out: &mut W) -> Result<()> {
    writeln!(out, "Enter queries (or 'exit' to quit):")?;
    write!(out, "\nSearch: ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        let query = line.trim();
        if query.eq_ignore_ascii_case("exit") {
            break;
        }
        tracing::info!(query, "processing query");
        let hits = index.query(query);
        print_results(out, &hits)?;
        write!(out, "\nSearch: ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

fn print_results<W: Write>(out: &mut W, hits: &[SearchHit]) -> io::Result<()> {
    if hits.is_empty() {
        return writeln!(out, "No results found.");
    }
    writeln!(out, "Found {} results:", hits.len())?;
    for (i, hit) in hits.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, hit.title)?;
        for tc in &hit.term_frequencies {
            writeln!(out, "   '{}' appears {} times", tc.term, tc.count)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_core::IndexBuilder;

    fn index() -> SearchIndex {
        let mut b = IndexBuilder::new();
        b.add_document("file:///p/a.html", Some("Cats and Dogs"), "the cat sat on the mat with a dog");
        b.add_document("file:///p/b.html", Some("Dog Training"), "dog training with a dog, dog");
        b.finish()
    }

    #[test]
    fn prints_ranked_results() {
        let mut out = Vec::new();
        print_results(&mut out, &index().query("dog")).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Found 2 results:\n1. Dog Training\n   'dog' appears 3 times\n"));
        assert!(text.contains("2. Cats and Dogs\n   'dog' appears 1 times\n"));
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(Cli::try_parse_from(["search", "query", "--limit", "0", "dog"]).is_err());
        let cli = Cli::try_parse_from(["search", "query", "--limit", "1", "dog"]).unwrap();
        match cli.command {
            Commands::Query { limit, query, .. } => {
                assert_eq!(limit, Some(1));
                assert_eq!(query, "dog");
            }
            _ => panic!("expected query subcommand"),
        }
    }

    #[test]
    fn repl_stops_at_exit() {
        let input = "elephant\nEXIT\ncat\n".as_bytes();
        let mut out = Vec::new();
        repl(&index(), input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No results found."));
        assert!(!text.contains("Found"));
    }
}
