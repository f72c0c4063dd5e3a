use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "boolir-cmd")]
#[command(about = "Build boolean retrieval indexes and run queries against them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from a directory of documents named by their ids
    Index {
        /// Directory of documents
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Output dictionary file
        #[arg(short = 'd', long)]
        dictionary: PathBuf,

        /// Output postings file
        #[arg(short = 'p', long)]
        postings: PathBuf,

        /// Memory limit, in (term, document) pairs
        #[arg(long, default_value_t = 100_000)]
        memory_limit: usize,

        /// Directory for intermediate block files (a temporary directory if omitted)
        #[arg(long)]
        work_dir: Option<PathBuf>,

        /// Tokenizer used to split documents into words
        #[arg(long, default_value = "unicode-word")]
        tokenizer: String,

        /// Index terms without stemming
        #[arg(long)]
        no_stemming: bool,
    },

    /// Evaluate a file of queries, one per line, and write one result line per query
    Search {
        /// Dictionary file
        #[arg(short = 'd', long)]
        dictionary: PathBuf,

        /// Postings file
        #[arg(short = 'p', long)]
        postings: PathBuf,

        /// File of queries
        #[arg(short = 'q', long)]
        queries: PathBuf,

        /// Output file of results
        #[arg(short = 'o', long)]
        output: PathBuf,
    },

    /// Print the posting list of a single term
    Lookup {
        /// Dictionary file
        #[arg(short = 'd', long)]
        dictionary: PathBuf,

        /// Postings file
        #[arg(short = 'p', long)]
        postings: PathBuf,

        /// Term to look up; tokenized and normalized the same way as query terms
        term: String,
    },

    /// Display summary information about an index
    Inspect {
        /// Dictionary file
        #[arg(short = 'd', long)]
        dictionary: PathBuf,

        /// Postings file
        #[arg(short = 'p', long)]
        postings: PathBuf,

        /// Also list the N most frequent terms
        #[arg(long)]
        top: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Index {
            input,
            dictionary,
            postings,
            memory_limit,
            work_dir,
            tokenizer,
            no_stemming,
        } => commands::index::run(commands::index::IndexArgs {
            input,
            dictionary,
            postings,
            memory_limit,
            work_dir,
            tokenizer,
            stemming: !no_stemming,
        }),
        Commands::Search {
            dictionary,
            postings,
            queries,
            output,
        } => commands::search::run(&dictionary, &postings, &queries, &output),
        Commands::Lookup {
            dictionary,
            postings,
            term,
        } => commands::lookup::run(&dictionary, &postings, &term),
        Commands::Inspect {
            dictionary,
            postings,
            top,
        } => commands::inspect::run(&dictionary, &postings, top),
    }
}
