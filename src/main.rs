//! CLI interface for the question answering knowledge base

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use snippet_qa::embedding::{create_embedder, Embedder};
use snippet_qa::{AddOutcome, Answer, QaConfig, Retriever};

#[derive(Parser)]
#[command(name = "snippet-qa")]
#[command(about = "Answer questions from your own documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long, global = true, env = "SNIPPET_QA_CONFIG")]
    config: Option<PathBuf>,

    /// Embedding model identifier
    #[arg(long, global = true, env = "SNIPPET_QA_MODEL")]
    model: Option<String>,

    /// Embedding vector dimensions
    #[arg(long, global = true, env = "SNIPPET_QA_DIMENSION")]
    dimension: Option<usize>,

    /// Log filter (error, warn, info, debug, trace); defaults to RUST_LOG or info
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question
    Ask {
        /// The question to answer
        question: String,
        /// Text files to load; paragraphs separated by blank lines become documents
        #[arg(short, long, num_args = 1..)]
        docs: Vec<PathBuf>,
        /// Number of ranked results to list under the answer
        #[arg(long)]
        show: Option<usize>,
    },
    /// Interactive session: ask questions, add documents with a leading '+'
    Chat {
        /// Text files to load before the session starts
        #[arg(short, long, num_args = 1..)]
        docs: Vec<PathBuf>,
    },
    /// Start the HTTP API server
    Serve {
        /// Address to bind to
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
        /// Text files to load before serving
        #[arg(short, long, num_args = 1..)]
        docs: Vec<PathBuf>,
    },
}

fn load_docs<E: Embedder>(retriever: &mut Retriever<E>, paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        match retriever.add_text_blob(&content)? {
            AddOutcome::Added { count, .. } => {
                tracing::info!(path = %path.display(), count, "loaded documents");
            }
            AddOutcome::Empty => {
                tracing::warn!(path = %path.display(), "no paragraphs found");
            }
        }
    }
    Ok(())
}

fn print_answer(answer: &Answer, show: usize) {
    println!("{}\n", answer.text);
    if answer.results.is_empty() {
        return;
    }

    println!("Sources:");
    for result in answer.results.iter().take(show) {
        let preview: String = result.text.chars().take(80).collect();
        println!(
            "{}. (similarity: {:.4}) {}",
            result.rank, result.similarity, preview
        );
    }
}

fn chat<E: Embedder>(retriever: &mut Retriever<E>, show: usize) -> Result<()> {
    let stats = retriever.stats();
    println!(
        "{} documents loaded ({}, {} dims). Ask a question, '+text' to add a document, Ctrl+D to exit.",
        stats.documents, stats.model, stats.dimension
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // EOF
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(text) = line.strip_prefix('+') {
            match retriever.add_text_blob(text)? {
                AddOutcome::Added { first_id, .. } => println!("Added document #{}", first_id),
                AddOutcome::Empty => println!("Nothing to add"),
            }
            continue;
        }

        let answer = retriever.answer_question(line)?;
        print_answer(&answer, show);
        println!();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    snippet_qa::logging::init_logging(cli.log_level.as_deref())?;

    let config = match &cli.config {
        Some(path) => QaConfig::load(path)?,
        None => QaConfig::default(),
    }
    .with_overrides(cli.model, cli.dimension)?;

    let embedder = create_embedder(&config.embedding)?;
    let mut retriever = Retriever::with_flat_index(embedder);

    match cli.command {
        Commands::Ask {
            question,
            docs,
            show,
        } => {
            load_docs(&mut retriever, &docs)?;
            let answer = retriever.answer_question(&question)?;
            print_answer(&answer, show.unwrap_or(config.top_k));
        }
        Commands::Chat { docs } => {
            load_docs(&mut retriever, &docs)?;
            chat(&mut retriever, config.top_k)?;
        }
        Commands::Serve { addr, docs } => {
            load_docs(&mut retriever, &docs)?;
            snippet_qa::server::start(&addr, retriever, config.top_k).await?;
        }
    }

    Ok(())
}
