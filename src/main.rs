use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use nw_agent::AgentConfig;
use nw_cli::{
    display_banner, handle_question, print_error, print_help, read_line, wait_for_files,
    NotesSession, PROMPT,
};
use nw_core::{EmbeddingProvider, LLMProvider, SearchProvider};
use nw_openai::OpenAIClient;
use nw_rag::{HashingEmbedder, RagConfig};
use nw_search::SerpApiClient;

#[derive(Parser)]
#[command(name = "noteswise")]
#[command(about = "Ask questions about your lecture notes", long_about = None)]
struct Cli {
    /// Lecture note files to index (PDF, .txt or .md)
    files: Vec<PathBuf>,

    /// Answer a single question and exit
    #[arg(short, long)]
    question: Option<String>,

    /// Only answer from the notes, without the tutor agent and web search
    #[arg(long)]
    skip_agent: bool,

    /// Embed locally instead of calling the embedding service
    #[arg(long)]
    local_embeddings: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info,nw_=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let rag_config = RagConfig::from_env()?;
    let agent_config = AgentConfig::from_env()?;

    let openai = Arc::new(OpenAIClient::from_env().context("OpenAI client is not configured")?);
    let llm: Arc<dyn LLMProvider> = openai.clone();
    let embedder: Arc<dyn EmbeddingProvider> = if cli.local_embeddings {
        Arc::new(HashingEmbedder::default())
    } else {
        openai
    };
    let search: Option<Arc<dyn SearchProvider>> = if cli.skip_agent {
        None
    } else {
        let client = SerpApiClient::from_env()
            .context("web search is not configured (use --skip-agent to run without it)")?;
        Some(Arc::new(client))
    };

    if cli.question.is_none() {
        display_banner();
    }

    let files = wait_for_files(cli.files)?;
    println!("{} Indexing {} file(s)...", "📚".blue(), files.len());
    let session = NotesSession::build(
        &files,
        llm,
        embedder,
        search,
        &rag_config,
        &agent_config,
    )
    .await
    .context("failed to index the lecture notes")?;
    println!(
        "{} Indexed {} passages from {} file(s)",
        "✅".green(),
        session.unit_count(),
        files.len()
    );

    // Handle a single question
    if let Some(question) = cli.question {
        handle_question(&session, &question).await?;
        return Ok(());
    }

    // Interactive mode
    let mut history = Vec::new();

    while let Some(input) = read_line(PROMPT, &mut history)? {
        if input.is_empty() {
            continue;
        }

        let input_lower = input.to_lowercase();

        // Handle special commands
        if input_lower == "exit" || input_lower == "quit" {
            break;
        }

        if input_lower == "help" {
            print_help();
            continue;
        }

        if let Err(e) = handle_question(&session, &input).await {
            print_error("Could not answer", &e);
        }
    }

    println!("{}", "👋 Goodbye!".green());
    Ok(())
}
