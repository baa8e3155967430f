use chrono::Utc;
use clap::{Parser, Subcommand};
use pdf_memory_core::{
    load_folder, render_search_results, render_source_tally, search_memories, source_tally,
    LoadOutcome, LoaderOptions, LopdfExtractor, Mem0Client, MemoryStore, DEFAULT_CHUNK_SIZE,
    DEFAULT_KNOWLEDGE_DIR, DEFAULT_MEM0_BASE_URL, DEFAULT_NAMESPACE,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SAMPLE_QUERY: &str = "Loaded key";
const SAMPLE_LIMIT: usize = 3;

#[derive(Parser)]
#[command(name = "pdf-memory-loader", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Mem0 API key
    #[arg(long, env = "MEM0_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Mem0 API base URL
    #[arg(long, env = "MEM0_BASE_URL", default_value = DEFAULT_MEM0_BASE_URL)]
    base_url: String,

    /// Folder holding the PDFs to load (not searched recursively)
    #[arg(long, default_value = DEFAULT_KNOWLEDGE_DIR)]
    knowledge_dir: PathBuf,

    /// Namespace every memory is stored under
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    user_id: String,

    /// Project tag written into chunk metadata
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    project: String,

    /// Approximate chunk size in bytes
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Load PDFs, list stored sources, then run a sample search.
    Run,
    /// Upload every PDF not already stored.
    Load,
    /// Count stored memories per source file.
    List,
    /// Search stored memories.
    Search {
        /// Search query
        #[arg(long)]
        query: String,
        /// Number of results to return.
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    let client = Mem0Client::new(&cli.base_url, cli.api_key.as_str())?;

    let options = LoaderOptions {
        knowledge_dir: cli.knowledge_dir.clone(),
        user_id: cli.user_id.clone(),
        project: cli.project.clone(),
        chunk_size: cli.chunk_size,
        ..LoaderOptions::default()
    };

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        base_url = %cli.base_url,
        "pdf-memory-loader boot"
    );

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            load(&client, &options).await;
            println!("\n{}", "=".repeat(60));
            list(&client, &options.user_id).await;
            println!("\n{}", "=".repeat(60));
            search(&client, SAMPLE_QUERY, &options.user_id, SAMPLE_LIMIT).await;
        }
        Command::Load => load(&client, &options).await,
        Command::List => list(&client, &options.user_id).await,
        Command::Search { query, limit } => search(&client, &query, &options.user_id, limit).await,
    }

    Ok(())
}

async fn load<S: MemoryStore>(store: &S, options: &LoaderOptions) {
    match load_folder(store, &LopdfExtractor, options).await {
        LoadOutcome::MissingDirectory(folder) => {
            println!("Knowledge directory not found: {}", folder.display());
        }
        LoadOutcome::NoPdfFiles(folder) => {
            println!("No PDF files found in {}.", folder.display());
        }
        LoadOutcome::Completed(report) => {
            println!("\nPDF loading completed!");
            println!("Files processed: {}", report.processed);
            println!("Files skipped (already uploaded): {}", report.skipped);
            if report.empty > 0 {
                println!("Files with no extractable text: {}", report.empty);
            }
            if report.failed > 0 {
                println!("Files with no chunks uploaded: {}", report.failed);
            }
            if report.chunks_failed > 0 {
                println!(
                    "Chunks uploaded: {}, chunks failed: {}",
                    report.chunks_uploaded, report.chunks_failed
                );
            }
        }
    }
}

async fn list<S: MemoryStore>(store: &S, user_id: &str) {
    match source_tally(store, user_id).await {
        Ok(tally) => print!("\n{}", render_source_tally(user_id, &tally)),
        Err(error) => error!(%error, "error listing memories"),
    }
}

async fn search<S: MemoryStore>(store: &S, query: &str, user_id: &str, limit: usize) {
    match search_memories(store, query, user_id, limit).await {
        Ok(hits) => print!("\n{}", render_search_results(query, &hits)),
        Err(error) => error!(%error, "error searching memory"),
    }
}
