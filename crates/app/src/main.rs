mod args;
mod routes;
mod user;

use services::{AppServices, Clock, HttpCompletionClient};
use std::sync::Arc;
use storage::repository::Storage;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::args::{Command, ServeArgs, StoreKind, prepare_sqlite_file, print_usage};
use crate::routes::{AppState, router};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn open_storage(store: &StoreKind) -> Result<Storage, Box<dyn std::error::Error>> {
    match store {
        StoreKind::Json { dir } => {
            info!(dir = %dir.display(), "using JSON file storage");
            Ok(Storage::json_dir(dir.clone()))
        }
        StoreKind::Sqlite { url } => {
            // Open + migrate at startup so services stay storage-agnostic.
            prepare_sqlite_file(url)?;
            info!(%url, "using SQLite storage");
            Ok(Storage::sqlite(url).await?)
        }
    }
}

async fn serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let storage = open_storage(&args.store).await?;

    let completions = HttpCompletionClient::from_env();
    if !completions.enabled() {
        warn!("no completion API key set (LEARN_AI_API_KEY or GEMINI_API_KEY); plan generation will fail");
    }
    let services = AppServices::new(Clock::default_clock(), &storage, Arc::new(completions));

    let listener = TcpListener::bind(args.addr).await?;
    info!(addr = %args.addr, "skill path listening on http://{}", args.addr);
    axum::serve(listener, router(AppState::new(services)).into_make_service()).await?;
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let command = args::parse(argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    match command {
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::Serve(serve_args) => serve(serve_args).await,
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
