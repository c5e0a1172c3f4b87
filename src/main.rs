//! File Tree - browse and edit a parent-linked file tree
//!
//! # Usage
//! ```bash
//! file-tree serve                       # Serve demo records on port 3001
//! file-tree serve --seed records.json   # Serve records from a JSON file
//! file-tree show --search .rs           # Print the filtered tree
//! file-tree rename 5 app.rs             # Rename a record
//! file-tree move 5 3                    # Move record 5 under 3
//! file-tree delete 5                    # Delete a record
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use clap::{Args, Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use file_tree::TreeStateManager;
use file_tree::backend::http::DEFAULT_URL;
use file_tree::backend::{HttpRepository, InMemoryRepository, SharedRepository, seed};
use file_tree::models::NodeId;
use file_tree::render::TreeView;
use file_tree::routes;

/// File Tree - browse, search and edit a file tree served over HTTP
#[derive(Parser)]
#[command(name = "file-tree")]
#[command(about = "Browse and edit a parent-linked file tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve records from memory over HTTP
    Serve {
        /// Port to run the server on
        #[arg(short, long, default_value = "3001")]
        port: u16,

        /// JSON file with the initial records (demo records if omitted)
        #[arg(short, long, value_name = "FILE")]
        seed: Option<PathBuf>,
    },
    /// Print the tree, optionally filtered
    Show {
        #[command(flatten)]
        remote: Remote,

        /// Only show nodes whose subtree contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Collapse these directories in the output
        #[arg(short, long, value_name = "ID")]
        collapse: Vec<NodeId>,
    },
    /// Rename a file or directory
    Rename {
        #[command(flatten)]
        remote: Remote,
        id: NodeId,
        name: String,
    },
    /// Move a file or directory under another directory
    Move {
        #[command(flatten)]
        remote: Remote,
        id: NodeId,
        destination: NodeId,
    },
    /// Delete a file or directory
    Delete {
        #[command(flatten)]
        remote: Remote,
        id: NodeId,
    },
}

#[derive(Args)]
struct Remote {
    /// Base URL of a running `file-tree serve`
    #[arg(short, long, default_value = DEFAULT_URL)]
    url: String,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(port: u16, seed_path: Option<PathBuf>) -> anyhow::Result<()> {
    let (records, source) = match &seed_path {
        Some(path) => (seed::load_records(path)?, path.display().to_string()),
        None => (seed::demo_records(), "built-in demo records".to_string()),
    };
    let record_count = records.len();
    let repo: SharedRepository = Arc::new(InMemoryRepository::new(records));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(repo))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{}", port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    let url = format!("http://127.0.0.1:{}", port);
    println!();
    println!("  ┌─────────────────────────────────────────────┐");
    println!("  │                  File Tree                  │");
    println!("  └─────────────────────────────────────────────┘");
    println!();
    println!("  Records: {} ({})", record_count, source);
    println!("  Server:  {}", url);
    println!();
    println!("  Try:");
    println!("    file-tree show --url {}", url);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();
    tracing::info!("Serving {} records on {}", record_count, url);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

async fn connect(remote: &Remote) -> TreeStateManager<HttpRepository> {
    let mut manager = TreeStateManager::new(HttpRepository::new(remote.url.as_str()));
    if let Err(e) = manager.fetch().await {
        eprintln!("✗ Failed to load records: {}", e);
        eprintln!("  URL: {}", remote.url);
        eprintln!();
        eprintln!("Is `file-tree serve` running?");
        std::process::exit(1);
    }
    manager
}

fn print_tree(manager: &TreeStateManager<HttpRepository>) {
    match manager.display_tree() {
        Some(tree) if !tree.children().is_empty() => print!("{}", TreeView(tree)),
        _ => match manager.search_term() {
            Some(term) => println!("(nothing matches {:?})", term),
            None => println!("(empty)"),
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Serve {
            port,
            seed: seed_path,
        } => return serve(port, seed_path).await,
        Commands::Show {
            remote,
            search,
            collapse,
        } => {
            let mut manager = connect(&remote).await;
            manager.set_search_term(search);
            for id in collapse {
                if !manager.toggle_collapsed(id) {
                    eprintln!("  Warning: no node with id {}", id);
                }
            }
            print_tree(&manager);
        }
        Commands::Rename { remote, id, name } => {
            let mut manager = connect(&remote).await;
            manager.rename(id, &name).await?;
            println!("✓ Renamed {} to {:?}", id, name);
            println!();
            print_tree(&manager);
        }
        Commands::Move {
            remote,
            id,
            destination,
        } => {
            let mut manager = connect(&remote).await;
            manager.move_node(id, destination).await?;
            println!("✓ Moved {} under {}", id, destination);
            println!();
            print_tree(&manager);
        }
        Commands::Delete { remote, id } => {
            let mut manager = connect(&remote).await;
            manager.delete(id).await?;
            println!("✓ Deleted {}", id);
            println!();
            print_tree(&manager);
        }
    }

    Ok(())
}
