//! Concierge Chat - terminal client for the Colchuck's restaurant assistant
//!
//! Forwards visitor messages to the completion worker endpoint and renders
//! the replies, map cards, and call-to-action buttons in the terminal.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use concierge_chat::config::{Config, Settings};
use concierge_chat::repl::{colors, Repl};

#[derive(Parser)]
#[command(name = "concierge-chat")]
#[command(about = "Terminal concierge chat client for Colchuck's")]
struct Args {
    /// Completion worker endpoint URL
    #[arg(long, env = "CONCIERGE_WORKER_URL")]
    worker_url: Option<String>,

    /// Project identifier for the X-Project-ID header
    #[arg(long, env = "CONCIERGE_PROJECT_ID")]
    project_id: Option<String>,

    /// Model identifier
    #[arg(long, env = "CONCIERGE_MODEL")]
    model: Option<String>,

    /// Config file path (default: ~/.concierge/config.toml)
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (from ~/.concierge/.env or current dir)
    let env_path = dirs::home_dir()
        .map(|h| h.join(".concierge").join(".env"))
        .filter(|p| p.exists());
    if let Some(path) = env_path {
        let _ = dotenvy::from_path(&path);
    } else {
        let _ = dotenvy::dotenv(); // fallback to current dir
    }

    // Initialize logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Load config file, then resolve: CLI args > env vars (handled by clap)
    // > config file > defaults
    let file_config = match args.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut settings = Settings::from_config(file_config);

    if let Some(url) = args.worker_url {
        settings.worker_url = url;
    }
    if let Some(id) = args.project_id {
        settings.project_id = id;
    }
    if let Some(model) = args.model {
        settings.model = model;
    }

    // Pretty startup banner
    println!();
    println!("  {} {}", colors::banner_accent("Concierge Chat"), env!("CARGO_PKG_VERSION"));
    println!("{}", colors::separator(50));
    println!("{}", colors::banner_line("Venue", &settings.venue.name));
    println!("{}", colors::banner_line("Model", &settings.model));
    println!("{}", colors::banner_line("Endpoint", &settings.worker_url));
    println!("{}", colors::banner_line("Project", &settings.project_id));
    println!("{}", colors::separator(50));
    println!();

    let mut repl = Repl::new(settings)?;
    repl.run().await
}
