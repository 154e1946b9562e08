mod present;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vodgrab_core::{
    find_matches, load_config, load_playlist, plan, validate_config, Config, DownloadRunner,
    HttpTransport, Transport,
};

use present::ProgressRenderer;

/// Download VOD entries from an M3U playlist.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search term matched against tvg-id and tvg-name
    query: String,

    /// Skip the confirmation prompt and download every match
    #[arg(short = 'y', long)]
    yes: bool,

    /// Path to the M3U playlist (overrides the config file)
    #[arg(short, long)]
    playlist: Option<PathBuf>,

    /// Destination directory (overrides the config file)
    #[arg(short, long)]
    destination: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = resolve_config(&args)?;
    validate_config(&config).context("Configuration validation failed")?;

    let playlist_path = args
        .playlist
        .clone()
        .unwrap_or_else(|| config.playlist.path.clone());
    let destination = args
        .destination
        .clone()
        .unwrap_or_else(|| config.download.destination.clone());

    info!("Searching for '{}' in {:?}", args.query, playlist_path);
    let entries = load_playlist(&playlist_path)
        .await
        .context("Failed to read playlist")?;

    let matches = find_matches(&entries, &args.query);
    if matches.is_empty() {
        println!("No downloadable matches found for '{}'.", args.query);
        return Ok(());
    }

    let transport = Arc::new(HttpTransport::new(config.fetcher.clone()));

    // Probe sizes for the listing; a failed probe degrades to an unknown
    // size, never aborts the run.
    let mut sizes = Vec::with_capacity(matches.len());
    for result in &matches {
        sizes.push(transport.probe_size(&result.entry.url).await.ok().flatten());
    }

    present::print_matches(&matches, &sizes);

    if !args.yes && !confirm(&format!("Download {} file(s)?", matches.len()))? {
        println!("Download cancelled.");
        return Ok(());
    }

    let tasks = plan(&matches, &destination);
    let runner = DownloadRunner::new(transport as Arc<dyn Transport>);

    // Ctrl-C aborts the in-flight transfer and leaves committed files
    // untouched; unstarted tasks never run.
    let cancel = runner.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling after current chunk");
            cancel.store(true, Ordering::Relaxed);
        }
    });

    let (progress_tx, mut progress_rx) = mpsc::channel(32);
    let render_task = tokio::spawn(async move {
        let mut renderer = ProgressRenderer::new();
        while let Some(update) = progress_rx.recv().await {
            renderer.render(&update);
        }
        renderer.finish();
    });

    let outcomes = runner.execute_all(&tasks, Some(progress_tx)).await;
    let _ = render_task.await;

    present::print_summary(&outcomes);
    Ok(())
}

/// Resolves the configuration: an explicitly named file must exist, the
/// default location is optional.
fn resolve_config(args: &Args) -> Result<Config> {
    let explicit = args
        .config
        .clone()
        .or_else(|| std::env::var("VODGRAB_CONFIG").ok().map(PathBuf::from));

    if let Some(path) = explicit {
        let config = load_config(&path)
            .with_context(|| format!("Failed to load config from {:?}", path))?;
        return Ok(config);
    }

    let default_path = PathBuf::from("config.toml");
    if default_path.exists() {
        let config = load_config(&default_path)
            .with_context(|| format!("Failed to load config from {:?}", default_path))?;
        return Ok(config);
    }

    Ok(Config::default())
}

/// Asks a y/N question on stdout and reads the answer from stdin.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read confirmation")?;

    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "Yes"))
}
