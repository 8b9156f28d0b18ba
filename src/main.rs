//! Binary entrypoint: mounts the carousel on a page fragment and drives it
//! from commands read on stdin.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use theme_toggle::{FileThemeStore, Theme, ThemeController};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use carousel::config::Configuration;
use carousel::events::{CarouselEvent, ThemeCommand};
use carousel::{ready, tasks};

#[derive(Debug, Parser)]
#[command(
    name = "carousel",
    version,
    about = "Auto-advancing slide carousel with a dark/light theme toggle"
)]
struct Args {
    /// HTML page (or fragment) holding the carousel markup
    #[arg(value_name = "PAGE")]
    page: PathBuf,
    /// Path to YAML config; built-in defaults are used when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// System color-scheme preference (light|dark)
    #[arg(long, value_name = "THEME", default_value = "light")]
    system_theme: Theme,
    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"))
        .add_directive(
            format!("carousel={level}")
                .parse()
                .context("building log filter")?,
        )
        .add_directive(
            format!("theme_toggle={level}")
                .parse()
                .context("building log filter")?,
        );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let result = runtime.block_on(run(args));
    // stdin is read on a blocking thread that only returns on the next line
    runtime.shutdown_timeout(Duration::from_millis(250));
    result
}

async fn run(args: Args) -> Result<()> {
    let Args {
        page,
        config,
        system_theme,
        ..
    } = args;

    let cfg = match &config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Configuration::default(),
    }
    .validated()
    .context("invalid configuration values")?;
    tracing::debug!("configuration:\n{cfg:#?}");

    let depth = cfg.event_queue_depth;
    let (carousel_tx, carousel_rx) = mpsc::channel::<CarouselEvent>(depth); // Input/Timers -> Carousel
    let (theme_tx, theme_rx) = mpsc::channel::<ThemeCommand>(depth); // Input -> Theme
    let (page_ready, page_waiter) = ready::channel::<Arc<str>>(); // Page -> Carousel

    let cancel = CancellationToken::new();

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    let mut tasks = JoinSet::new();

    // Page: reading the content stands in for inserting it; readiness is
    // announced once, after the content is in place.
    tasks.spawn({
        let page = page.clone();
        async move {
            let html = tokio::fs::read_to_string(&page)
                .await
                .with_context(|| format!("failed to read page {}", page.display()))?;
            tracing::info!(page = %page.display(), bytes = html.len(), "page content ready");
            page_ready.notify(Arc::from(html));
            Ok::<(), anyhow::Error>(())
        }
    });

    // Carousel
    tasks.spawn({
        let cfg = cfg.clone();
        let carousel_tx = carousel_tx.clone();
        let cancel = cancel.clone();
        async move {
            tasks::carousel::run(cfg, page_waiter, carousel_tx, carousel_rx, cancel)
                .await
                .context("carousel task failed")
        }
    });

    // Theme
    tasks.spawn({
        let store = FileThemeStore::new(cfg.theme.storage_path.clone());
        let controller = ThemeController::new(store, system_theme);
        let cancel = cancel.clone();
        async move {
            tasks::theme::run(controller, theme_rx, cancel)
                .await
                .context("theme task failed")
        }
    });

    // Input
    tasks.spawn({
        let cancel = cancel.clone();
        async move {
            let stdin = BufReader::new(tokio::io::stdin());
            tasks::input::run(stdin, carousel_tx, theme_tx, cancel)
                .await
                .context("input task failed")
        }
    });

    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task error: {e:?}"),
            Err(e) => tracing::error!("join error: {e}"),
        }
    }

    Ok(())
}
