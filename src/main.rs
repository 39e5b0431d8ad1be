//! DocVault TUI: terminal client for the DocVault document-custody chain.
//!
//! External client only — same access level as any other consumer of the
//! custody REST API. Obtain a bearer token from the authentication
//! service first, then:
//!
//! ```bash
//! # Connect to a local backend
//! docvault-tui --token "$TOKEN"
//!
//! # Remote backend, custom download directory
//! docvault-tui --api-url https://vault.example.com/api --download-dir ~/Downloads
//! ```

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use docvault_tui::api::ApiClient;
use docvault_tui::auth::Identity;
use docvault_tui::domain::{App, MiningOutcome};
use docvault_tui::ui;

/// DocVault terminal client
#[derive(Parser, Debug)]
#[command(name = "docvault-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custody backend base URL
    #[arg(long, default_value = "https://localhost:7114/api")]
    api_url: String,

    /// Bearer credential (JWT) for authenticated calls
    #[arg(long, env = "DOCVAULT_TOKEN")]
    token: Option<String>,

    /// Per-request timeout in seconds (mining is slow by design)
    #[arg(long, default_value = "120")]
    timeout_secs: u64,

    /// Directory for downloaded documents and archives
    #[arg(long, default_value = ".")]
    download_dir: PathBuf,

    /// Log file path (the terminal itself is owned by the UI)
    #[arg(long, default_value = "docvault-tui.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = std::fs::File::create(&args.log_file)
        .with_context(|| format!("cannot open log file {}", args.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    let identity = Identity::from_token(args.token.as_deref());
    let api = ApiClient::new(
        &args.api_url,
        args.token,
        Duration::from_secs(args.timeout_secs),
    )?;

    // Setup terminal with panic hook for cleanup
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Channel feeding finished mining requests back into the app
    let (mining_tx, mining_rx) = mpsc::channel(8);
    let mut app = App::new(api, identity, args.download_dir, mining_tx);

    let result = run_app(&mut terminal, &mut app, mining_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Main application loop.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut mining_rx: mpsc::Receiver<MiningOutcome>,
) -> Result<()> {
    // Initial data fetch for the starting tab
    app.mount_active_tab().await;

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Fold in finished mining requests (non-blocking)
        while let Ok(outcome) = mining_rx.try_recv() {
            app.on_mining_outcome(outcome).await;
        }

        // Short poll so mining outcomes keep the screen fresh
        if event::poll(Duration::from_millis(100))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let prev_tab = app.active_tab;
            let action = app.on_key(key.code);

            if app.active_tab != prev_tab {
                app.mount_active_tab().await;
            }
            if let Some(action) = action {
                app.run_action(action).await;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
