//! Workout feed viewer - browse the workout feed in the terminal
//!
//! Loads the feed from a one-hour cache or the feed endpoint and shows it
//! sorted by creation time, kudos or skill level.

use std::io;
use std::panic;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use workoutfeed::app::{App, AppState};
use workoutfeed::cache::{CacheManager, MemoryCache, TtlCache};
use workoutfeed::cli::{Cli, StartupConfig};
use workoutfeed::loader::{FeedClient, LoadHandle, Loader};
use workoutfeed::{logging, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match &app.state {
        AppState::Loading => ui::render_loading(frame),
        AppState::Ready => ui::render_feed_list(frame, app),
        AppState::Error(message) => ui::render_error(frame, message),
    }

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Picks the cache backing the loader
fn build_cache(config: &StartupConfig) -> Arc<dyn TtlCache> {
    match config.resolved_cache_dir() {
        Some(dir) if config.persistent_cache => Arc::new(CacheManager::with_dir(dir)),
        _ => Arc::new(MemoryCache::new()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    if let Some(log_file) = config.resolved_log_file() {
        logging::init_tracing(&log_file);
    }
    info!(url = %config.feed_url, sort = config.initial_sort.label(), "starting");

    let client = FeedClient::new(config.feed_url.clone(), config.request_timeout)?;
    let loader = Loader::new(client, build_cache(&config))
        .with_ttl(config.cache_ttl)
        .skip_cache_read(config.force_refresh);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_startup_config(&config);
    let mut pending = Some(LoadHandle::spawn(loader.clone()));

    // Main event loop
    loop {
        if let Some(handle) = pending.as_mut() {
            if let Some(result) = handle.try_take() {
                app.apply_load(result);
                pending = None;
            }
        }

        if app.retry_requested && app.begin_retry() {
            pending = Some(LoadHandle::spawn(loader.clone()));
        }

        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Dropping the handle aborts a load that is still in flight
    drop(pending);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    info!("exiting");
    Ok(())
}
