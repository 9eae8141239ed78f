//! A horizontally-scrolling movie poster carousel for the terminal.
//!
//! Posters lift as they pass the centre of the screen and a backdrop image
//! slides away behind them as the list advances.  Movie data comes from the
//! TMDB discover endpoint, or from a saved discover page on disk.

mod app;
mod config;
mod core;
mod source;
mod ui;

use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{
    event::{frame_interval, spawn_event_reader, AppEvent},
    fetch_runtime::{spawn_image_fetch, spawn_movie_fetch, FetchUpdate},
    handler,
    state::AppState,
};
use crate::config::{AppConfig, Variant};
use crate::source::{file::FileSource, tmdb::TmdbSource, MovieSource};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Movie poster carousel")]
struct Cli {
    /// Which screen to show (overrides the config file).
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Read movies from a saved TMDB discover page instead of the network.
    #[arg(long, value_name = "PATH")]
    source_file: Option<PathBuf>,

    /// TMDB API key.
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// TMDB API base URL.
    #[arg(long, default_value = source::tmdb::DEFAULT_API_BASE)]
    api_base: String,

    /// Poster bounce at the centre, in rows (negative lifts).
    #[arg(long, allow_hyphen_values = true)]
    lift: Option<f64>,

    /// Fixed poster slot width in columns.
    #[arg(long)]
    item_width: Option<u16>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if let Some(lift) = self.lift.filter(|l| l.is_finite()) {
            config.layout.lift = lift;
        }
        if let Some(width) = self.item_width.filter(|w| *w > 0) {
            config.layout.item_width = Some(width);
        }
    }

    fn movie_source(&self) -> Arc<dyn MovieSource> {
        match &self.source_file {
            Some(path) => Arc::new(FileSource::new(path)),
            None => Arc::new(TmdbSource::new(self.api_base.clone(), self.api_key.clone())),
        }
    }
}

// ───────────────────────────────────────── updates ───────────

/// Apply one background result to the state.
fn apply_fetch_update(state: &mut AppState, update: FetchUpdate) {
    match update {
        FetchUpdate::Movies(result) => state.apply_fetch(result),
        FetchUpdate::Image { url, result } => match result {
            Ok(img) => {
                state.image_cache.insert(url, img);
            }
            Err(e) => tracing::debug!("image {url} unavailable: {e}"),
        },
    }
}

// ───────────────────────────────────────── main ─────────────

type Tui = Terminal<CrosstermBackend<Stdout>>;

async fn run(
    terminal: &mut Tui,
    state: &mut AppState,
    source: Arc<dyn MovieSource>,
) -> Result<()> {
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchUpdate>();
    let http = reqwest::Client::new();
    let mut events = spawn_event_reader(frame_interval(state.config.scroll_throttle));

    spawn_movie_fetch(fetch_tx.clone(), source);

    loop {
        // Only what the visible window needs.
        for url in state.take_missing_images() {
            spawn_image_fetch(fetch_tx.clone(), http.clone(), url);
        }

        terminal.draw(|frame| ui::draw(frame, state))?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize(w, h) => state.resize(w, h, Instant::now()),
                    AppEvent::Tick => {
                        state.tick = state.tick.wrapping_add(1);
                        state.advance_scroll(Instant::now());
                    }
                }
            }

            Some(update) = fetch_rx.recv() => {
                apply_fetch_update(state, update);
                // Drain everything currently queued before redrawing.
                while let Ok(update) = fetch_rx.try_recv() {
                    apply_fetch_update(state, update);
                }
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // The TUI owns stdout; logs go to stderr (redirect it to keep them).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load();
    cli.apply(&mut config);

    if cli.write_config {
        let path = config.save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let source = cli.movie_source();

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let size = terminal.size()?;

    let mut state = AppState::new(config, size.width, size.height);
    tracing::info!(
        "carousel {}x{} variant={} item_width={}",
        size.width,
        size.height,
        state.config.variant.label(),
        state.layout.item_width
    );

    let result = run(&mut terminal, &mut state, source).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
