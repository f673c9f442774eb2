//! # fortune-tv CLI Entry Point
//!
//! This is the main entry point for the fortune-tv TUI application.
//!
//! ## Overview
//!
//! fortune-tv has two pages:
//!
//! - **Choose Your Fortune** - an endless column of scrolls. Open one to
//!   reveal a fortune fetched from a remote quote service.
//! - **Movie Quotes** - a little TV showing random movie quotes, with a
//!   category filter and a channel knob.
//!
//! ## Usage
//!
//! ```bash
//! # Start on the fortune gallery
//! fortune-tv
//!
//! # Start on the TV with a custom catalog
//! fortune-tv --page movie-quotes --catalog ./quotes.json
//!
//! # Print one movie quote from the "tv" category and exit
//! fortune-tv --sample tv
//!
//! # Fetch and print one fortune and exit
//! fortune-tv --fortune
//! ```
//!
//! ## Key Bindings
//!
//! ### Everywhere
//! - `q` / `Ctrl+c` - Quit the application
//! - `Tab` / `m` - Open/close the navigation drawer
//! - `f` / `t` - Go to the fortunes / movie quotes page
//!
//! ### Fortunes
//! - `j` / `k` / `Up` / `Down` / mouse wheel - Scroll
//! - `PageUp` / `PageDown` - Scroll by half a screen
//! - `Enter` / `Space` / click - Open a scroll
//! - `Esc` / `Enter` / `Space` / click outside - Roll the open scroll back up
//!
//! ### Movie Quotes
//! - `n` / `Space` / `Enter` - Next channel
//! - `Left` / `Right` / `h` / `l` - Previous/next category filter
//! - `1`-`9` - Pick a category filter

use fortune_tv::catalog::{Catalog, CatalogSource};
use fortune_tv::config::Config;
use fortune_tv::fortune::{HttpFortuneSource, PrefetchCache};
use fortune_tv::gallery::{FocusTimings, FortuneGallery};
use fortune_tv::logging;
use fortune_tv::ui::{self, pages::Page, App, AppEvent};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Frame interval while waiting for input (~30fps)
const FRAME: Duration = Duration::from_millis(33);

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read terminal event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// fortune-tv - Fortune scrolls and a movie quotes TV in your terminal
#[derive(Parser, Debug)]
#[command(name = "fortune-tv")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fortune scrolls and a movie quotes TV in your terminal", long_about = None)]
struct Args {
    /// Page shown at startup
    #[arg(long, value_name = "PAGE", value_parser = ["fortunes", "movie-quotes"])]
    page: Option<String>,

    /// Movie quotes catalog (JSON array of { quote, movie, type, year })
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Remote fortune endpoint
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Alternate configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "fortune_tv=trace"
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Print one movie quote matching FILTER and exit
    #[arg(long, value_name = "FILTER", conflicts_with = "fortune")]
    sample: Option<String>,

    /// Fetch and print one fortune and exit
    #[arg(long)]
    fortune: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Try to restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);

        // Call the original panic hook
        original_hook(panic_info);
    }));

    // Run the application and ensure cleanup happens
    let result = run_application(args).await;

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

/// Load the config file and apply command-line overrides.
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            Config::load_from(path)?
        }
        None => Config::load()?,
    };

    if let Some(page) = &args.page {
        config.start_page = page.clone();
    }
    if let Some(catalog) = &args.catalog {
        config.catalog = Some(catalog.clone());
    }
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }

    Ok(config)
}

/// Write one quote matching `filter` and its attribution to `out`.
fn print_sample(source: &CatalogSource, filter: &str, out: &mut impl Write) -> Result<()> {
    let catalog = Catalog::try_load(source).context("Failed to load catalog")?;
    let quote = catalog.sample(filter, &mut rand::rng());
    writeln!(out, "{}", quote.quote).context("Failed to write quote")?;
    writeln!(out, "{}", quote.attribution()).context("Failed to write quote")?;
    Ok(())
}

async fn run_application(args: Args) -> Result<()> {
    let config = resolve_config(&args)?;
    let start_page = Page::from_key(&config.start_page)
        .with_context(|| format!("Unknown start page: {}", config.start_page))?;

    // Logging is best effort; the TUI works without it
    if let Ok(path) = Config::log_path() {
        logging::init_tracing(&path, &config.log_level);
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "fortune-tv starting");

    let catalog_source = CatalogSource::from_path(config.catalog.clone());

    // Sample mode: print one quote and exit
    if let Some(filter) = &args.sample {
        return print_sample(&catalog_source, filter, &mut io::stdout().lock());
    }

    let source = HttpFortuneSource::new(config.endpoint.clone(), config.fetch_timeout())
        .context("Failed to create HTTP client")?;
    let cache = Arc::new(PrefetchCache::new(Arc::new(source)));

    // Fortune mode: fetch one fortune and exit
    if args.fortune {
        let fortune = cache.consume().await;
        println!("{}", fortune.content);
        if !fortune.author.is_empty() {
            println!("{}", fortune.author);
        }
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let gallery = FortuneGallery::new(config.gallery, FocusTimings::default());
    let mut app = App::new(start_page, gallery, cache, catalog_source, tx);

    // Run the app and ensure cleanup happens even on error
    let mut event_reader = CrosstermEventReader;
    let run_result = match terminal.size().context("Failed to read terminal size") {
        Ok(size) => {
            app.resize(Rect::new(0, 0, size.width, size.height));
            app.start(Instant::now());
            run_app(&mut terminal, &mut app, &mut rx, &mut event_reader).await
        }
        Err(e) => Err(e),
    };

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    tracing::info!("fortune-tv exiting");

    // Return the first error that occurred, or Ok if both succeeded
    run_result?;
    cleanup_result?;

    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut UnboundedReceiver<AppEvent>,
    event_reader: &mut dyn EventReader,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        // Results of background fetches
        while let Ok(event) = events.try_recv() {
            app.apply(event, Instant::now());
        }

        app.tick(Instant::now());

        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        if let Some(event) = event_reader.read_event(FRAME)? {
            app.handle_event(event, Instant::now());
        }

        if app.should_quit {
            return Ok(());
        }

        // Let spawned fetches make progress between frames
        tokio::task::yield_now().await;
    }
}
