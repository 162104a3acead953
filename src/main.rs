//! tagselect - a terminal multi-value tag selector with async search.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info, warn};

use tagselect::app::App;
use tagselect::catalog::Catalog;
use tagselect::cli::Cli;
use tagselect::config::Settings;
use tagselect::error::AppError;
use tagselect::events::EventHandler;
use tagselect::logging;
use tagselect::selector::{create_task_channel, SelectorMessage};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init()?;

    let (settings, catalog) = match prepare(&cli) {
        Ok(ready) => ready,
        Err(e) => {
            error!(error = %e, "Startup failed");
            report(&e);
            std::process::exit(1);
        }
    };
    info!(options = catalog.len(), "Catalog ready");

    let (mut rx, tasks) = create_task_channel();
    let mut app = App::new(&settings, Arc::new(catalog), tasks);
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);

    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            let e = AppError::terminal(e.to_string());
            error!(error = %e, "Terminal setup failed");
            report(&e);
            std::process::exit(1);
        }
    };
    let result = run(&mut terminal, &mut app, &mut rx, &events);
    restore_terminal(&mut terminal).context("failed to restore terminal")?;

    app.shutdown();
    if let Some(change) = app.last_change() {
        println!("{}", change.value.join(","));
    }
    logging::shutdown();
    result
}

/// Load settings and the option catalog, applying CLI overrides.
fn prepare(cli: &Cli) -> tagselect::error::Result<(Settings, Catalog)> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load().unwrap_or_else(|e| {
            warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        }),
    };
    cli.apply(&mut settings);
    settings.validate()?;

    let catalog = match &settings.catalog {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::builtin(),
    }
    .with_latency(Duration::from_millis(settings.latency_ms))
    .with_failure_trigger(cli.fail_on.clone());

    Ok((settings, catalog))
}

/// Print a startup failure for the user, with a pointer to the logs.
fn report(err: &AppError) {
    eprintln!("{}", err.user_message());
    if let Some(dir) = logging::log_directory() {
        eprintln!("Details are in the log files under {}", dir.display());
    }
}

/// Draw, handle one event, then apply every settled background message.
fn run(
    terminal: &mut Tui,
    app: &mut App,
    rx: &mut UnboundedReceiver<SelectorMessage>,
    events: &EventHandler,
) -> anyhow::Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;
        app.update(events.next()?);
        while let Ok(message) = rx.try_recv() {
            app.handle_message(message);
        }
    }
    Ok(())
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
