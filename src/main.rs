// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod config;
mod data;
mod events;
mod source;
mod ui;

use app::{App, View};
use config::AppConfig;
use data::Thresholds;
use source::{ApiClient, DataSource, HttpSource, RestClient};

#[derive(Parser, Debug)]
#[command(name = "sensorwatch")]
#[command(about = "Terminal dashboard for monitoring IoT sensor telemetry and threshold alerts")]
struct Args {
    /// Base URL of the ingestion backend
    #[arg(short, long)]
    url: Option<String>,

    /// Poll interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Path to a config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fetch one snapshot, write it to the given JSON file, and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Append tracing output to the given file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Temperature warn limit for the overview cards (°C)
    #[arg(long)]
    temperature_warn: Option<f64>,

    /// Humidity warn limit for the overview cards (%)
    #[arg(long)]
    humidity_warn: Option<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut cfg = AppConfig::load(args.config.as_deref())?;
    if let Some(url) = args.url {
        cfg.base_url = url;
    }
    if let Some(refresh) = args.refresh {
        cfg.refresh_secs = refresh;
    }
    if let Some(limit) = args.temperature_warn {
        cfg.temperature_warn = limit;
    }
    if let Some(limit) = args.humidity_warn {
        cfg.humidity_warn = limit;
    }

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let thresholds = Thresholds {
        temperature_warn: cfg.temperature_warn,
        humidity_warn: cfg.humidity_warn,
    };

    // The TUI stays on the main thread; the runtime hosts the poller
    let rt = tokio::runtime::Runtime::new()?;
    let client = Arc::new(RestClient::new(&cfg.base_url));

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return rt.block_on(export_to_file(client, &export_path));
    }

    let source = rt.block_on(async {
        HttpSource::spawn(client, Duration::from_secs(cfg.refresh_secs.max(1)))
    });

    run_tui(Box::new(source), thresholds)
}

/// Route tracing output to a file; the alternate screen owns the terminal.
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Fetch one snapshot from the backend and write it to a JSON file.
async fn export_to_file(client: Arc<RestClient>, path: &Path) -> Result<()> {
    let readings = client.fetch_readings().await?;
    let alerts = client.fetch_alerts().await?;

    let reading_count = readings.len();
    let alert_count = alerts.len();

    let export = serde_json::json!({
        "readings": readings,
        "alerts": alerts,
    });
    std::fs::write(path, serde_json::to_string_pretty(&export)?)?;

    println!(
        "Exported {} readings and {} alerts to: {}",
        reading_count,
        alert_count,
        path.display()
    );
    Ok(())
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, thresholds: Thresholds) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and pick up anything the poller already fetched
    let mut app = App::new(source, thresholds);
    app.refresh();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered =
                    ratatui::layout::Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with feed overview
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Overview => ui::overview::render(frame, app, chunks[2]),
                View::Readings => ui::readings::render(frame, app, chunks[2]),
                View::Alerts => ui::alerts::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render toast overlay
            ui::common::render_toasts(frame, app, area);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Apply whatever the poller delivered since the last iteration
        app.refresh();
    }

    Ok(())
}
