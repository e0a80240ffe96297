// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Terminal,
};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod data;
mod events;
mod source;
mod ui;

use app::App;
use self::config::InfluxConfig;
use data::Thresholds;
use source::{DemoSource, InfluxSource, ReadingSource};

#[derive(Parser, Debug)]
#[command(name = "fermwatch")]
#[command(about = "Terminal dashboard for fermentation environment readings in InfluxDB")]
struct Args {
    /// InfluxDB server URL (overrides config file)
    #[arg(long)]
    url: Option<String>,

    /// InfluxDB API token (overrides config file)
    #[arg(long)]
    token: Option<String>,

    /// InfluxDB organization (overrides config file)
    #[arg(long)]
    org: Option<String>,

    /// Bucket holding the environment measurement (overrides config file)
    #[arg(long)]
    bucket: Option<String>,

    /// TOML file with connection settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Temperature alarm limit in degrees Celsius
    #[arg(long, default_value = "35.0")]
    temperature_limit: f64,

    /// Humidity alarm limit in percent
    #[arg(long, default_value = "80.0")]
    humidity_limit: f64,

    /// Refresh interval in seconds
    #[arg(short, long, default_value = "5")]
    refresh: u64,

    /// Begin monitoring immediately instead of waiting for 's'
    #[arg(long)]
    start: bool,

    /// Run against a synthetic data source (no server needed)
    #[arg(long, conflicts_with_all = ["url", "token", "org", "bucket", "config"])]
    demo: bool,

    /// Append tracing output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let thresholds = Thresholds {
        temperature: args.temperature_limit,
        humidity: args.humidity_limit,
    };
    let interval = Duration::from_secs(args.refresh.max(1));

    // The runtime outlives the TUI loop; source tasks run on it in the
    // background while the UI thread renders.
    let rt = tokio::runtime::Runtime::new()?;

    let source: Box<dyn ReadingSource> = if args.demo {
        rt.block_on(async { Box::new(DemoSource::spawn(interval)) as Box<dyn ReadingSource> })
    } else {
        let config = InfluxConfig::load(args.config.as_deref())?.with_overrides(
            args.url,
            args.token,
            args.org,
            args.bucket,
        );
        config.ensure_token()?;
        rt.block_on(async {
            Box::new(InfluxSource::spawn(config, interval)) as Box<dyn ReadingSource>
        })
    };

    run_tui(source, thresholds, args.start)
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn ReadingSource>, thresholds: Thresholds, autostart: bool) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(source, thresholds);
    if autostart {
        app.start();
    }

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 50;
    const MIN_HEIGHT: u16 = 14;

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
                frame.render_widget(paragraph, undersize_message_area(area));
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(6), // Readings + alarm banner
                Constraint::Min(6),    // Chart
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::readings::render(frame, app, chunks[1]);
            ui::chart::render(frame, app, chunks[2]);
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Apply whatever the source task produced since the last pass
        app.pump_source();
    }

    Ok(())
}

/// Where the too-small notice is drawn, clamped so a terminal shorter
/// than the notice cannot push it out of the frame.
fn undersize_message_area(area: Rect) -> Rect {
    let banner = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5);
    area.intersection(banner)
}

/// Install a file-backed tracing subscriber.
///
/// Stdout belongs to the TUI, so logging is opt-in via `--log-file`.
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
