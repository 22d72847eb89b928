// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
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
mod data;
mod events;
mod fixture;
mod ui;

use app::{App, View};
use data::RngNoise;

#[derive(Parser, Debug)]
#[command(name = "urowatch")]
#[command(about = "Terminal dashboard for monitoring Uro-Meter flow-measurement devices")]
struct Args {
    /// Path to a JSON fixture file seeding the device fleet.
    /// Defaults to the built-in six-device demo fleet.
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Hours of measurement history to generate for the detail view
    #[arg(long, default_value = "24")]
    hours: u32,

    /// Fleet refresh interval in seconds (coarse tick, all devices)
    #[arg(long, default_value = "30")]
    fleet_refresh: u64,

    /// Detail refresh interval in seconds (fine tick, selected device)
    #[arg(long, default_value = "5")]
    detail_refresh: u64,

    /// Seed for the simulation noise source (reproducible runs)
    #[arg(long)]
    seed: Option<u64>,

    /// Export the seeded fleet state to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.hours == 0 {
        anyhow::bail!("--hours must be greater than zero");
    }

    let devices = match &args.fixture {
        Some(path) => fixture::load(path)?,
        None => fixture::default_fleet(Utc::now()),
    };

    let noise: Box<dyn data::NoiseSource> = match args.seed {
        Some(seed) => Box::new(RngNoise::seeded(seed)),
        None => Box::new(RngNoise::new()),
    };

    let app = App::new(devices, noise, args.hours);

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        app.export_state(&export_path)?;
        println!("Exported fleet state to: {}", export_path.display());
        return Ok(());
    }

    run_tui(
        app,
        Duration::from_secs(args.fleet_refresh),
        Duration::from_secs(args.detail_refresh),
    )
}

/// Run the TUI with the given app state and refresh intervals
fn run_tui(mut app: App, fleet_refresh: Duration, detail_refresh: Duration) -> Result<()> {
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

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, fleet_refresh, detail_refresh);

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

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    fleet_refresh: Duration,
    detail_refresh: Duration,
) -> Result<()> {
    // Two independent timers: a coarse one ticking the whole fleet and a
    // fine one ticking the device shown in the detail overlay.
    let mut last_fleet_tick = Instant::now();
    let mut last_detail_tick = Instant::now();

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
                let y = (area.height / 2).saturating_sub(2);
                let centered =
                    ratatui::layout::Rect::new(0, y, area.width, 5.min(area.height - y));
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

            // Render header with fleet status
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Fleet => ui::fleet::render(frame, app, chunks[2]),
                View::Alerts => ui::alerts::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render detail overlay if active
            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1) + table border (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Coarse tick: simulate telemetry for the whole fleet
        if last_fleet_tick.elapsed() >= fleet_refresh {
            app.tick_fleet();
            last_fleet_tick = Instant::now();
        }

        // Fine tick: simulate live updates for the detail overlay
        if app.show_detail_overlay && last_detail_tick.elapsed() >= detail_refresh {
            app.tick_detail();
            last_detail_tick = Instant::now();
        }
    }

    Ok(())
}
