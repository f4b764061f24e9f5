use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use autoheal_dash::ui::Theme;
use autoheal_dash::{events, ui, App, Dashboard, HttpBackend, Overrides, Settings};

#[derive(Parser, Debug)]
#[command(name = "autoheal-dash")]
#[command(about = "Terminal dashboard for the AutoHeal self-healing infrastructure demo")]
struct Args {
    /// Path to a TOML config file (default: ./autoheal-dash.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the demo service
    #[arg(long)]
    demo_api: Option<String>,

    /// Base URL of the AutoHeal engine
    #[arg(long)]
    autoheal_api: Option<String>,

    /// URL of the metrics dashboard panel
    #[arg(long)]
    metrics_url: Option<String>,

    /// Audit log poll interval (e.g., "2s", "500ms")
    #[arg(long)]
    audit_interval: Option<String>,

    /// Health check interval (e.g., "2s", "500ms")
    #[arg(long)]
    health_interval: Option<String>,

    /// Traffic generator interval (e.g., "1s")
    #[arg(long)]
    traffic_interval: Option<String>,

    /// Log file (the terminal is taken by the UI)
    #[arg(long, default_value = "autoheal-dash.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_file)?;

    let overrides = Overrides {
        demo_api: args.demo_api,
        autoheal_api: args.autoheal_api,
        metrics_url: args.metrics_url,
        audit_interval: args.audit_interval,
        health_interval: args.health_interval,
        traffic_interval: args.traffic_interval,
    };
    let settings = Settings::load(args.config.as_deref(), &overrides)?;
    info!(?settings, "Configuration loaded");

    let backend = Arc::new(HttpBackend::new(&settings)?);

    // Build a tokio runtime for the dashboard loops
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let dashboard = Dashboard::activate(backend, settings.intervals);
    let app = App::new(dashboard, settings.metrics_url.clone(), Theme::auto_detect());

    let (app, result) = run_tui(app);

    // Stop the loops before the runtime goes away
    rt.block_on(app.into_dashboard().teardown());

    result
}

/// Send tracing output to `path`, filtered by `RUST_LOG` (default: info).
fn init_logging(path: &std::path::Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}

/// Run the TUI until the user quits. The app is handed back for teardown.
fn run_tui(mut app: App) -> (App, Result<()>) {
    let result = setup_terminal().and_then(|mut terminal| {
        let run = run_app(&mut terminal, &mut app);
        let restore = restore_terminal(&mut terminal);
        run.and(restore)
    });
    (app, result)
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        // Pick up new health/audit state and finished toggles
        app.refresh();

        terminal.draw(|frame| ui::render(frame, app))?;

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
    }

    info!("Quit requested");
    Ok(())
}
