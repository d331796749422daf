//! Argus Dashboard - demo host for the monitoring panels
//!
//! Wires both panels to an in-memory event bus, feeds the bus from a
//! synthetic event generator, and renders to the terminal.
//!
//! Usage:
//!   argus-dash [OPTIONS]
//!
//! Examples:
//!   argus-dash                          # synthetic stream, sample agent
//!   argus-dash --agent scribe.json      # display a manifest from disk
//!   argus-dash --max-events 500 --refresh 100
//!
//! Keys:
//!   p pause capture | c clear | / type filter | s source filter
//!   Enter expand payload | Up/Down cursor | j/k agent scroll
//!   1/2 toggle panels | 0 toggle all | q quit

mod panel_manager;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use argus::{
    AgentManifest, AgentViewerPanel, DashConfig, EventBus, EventMonitorPanel, EventRecord,
    MonitorConfig, PanelColors,
};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use panel_manager::{PanelId, PanelManager};
use rand::Rng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use tokio::time::interval;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Dashboard CLI arguments
#[derive(Parser)]
#[command(name = "argus-dash")]
#[command(about = "Event monitor and agent capability viewer")]
#[command(version)]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Agent manifest (JSON) to display
    #[arg(long)]
    agent: Option<PathBuf>,

    /// Retention window for the event monitor
    #[arg(long)]
    max_events: Option<usize>,

    /// Refresh interval in milliseconds
    #[arg(long)]
    refresh: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Start without the synthetic event generator
    #[arg(long)]
    quiet: bool,
}

/// Application state
struct App {
    monitor_panel: EventMonitorPanel,
    agent_panel: AgentViewerPanel,
    panel_manager: PanelManager,
}

impl App {
    fn new(bus: &EventBus, config: MonitorConfig, manifest: AgentManifest) -> Self {
        let mut agent_panel = AgentViewerPanel::new();
        agent_panel.update(manifest);
        Self {
            monitor_panel: EventMonitorPanel::new(bus, config),
            agent_panel,
            panel_manager: PanelManager::new(),
        }
    }

    /// Handle keyboard input. Returns true to quit.
    ///
    /// Visible panels get the key first; while the monitor's filter editor
    /// is open it consumes everything, including 'q'.
    fn handle_key(&mut self, key: KeyCode) -> bool {
        if self.panel_manager.is_visible(PanelId::Monitor) && self.monitor_panel.handle_key(key) {
            return false;
        }
        if self.panel_manager.is_visible(PanelId::Agent) && self.agent_panel.handle_key(key) {
            return false;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('0') => {
                if self.panel_manager.visible_count() == PanelId::all().len() {
                    self.panel_manager.hide_all();
                } else {
                    self.panel_manager.show_all();
                }
            }
            KeyCode::Char('1') => self.panel_manager.toggle(PanelId::Monitor),
            KeyCode::Char('2') => self.panel_manager.toggle(PanelId::Agent),
            _ => {}
        }
        false
    }
}

/// Spawn the synthetic event generator feeding the bus
fn spawn_event_generator(bus: EventBus) {
    tokio::spawn(async move {
        let mut tick = interval(Duration::from_millis(700));
        loop {
            tick.tick().await;
            bus.emit(&synthetic_event());
        }
    });
}

/// One randomly picked demo event
fn synthetic_event() -> EventRecord {
    const KINDS: &[(&str, &str)] = &[
        ("panel:toggle", "sidebar"),
        ("panel:resize", "layout"),
        ("file:opened", "editor"),
        ("file:closed", "editor"),
        ("file:error", "watcher"),
        ("agent:started", "orchestrator"),
        ("agent:completed", "orchestrator"),
        ("tool:invoked", "executor"),
        ("net:request", "gateway"),
    ];

    let mut rng = rand::thread_rng();
    let (event_type, source) = KINDS[rng.gen_range(0..KINDS.len())];
    EventRecord::new(
        event_type,
        source,
        serde_json::json!({ "seq": rng.gen_range(0..1000) }),
    )
}

/// Built-in manifest shown when no --agent file is given
fn sample_manifest() -> AgentManifest {
    serde_json::from_value(serde_json::json!({
        "id": "agent-scribe",
        "name": "Scribe",
        "description": "Summarizes project activity and answers questions about it",
        "version": "1.2.0",
        "capabilities": {
            "streaming": true,
            "sandbox": false,
            "max_concurrency": 4
        },
        "tools": [
            {
                "name": "search",
                "description": "Full-text search over indexed activity",
                "input_schema": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "description": "Search query" },
                        "limit": { "type": "integer", "description": "Maximum results" }
                    },
                    "required": ["query"]
                },
                "output_schema": { "type": "array" }
            },
            {
                "name": "summarize",
                "description": "Summarize a time range of activity",
                "input_schema": {
                    "type": "object",
                    "properties": {
                        "since": { "type": "string", "description": "ISO-8601 start" }
                    }
                }
            }
        ]
    }))
    .unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => DashConfig::load(path)?,
        None => DashConfig::default(),
    };
    let max_events = args.max_events.unwrap_or(file_config.max_events);
    let refresh = args.refresh.unwrap_or(file_config.refresh_ms).max(50);
    let log_level = args
        .log_level
        .clone()
        .unwrap_or(file_config.log_level)
        .to_lowercase();

    // Log to a file so the TUI stays clean
    let filter = EnvFilter::new(format!("argus={log_level},argus_dash={log_level}"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(|| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open("/tmp/argus-dash.log")
                .unwrap()
        })
        .init();

    debug!("Dashboard v{} starting...", env!("CARGO_PKG_VERSION"));

    let manifest = match &args.agent {
        Some(path) => AgentManifest::from_file(path)?,
        None => sample_manifest(),
    };

    let bus = EventBus::new();
    if !args.quiet {
        spawn_event_generator(bus.clone());
    }

    let mut app = App::new(&bus, MonitorConfig::with_max_events(max_events), manifest);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut tick = interval(Duration::from_millis(refresh));
    let result = run_app(&mut terminal, &mut app, &mut tick).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!("Error: {:?}", err);
        return Err(err);
    }

    debug!("Dashboard exiting cleanly");
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: &mut tokio::time::Interval,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let main_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .split(f.area());

            // Header
            let monitor = app.monitor_panel.monitor();
            let status = if monitor.is_paused() {
                Span::styled(
                    "◼ paused",
                    Style::default()
                        .fg(PanelColors::WARNING)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(
                    "● live",
                    Style::default()
                        .fg(PanelColors::SUCCESS)
                        .add_modifier(Modifier::BOLD),
                )
            };
            let header = Paragraph::new(Line::from(vec![
                Span::styled(
                    "Argus Dashboard  ",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                status,
                Span::styled(
                    format!("  {} captured", monitor.len()),
                    Style::default().fg(PanelColors::SECONDARY),
                ),
            ]))
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(header, main_chunks[0]);

            // Panels
            let visible = app.panel_manager.visible_panels();
            if visible.is_empty() {
                let hint = Paragraph::new("All panels hidden - press '0' to restore")
                    .style(Style::default().fg(PanelColors::MUTED));
                f.render_widget(hint, main_chunks[1]);
            } else {
                let panel_chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints(app.panel_manager.layout_constraints())
                    .split(main_chunks[1]);

                for (chunk, panel) in panel_chunks.iter().zip(visible) {
                    match panel {
                        PanelId::Monitor => app.monitor_panel.render(f, *chunk),
                        PanelId::Agent => app.agent_panel.render(f, *chunk),
                    }
                }
            }

            // Footer with keyboard shortcuts
            let footer_text = if app.monitor_panel.is_editing() {
                "Editing filter: type to narrow | Tab complete | Enter/Esc done".to_string()
            } else {
                format!(
                    "p pause | c clear | / type | s source | Enter expand | 1/2 panels | q quit | {} visible",
                    app.panel_manager.visible_count()
                )
            };
            let footer =
                Paragraph::new(footer_text).style(Style::default().fg(PanelColors::MUTED));
            f.render_widget(footer, main_chunks[2]);
        })?;

        // Handle input with keyboard shortcuts
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key(key.code) {
                    return Ok(());
                }
            }
        }

        tick.tick().await;
    }
}
