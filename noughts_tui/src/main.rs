//! Terminal UI for noughts.
//!
//! The engine crate does all the thinking; this binary renders the
//! board, forwards input to the orchestrator, and applies the engine's
//! events to a display mirror.

#![warn(missing_docs)]

mod app;
mod input;
mod orchestrator;
mod ui;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use noughts::{Engine, EngineEvent, MoveSelector, OptimalSelector, RandomSelector};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use app::App;
use orchestrator::{Command, Orchestrator};

/// Opponent move-selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Opponent {
    /// Exhaustive minimax; never loses.
    Optimal,
    /// Uniform random over empty squares.
    Random,
}

impl Opponent {
    fn selector(self) -> Box<dyn MoveSelector> {
        match self {
            Opponent::Optimal => Box::new(OptimalSelector),
            Opponent::Random => Box::new(RandomSelector),
        }
    }
}

/// Play tic-tac-toe against the computer in the terminal.
#[derive(Debug, Parser)]
#[command(name = "noughts", version, about)]
struct Cli {
    /// Opponent strategy.
    #[arg(long, value_enum, default_value = "optimal")]
    opponent: Opponent,

    /// Delay in milliseconds before the computer moves.
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to a file so tracing output cannot corrupt the terminal UI.
    let log_file = std::fs::File::create("noughts_tui.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    info!(opponent = ?cli.opponent, delay_ms = cli.delay_ms, "Starting noughts TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let engine = Engine::new(cli.opponent.selector());
    let mut orchestrator = Orchestrator::new(
        engine,
        cmd_rx,
        cmd_tx.clone(),
        event_tx,
        Duration::from_millis(cli.delay_ms),
    );

    let orchestrator_handle = tokio::spawn(async move { orchestrator.run().await });

    let app = App::new();
    let res = run_app(&mut terminal, app, cmd_tx, &mut event_rx).await;

    orchestrator_handle.abort();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    cmd_tx: mpsc::UnboundedSender<Command>,
    event_rx: &mut mpsc::UnboundedReceiver<EngineEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Apply engine events to the display mirror.
        while let Ok(engine_event) = event_rx.try_recv() {
            app.handle_event(engine_event);
        }

        // Check for keyboard input (non-blocking).
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        let _ = cmd_tx.send(Command::Quit);
                        return Ok(());
                    }
                    KeyCode::Char('r') => {
                        let _ = cmd_tx.send(Command::Reset);
                    }
                    KeyCode::Char(c) if c.is_ascii_digit() => {
                        if let Some(digit) = c.to_digit(10) {
                            if (1..=9).contains(&digit) {
                                let _ = cmd_tx.send(Command::CellActivated(digit as usize - 1));
                            }
                        }
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        let _ = cmd_tx.send(Command::CellActivated(app.cursor().to_index()));
                    }
                    code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
                        app.move_cursor(code);
                    }
                    _ => {}
                }
            }
        }
    }
}
