//! Drives the engine from input commands and relays its events to the UI.

use anyhow::Result;
use noughts::{Engine, EngineEvent};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info};

/// Commands sent to the orchestrator by the input loop and by the
/// deferred AI-move timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A board cell was activated (0-8).
    CellActivated(usize),
    /// Restart with a fresh game.
    Reset,
    /// The thinking delay for this generation elapsed.
    AiReady(u64),
    /// Shut down.
    Quit,
}

/// Owns the engine and sequences play between the human and the
/// computer.
pub struct Orchestrator {
    engine: Engine,
    cmd_rx: mpsc::UnboundedReceiver<Command>,
    cmd_tx: mpsc::UnboundedSender<Command>,
    event_tx: mpsc::UnboundedSender<EngineEvent>,
    ai_delay: Duration,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    ///
    /// `cmd_tx` is a handle to the orchestrator's own command channel,
    /// used to send itself `AiReady` once the thinking delay elapses.
    pub fn new(
        engine: Engine,
        cmd_rx: mpsc::UnboundedReceiver<Command>,
        cmd_tx: mpsc::UnboundedSender<Command>,
        event_tx: mpsc::UnboundedSender<EngineEvent>,
        ai_delay: Duration,
    ) -> Self {
        Self {
            engine,
            cmd_rx,
            cmd_tx,
            event_tx,
            ai_delay,
        }
    }

    /// Runs until `Quit` arrives or the command channel closes.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting game orchestration");

        while let Some(cmd) = self.cmd_rx.recv().await {
            debug!(?cmd, "Handling command");
            let events = match cmd {
                Command::CellActivated(index) => self.engine.handle_cell_activated(index),
                Command::AiReady(generation) => self.engine.apply_ai_move(generation),
                Command::Reset => self.engine.handle_reset(),
                Command::Quit => break,
            };
            self.forward(events)?;
        }

        info!("Orchestration finished");
        Ok(())
    }

    /// Relays engine events to the UI, arming the thinking-delay timer
    /// when the engine schedules a computer move.
    fn forward(&self, events: Vec<EngineEvent>) -> Result<()> {
        for engine_event in events {
            if let EngineEvent::AiScheduled { generation } = engine_event {
                let tx = self.cmd_tx.clone();
                let delay = self.ai_delay;
                tokio::spawn(async move {
                    sleep(delay).await;
                    // The engine drops the move if a reset happened in
                    // the meantime.
                    let _ = tx.send(Command::AiReady(generation));
                });
            }
            self.event_tx.send(engine_event)?;
        }
        Ok(())
    }
}
