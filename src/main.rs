//! Terminal slide-toe runner (default binary).
//!
//! Two players share one terminal. Input comes from crossterm (keys and mouse),
//! clock ticks come from the tokio-backed [`ClockDriver`], and the screen is the
//! framebuffer renderer from `tui_slidetoe::term`.

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tui_slidetoe::clock::ClockDriver;
use tui_slidetoe::config::AppConfig;
use tui_slidetoe::engine::{TraceWriter, TurnController};
use tui_slidetoe::input::{
    handle_key_event, mouse_click_position, should_quit, CursorHandler, InputEvent,
};
use tui_slidetoe::term::{BoardModel, FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use tui_slidetoe::types::GameAction;

/// Upper bound on input latency and on how late a clock tick is shown.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Terminal model plus the optional trace, fed by the same notifications.
type Screen = (BoardModel, Option<TraceWriter<BufWriter<File>>>);

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;
    info!(clock_secs = config.clock_secs, trace = ?config.trace_path, "starting");

    let trace = config
        .trace_path
        .as_ref()
        .map(TraceWriter::open)
        .transpose()?;
    let mut screen: Screen = (BoardModel::new(), trace);
    let mut clock = ClockDriver::start()?;
    let mut game = TurnController::new(config.clock_secs);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut clock, &mut game, &mut screen);

    // Always try to restore terminal state.
    let _ = term.exit();
    clock.disarm();

    if let Some(trace) = screen.1.as_mut() {
        trace.record_snapshot(&game.snapshot());
        if let Err(e) = trace.flush() {
            warn!(error = %e, "trace flush failed");
        }
        if let Some(e) = trace.take_error() {
            warn!(error = %e, "trace incomplete");
        }
    }
    info!(phase = ?game.phase(), "exiting");
    result
}

fn init_logging(config: &AppConfig) -> Result<()> {
    // The terminal belongs to the game; logs only go to a file.
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("create log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    clock: &mut ClockDriver,
    game: &mut TurnController,
    screen: &mut Screen,
) -> Result<()> {
    let view = GameView::default();
    let mut cursor = CursorHandler::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut drawn: Option<(u64, Hud, Viewport)> = None;

    game.refresh(screen);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let hud = Hud {
            cursor: Some(cursor.cursor()),
            running: game.timer().running(),
            started: game.state().started(),
        };

        // Redraw only when something visible changed.
        let frame = (screen.0.revision(), hud, viewport);
        if drawn != Some(frame) {
            view.render_into(&screen.0, hud, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            drawn = Some(frame);
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(InputEvent::ToggleRules) => screen.0.toggle_rules(),
                        Some(InputEvent::Dismiss) => {
                            screen.0.dismiss();
                        }
                        Some(input) => {
                            if let Some(action) = cursor.handle(input) {
                                game.handle(action, screen);
                            }
                        }
                        None => {}
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some((col, row)) = mouse_click_position(mouse) {
                        // A click anywhere closes an open overlay first.
                        if screen.0.rules_visible() || screen.0.popup().is_some() {
                            screen.0.dismiss();
                        } else if let Some(index) = view.hit_test(viewport, col, row) {
                            cursor.set_cursor(index);
                            game.handle(GameAction::CellClicked(index), screen);
                        }
                    }
                }
                Event::Resize(w, h) => {
                    debug!(w, h, "resize");
                    term.invalidate();
                    drawn = None;
                }
                _ => {}
            }
        }

        while let Some(token) = clock.try_recv() {
            game.on_tick(token, screen);
        }
        clock.sync(game.armed());
    }
}
