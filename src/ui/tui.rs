// src/ui/tui.rs
//! Terminal setup, the event/frame loop, and teardown.

use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, error, info};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::{
    app::App,
    audio::{AudioAsset, AudioTransport, MusicPlayer},
    config::Config,
};

/// How long to wait for input while the frame loop is suspended.
const IDLE_POLL: Duration = Duration::from_millis(250);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Load the asset, take over the terminal, and run until the user quits.
pub fn run(config: Config) -> Result<()> {
    // Fails before touching the terminal so the error prints normally
    let asset = AudioAsset::load(&config.audio)?;
    let player = MusicPlayer::new(&asset)?;
    let capture = player.capture.clone();
    let mut app = App::new(player, capture, &config, asset.display_name());

    let result = match setup_terminal() {
        Ok(mut terminal) => {
            let result = run_loop(&mut terminal, &mut app);
            if let Err(e) = restore_terminal(&mut terminal) {
                error!("failed to restore terminal: {e:#}");
            }
            result
        }
        Err(e) => {
            if let Err(restore) = leave_terminal_modes(&mut io::stdout()) {
                error!("failed to restore terminal after setup error: {restore:#}");
            }
            Err(e)
        }
    };

    app.shutdown();
    info!("shut down");
    result
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Undo everything `setup_terminal` may have switched on.
fn leave_terminal_modes<W: io::Write>(out: &mut W) -> Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    leave_terminal_modes(terminal.backend_mut())?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop<A: AudioTransport>(terminal: &mut Term, app: &mut App<A>) -> Result<()> {
    loop {
        if app.take_redraw() {
            terminal.draw(|f| app.draw(f))?;
        }

        let timeout = app
            .time_until_next_frame(Instant::now())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.on_key(key) {
                        return Ok(());
                    }
                }
                CEvent::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => app.on_click(column, row),
                CEvent::Resize(width, height) => {
                    debug!("terminal resized to {width}x{height}");
                    app.request_redraw();
                }
                _ => {}
            }
        }

        app.poll_frame(Instant::now());
    }
}
