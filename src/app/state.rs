// src/app/state.rs
//! Session state owned by the render loop: transport, clock, analyzer and
//! the last sampled frame.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

use super::transport::{FrameLoop, PlaybackState, TransportAction, TransportController};
use crate::{
    audio::{AudioTransport, CaptureBuffer, SpectrumAnalyzer},
    config::Config,
    ui::{
        controls::{draw_controls, hit_test},
        keybindings::{key_to_action, KeyAction},
        widgets::{cell_to_canvas, render_canvas},
    },
    visual::{
        AnimationClock, AnimationPhase, Canvas, CanvasSize, FrameInput, Scene, SceneConfig,
        Sparkle,
    },
};

/// Main application state.
pub struct App<A> {
    transport: TransportController<A>,
    clock: AnimationClock,
    frame_loop: FrameLoop,
    analyzer: SpectrumAnalyzer,
    scene: Scene,
    canvas: Canvas,
    rng: StdRng,
    /// Inputs of the frame currently on screen
    last_frame: FrameInput,
    /// Where the canvas was last drawn, for mapping clicks
    canvas_area: Rect,
    title: String,
    needs_redraw: bool,
}

impl<A: AudioTransport> App<A> {
    /// Create a stopped session over `audio`, analyzing what `capture` collects.
    pub fn new(audio: A, capture: Arc<CaptureBuffer>, config: &Config, title: String) -> Self {
        let seed = config.resolved_seed();
        info!("session seed {seed}");

        Self {
            transport: TransportController::new(audio),
            clock: AnimationClock::new(),
            frame_loop: FrameLoop::new(config.fps),
            analyzer: SpectrumAnalyzer::new(capture),
            scene: Scene::new(SceneConfig {
                base_hue: config.base_hue,
                noise_seed: seed as u32,
            }),
            canvas: Canvas::new(CanvasSize::DEFAULT, 0, 0),
            rng: StdRng::seed_from_u64(seed),
            last_frame: FrameInput::default(),
            canvas_area: Rect::default(),
            title,
            needs_redraw: true,
        }
    }

    pub fn playback(&self) -> PlaybackState {
        self.transport.playback()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.clock.phase()
    }

    pub fn audio(&self) -> &A {
        self.transport.audio()
    }

    pub fn is_rendering(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn last_frame(&self) -> &FrameInput {
        &self.last_frame
    }

    /// Apply a transport action to the session.
    pub fn apply(&mut self, action: TransportAction) {
        let controls_changed = self
            .transport
            .apply(action, &mut self.clock, &mut self.frame_loop);
        if controls_changed {
            self.needs_redraw = true;
        }
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(&key) {
            KeyAction::Transport(action) => self.apply(action),
            KeyAction::TogglePlay => {
                let action = if self.playback().is_playing() {
                    TransportAction::Pause
                } else {
                    TransportAction::Play
                };
                self.apply(action);
            }
            KeyAction::Quit => return true,
            KeyAction::None => {}
        }
        false
    }

    /// Route a left click at terminal cell `(column, row)`.
    pub fn on_click(&mut self, column: u16, row: u16) {
        if let Some((x, y)) = cell_to_canvas(self.canvas_area, self.canvas.size(), column, row) {
            self.click_canvas(x, y);
        }
    }

    /// Route a click at canvas coordinates; clicks off every control do nothing.
    pub fn click_canvas(&mut self, x: f64, y: f64) -> Option<TransportAction> {
        let action = hit_test(self.canvas.size(), x, y)?;
        debug!("click ({x:.1}, {y:.1}) -> {action:?}");
        self.apply(action);
        Some(action)
    }

    /// Time left before the next frame is due, `None` while suspended.
    pub fn time_until_next_frame(&self, now: Instant) -> Option<Duration> {
        self.frame_loop.time_until_next(now)
    }

    /// Advance and sample a frame if the loop has one due.
    pub fn poll_frame(&mut self, now: Instant) -> bool {
        if self.frame_loop.take_due_frame(now) {
            self.advance_frame();
            true
        } else {
            false
        }
    }

    /// Tick the clock, then sample the analyzer and the sparkle for this frame.
    pub fn advance_frame(&mut self) {
        if !self.playback().is_playing() {
            return;
        }
        self.clock.tick();
        self.last_frame = FrameInput {
            phase: self.clock.phase(),
            spectrum: self.analyzer.sample(),
            elapsed: self.transport.audio().elapsed_time(),
            sparkle: Sparkle::random(&mut self.rng, self.canvas.size()),
        };
        self.needs_redraw = true;
    }

    /// Ask for the current frame to be drawn again without advancing it.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Whether a draw is pending; clears the request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Paint the last sampled frame plus the controls onto the canvas.
    pub fn paint_frame(&mut self, cols: usize, rows: usize) -> &Canvas {
        if self.canvas.cols() != cols || self.canvas.rows() != rows {
            self.canvas.resize(cols, rows);
        }
        self.scene.render(&mut self.canvas, &self.last_frame);
        let muted = self.playback().muted;
        draw_controls(&mut self.canvas, muted);
        &self.canvas
    }

    /// Draw the application UI.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title));
        let inner = block.inner(f.area());
        f.render_widget(block, f.area());

        self.canvas_area = inner;
        self.paint_frame(inner.width as usize, inner.height as usize);
        render_canvas(f, inner, &self.canvas);
    }

    /// Stop audio before exit.
    pub fn shutdown(&mut self) {
        self.frame_loop.stop();
        self.transport.shutdown();
    }
}
