// src/audio/player.rs
//! Looping playback of the audio asset using rodio, with sample capture for analysis.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, error, warn};
use rodio::{Decoder, OutputStream, Sink, Source};

use super::asset::AudioAsset;
use super::sample_capture::{CaptureBuffer, SampleCapture};

/// Roughly 370ms of mono audio at 44.1kHz.
const CAPTURE_CAPACITY: usize = 16384;

/// Transport operations the visualization needs from an audio engine.
pub trait AudioTransport {
    /// Start looping playback, resuming from the pause point if paused.
    fn play_looped(&mut self);
    fn pause(&mut self);
    /// Halt playback and rewind to the start.
    fn stop(&mut self);
    /// Set output volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);
    /// True while audio is audibly advancing (not paused, not stopped).
    fn is_playing(&self) -> bool;
    /// Position within the current loop iteration.
    fn elapsed_time(&self) -> Duration;
}

/// Commands sent to the audio playback thread.
enum PlayerCommand {
    Play,
    Pause,
    Resume,
    Stop,
    SetVolume(f32),
}

/// Wall-clock playback position that only advances while running.
#[derive(Debug, Default, Clone)]
pub struct Stopwatch {
    accumulated: Duration,
    started_at: Option<Instant>,
}

impl Stopwatch {
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub fn pause(&mut self) {
        if let Some(t) = self.started_at.take() {
            self.accumulated += t.elapsed();
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started_at = None;
    }

    pub fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map(|t| t.elapsed()).unwrap_or_default()
    }
}

/// Position within a looping track of length `period`, if known.
pub fn loop_position(elapsed: Duration, period: Option<Duration>) -> Duration {
    match period {
        Some(p) if !p.is_zero() => {
            Duration::from_nanos((elapsed.as_nanos() % p.as_nanos()) as u64)
        }
        _ => elapsed,
    }
}

/// Plays one asset in a loop on a dedicated audio thread.
pub struct MusicPlayer {
    /// Sender to the audio thread for commands
    cmd_tx: Sender<PlayerCommand>,
    /// Cleared by the audio thread when playback could not start
    sink_alive: Arc<AtomicBool>,
    paused: bool,
    stopwatch: Stopwatch,
    track_length: Option<Duration>,
    /// Mono samples recently sent to the output, read by the analyzer
    pub capture: Arc<CaptureBuffer>,
}

impl MusicPlayer {
    /// Spawn the audio thread for `asset`. Playback does not start until
    /// [`AudioTransport::play_looped`] is called.
    pub fn new(asset: &AudioAsset) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<PlayerCommand>();
        let sink_alive = Arc::new(AtomicBool::new(false));
        let capture = Arc::new(CaptureBuffer::new(CAPTURE_CAPACITY));

        let thread_asset = asset.clone();
        let thread_alive = sink_alive.clone();
        let thread_capture = capture.clone();

        thread::Builder::new()
            .name("audio".into())
            .spawn(move || audio_thread(rx, thread_asset, thread_alive, thread_capture))?;

        Ok(Self {
            cmd_tx: tx,
            sink_alive,
            paused: false,
            stopwatch: Stopwatch::default(),
            track_length: asset.metadata.duration,
            capture,
        })
    }

    fn send(&self, cmd: PlayerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    /// True if there's an active sink (playing or paused).
    fn has_sink(&self) -> bool {
        self.sink_alive.load(Ordering::SeqCst)
    }
}

impl AudioTransport for MusicPlayer {
    fn play_looped(&mut self) {
        if self.paused {
            // Resuming keeps the loop position even if the sink died meanwhile
            if self.has_sink() {
                self.send(PlayerCommand::Resume);
            }
        } else if !self.has_sink() {
            self.stopwatch.reset();
            self.sink_alive.store(true, Ordering::SeqCst);
            self.send(PlayerCommand::Play);
        }
        self.paused = false;
        self.stopwatch.start();
    }

    fn pause(&mut self) {
        if self.has_sink() {
            self.send(PlayerCommand::Pause);
        }
        self.paused = true;
        self.stopwatch.pause();
    }

    fn stop(&mut self) {
        self.send(PlayerCommand::Stop);
        self.sink_alive.store(false, Ordering::SeqCst);
        self.paused = false;
        self.stopwatch.reset();
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(PlayerCommand::SetVolume(volume.clamp(0.0, 1.0)));
    }

    fn is_playing(&self) -> bool {
        self.has_sink() && !self.paused
    }

    fn elapsed_time(&self) -> Duration {
        loop_position(self.stopwatch.elapsed(), self.track_length)
    }
}

impl Drop for MusicPlayer {
    fn drop(&mut self) {
        self.send(PlayerCommand::Stop);
    }
}

/// Owns the output stream and the current sink; runs until the command
/// channel closes.
fn audio_thread(
    rx: Receiver<PlayerCommand>,
    asset: AudioAsset,
    alive: Arc<AtomicBool>,
    capture: Arc<CaptureBuffer>,
) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            warn!("no audio output device, continuing silently: {e}");
            // Drain commands until the sender is dropped
            while let Ok(cmd) = rx.recv() {
                if matches!(cmd, PlayerCommand::Play) {
                    alive.store(false, Ordering::SeqCst);
                }
            }
            return;
        }
    };

    let mut sink: Option<Sink> = None;
    let mut volume = 1.0f32;

    while let Ok(cmd) = rx.recv() {
        match cmd {
            PlayerCommand::Play => {
                if let Some(s) = sink.take() {
                    s.stop();
                }
                capture.clear();

                let started = Sink::try_new(&handle)
                    .map_err(anyhow::Error::from)
                    .and_then(|new_sink| {
                        let source = Decoder::new_looped(asset.reader())?.convert_samples::<f32>();
                        new_sink.set_volume(volume);
                        new_sink.append(SampleCapture::new(source, capture.clone()));
                        new_sink.play();
                        Ok(new_sink)
                    });

                match started {
                    Ok(s) => {
                        debug!("audio thread: playing {}", asset.path().display());
                        sink = Some(s);
                    }
                    Err(e) => {
                        error!("cannot start playback of {}: {e:#}", asset.path().display());
                        alive.store(false, Ordering::SeqCst);
                    }
                }
            }
            PlayerCommand::Pause => {
                if let Some(s) = &sink {
                    s.pause();
                }
            }
            PlayerCommand::Resume => {
                if let Some(s) = &sink {
                    s.play();
                }
            }
            PlayerCommand::Stop => {
                if let Some(s) = sink.take() {
                    s.stop();
                }
            }
            PlayerCommand::SetVolume(v) => {
                volume = v;
                if let Some(s) = &sink {
                    s.set_volume(v);
                }
            }
        }
    }

    if let Some(s) = sink.take() {
        s.stop();
    }
}
