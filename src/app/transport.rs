// src/app/transport.rs
//! Playback state machine and the frame-loop scheduler it drives.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::audio::AudioTransport;
use crate::visual::AnimationClock;

/// Discrete user actions on playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportAction {
    Play,
    Pause,
    Refresh,
    Mute,
}

/// Where playback is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Playback status plus the independent mute flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub state: TransportState,
    pub muted: bool,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    /// Output volume implied by the mute flag.
    pub fn volume(&self) -> f32 {
        if self.muted { 0.0 } else { 1.0 }
    }
}

/// Explicit start/stop control over per-frame rendering.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    interval: Duration,
    /// `None` while suspended
    next_frame: Option<Instant>,
}

impl FrameLoop {
    /// A suspended loop that, once started, runs at `fps` frames per second.
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            next_frame: None,
        }
    }

    /// Resume scheduling; the first frame is due immediately.
    pub fn start(&mut self) {
        if self.next_frame.is_none() {
            self.next_frame = Some(Instant::now());
        }
    }

    /// Suspend scheduling. The last rendered frame stays on screen.
    pub fn stop(&mut self) {
        self.next_frame = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_frame.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left before the next frame, `None` while suspended.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_frame.map(|due| due.saturating_duration_since(now))
    }

    /// Claim the next frame if it is due, scheduling the one after it.
    pub fn take_due_frame(&mut self, now: Instant) -> bool {
        match self.next_frame {
            Some(due) if now >= due => {
                // Skip missed frames instead of bursting to catch up
                let next = due + self.interval;
                self.next_frame = Some(if next < now { now + self.interval } else { next });
                true
            }
            _ => false,
        }
    }
}

/// Applies transport actions to the audio engine, the animation clock and
/// the frame loop. Sole owner of [`PlaybackState`].
pub struct TransportController<A> {
    audio: A,
    playback: PlaybackState,
}

impl<A: AudioTransport> TransportController<A> {
    pub fn new(audio: A) -> Self {
        Self {
            audio,
            playback: PlaybackState::default(),
        }
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Apply one action. Returns true when the visible controls changed.
    pub fn apply(
        &mut self,
        action: TransportAction,
        clock: &mut AnimationClock,
        frame_loop: &mut FrameLoop,
    ) -> bool {
        let before = self.playback;

        match action {
            TransportAction::Play => {
                if self.playback.state != TransportState::Playing {
                    self.audio.play_looped();
                    self.audio.set_volume(self.playback.volume());
                    self.playback.state = TransportState::Playing;
                }
                frame_loop.start();
            }
            TransportAction::Pause => {
                if self.playback.state == TransportState::Playing {
                    self.audio.pause();
                    self.playback.state = TransportState::Paused;
                }
                frame_loop.stop();
            }
            TransportAction::Refresh => {
                self.audio.stop();
                clock.reset();
                frame_loop.stop();
                self.playback.state = TransportState::Stopped;
            }
            TransportAction::Mute => {
                self.playback.muted = !self.playback.muted;
                if self.playback.is_playing() {
                    self.audio.set_volume(self.playback.volume());
                }
                info!("muted: {}", self.playback.muted);
            }
        }

        if before != self.playback {
            debug!("{action:?}: {before:?} -> {:?}", self.playback);
        }
        before.muted != self.playback.muted
    }

    /// Halt audio before shutdown.
    pub fn shutdown(&mut self) {
        self.audio.stop();
        self.playback.state = TransportState::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_loop_starts_suspended() {
        let frames = FrameLoop::new(60);
        assert!(!frames.is_running());
        assert_eq!(frames.time_until_next(Instant::now()), None);
    }

    #[test]
    fn test_frame_loop_paces_frames() {
        let mut frames = FrameLoop::new(50);
        assert_eq!(frames.interval(), Duration::from_millis(20));
        frames.start();

        let now = Instant::now();
        assert!(frames.take_due_frame(now));
        assert!(!frames.take_due_frame(now));
        assert!(frames.take_due_frame(now + Duration::from_millis(20)));

        frames.stop();
        assert!(!frames.take_due_frame(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_frame_loop_skips_missed_frames() {
        let mut frames = FrameLoop::new(100);
        frames.start();
        let now = Instant::now();
        assert!(frames.take_due_frame(now));

        let late = now + Duration::from_secs(1);
        assert!(frames.take_due_frame(late));
        assert!(!frames.take_due_frame(late));
        assert_eq!(frames.time_until_next(late), Some(Duration::from_millis(10)));
    }

    #[test]
    fn test_start_twice_keeps_schedule() {
        let mut frames = FrameLoop::new(10);
        frames.start();
        let now = Instant::now();
        assert!(frames.take_due_frame(now));
        frames.start();
        assert!(!frames.take_due_frame(now));
    }

    #[test]
    fn test_volume_follows_mute_flag() {
        let mut playback = PlaybackState::default();
        assert_eq!(playback.volume(), 1.0);
        playback.muted = true;
        assert_eq!(playback.volume(), 0.0);
    }
}
