// src/visual/clock.rs
//! Animation phase, advanced once per rendered frame.

/// Added to the angle on every frame. Visual speed follows the frame rate.
pub const ANGLE_STEP: f64 = 0.02;
/// Added to the wave offset on every frame.
pub const WAVE_STEP: f64 = 0.01;

/// Phase values read by the layers. Both only ever grow; the trig
/// functions that consume them are periodic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationPhase {
    pub angle: f64,
    pub wave_offset: f64,
}

/// Sole owner of phase advancement.
#[derive(Debug, Default)]
pub struct AnimationClock {
    phase: AnimationPhase,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.phase.angle += ANGLE_STEP;
        self.phase.wave_offset += WAVE_STEP;
    }

    pub fn reset(&mut self) {
        self.phase = AnimationPhase::default();
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }
}
