// src/audio/analyzer/fft.rs
//! FFT computation producing a byte-scaled, time-smoothed magnitude spectrum.

use std::f32::consts::PI;

use rustfft::{num_complex::Complex, FftPlanner};

/// Number of time-domain samples per analysis.
pub const FFT_SIZE: usize = 2048;
/// Number of frequency bins produced (half the FFT size).
pub const BIN_COUNT: usize = FFT_SIZE / 2;

/// FFT processor for audio spectrum analysis.
pub struct FftProcessor {
    /// FFT planner for frequency analysis
    fft_planner: FftPlanner<f32>,
    /// Time constant blending the previous frame into the current one
    smoothing: f32,
    /// Smoothed linear magnitudes from the previous frame
    previous: Vec<f32>,
    /// Level mapped to 0
    min_db: f32,
    /// Level mapped to 255
    max_db: f32,
}

impl FftProcessor {
    pub fn new(smoothing: f32) -> Self {
        Self {
            fft_planner: FftPlanner::new(),
            smoothing: smoothing.clamp(0.0, 1.0),
            previous: vec![0.0; BIN_COUNT],
            min_db: -100.0,
            max_db: -30.0,
        }
    }

    /// Forget the smoothing history.
    pub fn reset(&mut self) {
        self.previous.iter_mut().for_each(|m| *m = 0.0);
    }

    /// Compute the spectrum of the newest `FFT_SIZE` samples, returning
    /// `BIN_COUNT` energies in `[0, 255]`.
    pub fn compute(&mut self, samples: &[f32]) -> Vec<f32> {
        let start = samples.len().saturating_sub(FFT_SIZE);
        let recent = &samples[start..];
        // Left-pad short input so the newest sample is always last
        let pad = FFT_SIZE - recent.len();

        let mut buffer: Vec<Complex<f32>> = (0..FFT_SIZE)
            .map(|i| {
                let sample = if i < pad { 0.0 } else { recent[i - pad] };
                Complex::new(sample * blackman_window(i, FFT_SIZE), 0.0)
            })
            .collect();

        let fft = self.fft_planner.plan_fft_forward(FFT_SIZE);
        fft.process(&mut buffer);

        let scale = 1.0 / FFT_SIZE as f32;
        let smoothing = self.smoothing;
        let min_db = self.min_db;
        let db_range = self.max_db - self.min_db;

        buffer
            .iter()
            .take(BIN_COUNT)
            .zip(self.previous.iter_mut())
            .map(|(c, prev)| {
                let mag = c.norm() * scale;
                *prev = smoothing * *prev + (1.0 - smoothing) * mag;
                let db = 20.0 * prev.max(1e-10).log10();
                (255.0 * (db - min_db) / db_range).clamp(0.0, 255.0).floor()
            })
            .collect()
    }
}

/// Blackman window coefficient for sample `i` of `size`.
pub fn blackman_window(i: usize, size: usize) -> f32 {
    let x = i as f32 / size as f32;
    0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
}
